//! Behavior of the bare root command.
//!
//! Used when an invocation has no arguments and when its first argument names
//! no registered handler.

use crate::handler::HandlerResult;
use crate::invoker::Invoker;

/// Usage line shown by [`UsageFallback`].
pub fn usage_message(root_name: &str) -> String {
    format!("usage: {root_name} <subcommand>")
}

/// What the root command does when no subcommand applies.
pub trait RootFallback: Send + Sync {
    /// Runs with the original, unmodified arguments. Defaults to sending the
    /// usage line and reporting the invocation as handled.
    fn execute(&self, root_name: &str, invoker: &dyn Invoker, _args: &[String]) -> HandlerResult {
        invoker.send_message(&usage_message(root_name));
        Ok(true)
    }

    /// Top-level suggestions, independent of the registered handlers.
    fn completions(&self, _invoker: &dyn Invoker, _args: &[String]) -> Vec<String> {
        Vec::new()
    }
}

/// The stock fallback: a usage line and no suggestions.
#[derive(Debug, Default, Clone, Copy)]
pub struct UsageFallback;

impl RootFallback for UsageFallback {}
