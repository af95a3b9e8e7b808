//! The subcommand contract.
//!
//! Implementors override only what differs from the defaults: a bare handler
//! is enabled, needs no permission, refuses console invokers, has no aliases
//! and offers no completions.

use crate::invoker::Invoker;

/// Outcome of a handler's execution. `Ok(true)` means the invocation was
/// recognised. An `Err` is reported by the dispatcher and still counts as
/// handled.
pub type HandlerResult = anyhow::Result<bool>;

pub const DEFAULT_DISABLED_MESSAGE: &str = "This command is currently disabled.";

/// A named subcommand registered with a [`crate::Dispatcher`].
pub trait Handler: Send + Sync {
    /// Primary name, matched case-insensitively (e.g. "pay")
    fn name(&self) -> &str;

    /// Alternative selectors, also matched case-insensitively
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Short text for help listings
    fn description(&self) -> &str {
        ""
    }

    /// Checked only when [`Handler::requires_permission`] is true
    fn permission_key(&self) -> &str {
        ""
    }

    fn requires_permission(&self) -> bool {
        false
    }

    /// Evaluated on every dispatch, so a handler may toggle at runtime.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Sent verbatim to the invoker when the handler is disabled.
    fn disabled_message(&self) -> &str {
        DEFAULT_DISABLED_MESSAGE
    }

    fn allow_console_invocation(&self) -> bool {
        false
    }

    /// Run the subcommand. `args` is the full argument list, selector
    /// included.
    fn execute(&self, invoker: &dyn Invoker, args: &[String]) -> HandlerResult;

    /// Suggestions for the last argument in `args`.
    ///
    /// `None` means "nothing to offer" and yields an empty list; return
    /// `Some(vec![])` only when that distinction matters to you.
    fn completion_candidates(
        &self,
        _invoker: &dyn Invoker,
        _args: &[String],
    ) -> Option<Vec<String>> {
        None
    }
}

/// Whether `selector` names `handler`, by primary name or alias, ignoring
/// case. Exact equality only: prefixes never select a handler.
pub fn selects(handler: &dyn Handler, selector: &str) -> bool {
    eq_ignore_case(handler.name(), selector)
        || handler
            .aliases()
            .iter()
            .any(|alias| eq_ignore_case(alias, selector))
}

fn eq_ignore_case(left: &str, right: &str) -> bool {
    left.eq_ignore_ascii_case(right) || left.to_lowercase() == right.to_lowercase()
}
