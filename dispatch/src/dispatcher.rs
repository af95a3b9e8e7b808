//! Routing of root-command invocations to registered handlers.
//!
//! A [`Dispatcher`] owns the handlers for one root command (for example
//! `econ`). Each call goes through the same sequence:
//!
//! 1. no arguments → root fallback
//! 2. first argument selects a handler by name or alias, ignoring case
//! 3. no handler selected → root fallback with the original arguments
//! 4. gate: enabled → permission → console context
//! 5. handler executes
//!
//! Gate rejections send a fixed notice to the invoker and count as handled;
//! they never fall through to the root fallback. Errors and panics from
//! execution are caught here once and reported through [`Instrumentation`].

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::config::DispatchConfig;
use crate::error::{DispatchError, HandlerPanic, Result};
use crate::handler::{Handler, HandlerResult, selects};
use crate::instrumentation::{Instrumentation, TracingInstrumentation};
use crate::invoker::Invoker;
use crate::prefix::filter_by_prefix;
use crate::root::{RootFallback, UsageFallback};
use crate::timing::ExecutionTimer;

pub const NO_PERMISSION_MESSAGE: &str = "You do not have permission to execute this command!";
pub const CONSOLE_REJECTED_MESSAGE: &str = "This command cannot be executed from console!";
pub const EXECUTION_FAILED_MESSAGE: &str =
    "An internal error occurred while executing this command.";

/// Result of the precondition checks for one handler and invoker.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Gate {
    Allowed,
    Disabled,
    Unauthorized,
    ContextRejected,
}

/// Where a dispatch ended up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Route {
    RootFallback,
    Disabled,
    Unauthorized,
    ContextRejected,
    Delegated,
}

impl From<Gate> for Route {
    fn from(gate: Gate) -> Self {
        match gate {
            Gate::Allowed => Route::Delegated,
            Gate::Disabled => Route::Disabled,
            Gate::Unauthorized => Route::Unauthorized,
            Gate::ContextRejected => Route::ContextRejected,
        }
    }
}

/// Detailed result of [`Dispatcher::dispatch_with_outcome`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DispatchOutcome {
    pub route: Route,
    /// The boolean a host expects back. Always true for rejections and
    /// failures.
    pub handled: bool,
    /// Execution returned an error or panicked.
    pub failed: bool,
}

/// Subcommand dispatcher for a single root command.
pub struct Dispatcher {
    root_name: String,
    handlers: Vec<Box<dyn Handler>>,
    fallback: Box<dyn RootFallback>,
    instrumentation: Arc<dyn Instrumentation>,
    config: DispatchConfig,
}

impl Dispatcher {
    /// An empty dispatcher with the usage fallback and tracing instrumentation.
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            root_name: String::new(),
            handlers: Vec::new(),
            fallback: Box::new(UsageFallback),
            instrumentation: Arc::new(TracingInstrumentation::new(config.clone())),
            config,
        }
    }

    /// Builder: set the root command name
    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }

    /// Builder: replace the root fallback
    pub fn with_root_fallback(mut self, fallback: impl RootFallback + 'static) -> Self {
        self.fallback = Box::new(fallback);
        self
    }

    /// Builder: replace the instrumentation sink
    pub fn with_instrumentation(mut self, instrumentation: Arc<dyn Instrumentation>) -> Self {
        self.instrumentation = instrumentation;
        self
    }

    /// Register a handler. Registration order is kept for iteration and
    /// completion output.
    pub fn add_handler(&mut self, handler: impl Handler + 'static) -> &mut Self {
        self.add_boxed_handler(Box::new(handler))
    }

    pub fn add_boxed_handler(&mut self, handler: Box<dyn Handler>) -> &mut Self {
        if handler.name().is_empty() {
            self.instrumentation.on_warning(&format!(
                "Handler with an empty name registered under '{}'",
                self.root_name
            ));
        }
        self.note_shadowing(handler.as_ref());
        self.handlers.push(handler);
        self
    }

    /// Register several handlers at once, in order.
    pub fn add_handlers<I>(&mut self, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = Box<dyn Handler>>,
    {
        for handler in handlers {
            self.add_boxed_handler(handler);
        }
        self
    }

    // Earlier registrations win; a clash is legal but worth a debug line.
    fn note_shadowing(&self, incoming: &dyn Handler) {
        let selectors = std::iter::once(incoming.name()).chain(incoming.aliases().iter().copied());
        for selector in selectors {
            if let Some(existing) = self.resolve(selector) {
                self.instrumentation.log_if_debug(&format!(
                    "'{selector}' of handler '{}' is already taken by '{}'; the earlier handler wins",
                    incoming.name(),
                    existing.name()
                ));
            }
        }
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Registered handlers in registration order.
    pub fn handlers(&self) -> impl Iterator<Item = &dyn Handler> {
        self.handlers.iter().map(AsRef::as_ref)
    }

    pub(crate) fn instrumentation(&self) -> &dyn Instrumentation {
        self.instrumentation.as_ref()
    }

    /// Fails when the dispatcher cannot be bound to a host.
    pub fn validate(&self) -> Result<()> {
        if self.root_name.trim().is_empty() {
            return Err(DispatchError::EmptyRootName);
        }
        Ok(())
    }

    /// First handler whose name or alias equals `selector`, ignoring case.
    pub fn resolve(&self, selector: &str) -> Option<&dyn Handler> {
        self.handlers().find(|handler| selects(*handler, selector))
    }

    /// Evaluate the gate in its fixed order: enabled, permission, context.
    pub fn check_preconditions(&self, handler: &dyn Handler, invoker: &dyn Invoker) -> Gate {
        if !handler.is_enabled() {
            return Gate::Disabled;
        }
        if handler.requires_permission()
            && !invoker.has_permission(&self.config.qualified_permission(handler.permission_key()))
        {
            return Gate::Unauthorized;
        }
        if !handler.allow_console_invocation() && invoker.is_console_like() {
            return Gate::ContextRejected;
        }
        Gate::Allowed
    }

    /// Route an invocation. Returns the boolean a host expects: whether the
    /// invocation was handled.
    pub fn dispatch(&self, invoker: &dyn Invoker, args: &[String]) -> bool {
        self.dispatch_with_outcome(invoker, args).handled
    }

    /// [`Dispatcher::dispatch`], reporting where the call was routed.
    ///
    /// A panicking handler is recovered here and reported as a failure, but
    /// the process panic hook still runs first. With the default hook that
    /// means a `thread '...' panicked at` line on stderr; hosts that want the
    /// message elsewhere install their own hook with [`std::panic::set_hook`].
    pub fn dispatch_with_outcome(&self, invoker: &dyn Invoker, args: &[String]) -> DispatchOutcome {
        let root_name = self.root_name.as_str();
        self.instrumentation.on_execution_start(root_name, invoker);
        let timer = ExecutionTimer::start(format!("dispatch /{root_name}"));

        let route = Cell::new(Route::RootFallback);
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.route(invoker, args, &route)))
            .unwrap_or_else(|payload| Err(HandlerPanic::from_payload(payload.as_ref()).into()));

        let outcome = match result {
            Ok(handled) => DispatchOutcome {
                route: route.get(),
                handled,
                failed: false,
            },
            Err(error) => {
                self.report_failure(invoker, &error);
                DispatchOutcome {
                    route: route.get(),
                    handled: true,
                    failed: true,
                }
            }
        };

        self.instrumentation
            .on_execution_end(root_name, invoker, timer.elapsed_ms());
        outcome
    }

    fn route(&self, invoker: &dyn Invoker, args: &[String], route: &Cell<Route>) -> HandlerResult {
        let Some(selector) = args.first() else {
            self.instrumentation
                .log_if_debug(&format!("/{} called without arguments", self.root_name));
            return self.fallback.execute(&self.root_name, invoker, args);
        };

        let Some(handler) = self.resolve(selector) else {
            self.instrumentation.log_if_debug(&format!(
                "/{} has no handler for '{selector}', using root fallback",
                self.root_name
            ));
            return self.fallback.execute(&self.root_name, invoker, args);
        };

        let gate = self.check_preconditions(handler, invoker);
        route.set(gate.into());
        self.instrumentation.log_if_debug(&format!(
            "/{} {selector} resolved to '{}': {gate:?}",
            self.root_name,
            handler.name()
        ));

        match gate {
            Gate::Disabled => {
                invoker.send_message(handler.disabled_message());
                Ok(true)
            }
            Gate::Unauthorized => {
                invoker.send_message(NO_PERMISSION_MESSAGE);
                Ok(true)
            }
            Gate::ContextRejected => {
                invoker.send_message(CONSOLE_REJECTED_MESSAGE);
                Ok(true)
            }
            Gate::Allowed => handler.execute(invoker, args),
        }
    }

    fn report_failure(&self, invoker: &dyn Invoker, error: &anyhow::Error) {
        self.instrumentation.on_error(&self.root_name, invoker, error);

        if self.config.debug {
            invoker.send_message(&format!("{EXECUTION_FAILED_MESSAGE}: {error:#}"));
        } else {
            invoker.send_message(EXECUTION_FAILED_MESSAGE);
        }
    }

    /// Suggestions for the last token of a partially typed invocation.
    ///
    /// - no arguments: nothing
    /// - one argument: handler names starting with it, then the root
    ///   fallback's suggestions (plain concatenation)
    /// - more: the selected handler's candidates, or the root fallback's
    ///   suggestions when nothing is selected
    pub fn complete(&self, invoker: &dyn Invoker, args: &[String]) -> Vec<String> {
        match args {
            [] => Vec::new(),
            [selector] => {
                let names: Vec<&str> = self.handlers().map(|handler| handler.name()).collect();
                let mut suggestions = filter_by_prefix(&names, Some(selector.as_str()));
                suggestions.extend(self.fallback.completions(invoker, args));
                suggestions
            }
            [selector, ..] => match self.resolve(selector) {
                Some(handler) => handler
                    .completion_candidates(invoker, args)
                    .unwrap_or_default(),
                None => self.fallback.completions(invoker, args),
            },
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.handlers().map(|handler| handler.name()).collect();
        f.debug_struct("Dispatcher")
            .field("root_name", &self.root_name)
            .field("handlers", &names)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
