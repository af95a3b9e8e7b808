//! Execution events emitted around every dispatch.
//!
//! The dispatcher owns no log storage or formatting. It reports to an
//! [`Instrumentation`] sink; [`TracingInstrumentation`] forwards to `tracing`
//! and [`NoopInstrumentation`] drops everything.

use crate::config::DispatchConfig;
use crate::invoker::Invoker;

/// Sink for dispatch events.
///
/// `on_execution_start` and `on_execution_end` are called exactly once per
/// dispatch, whatever the outcome.
pub trait Instrumentation: Send + Sync {
    fn on_execution_start(&self, root_name: &str, invoker: &dyn Invoker);

    fn on_execution_end(&self, root_name: &str, invoker: &dyn Invoker, elapsed_ms: u64);

    /// A handler or the root fallback failed. Called at most once per
    /// dispatch.
    fn on_error(&self, root_name: &str, invoker: &dyn Invoker, error: &anyhow::Error);

    fn log_if_debug(&self, message: &str);

    fn on_warning(&self, _message: &str) {}

    fn on_info(&self, _message: &str) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInstrumentation;

impl Instrumentation for NoopInstrumentation {
    fn on_execution_start(&self, _root_name: &str, _invoker: &dyn Invoker) {}

    fn on_execution_end(&self, _root_name: &str, _invoker: &dyn Invoker, _elapsed_ms: u64) {}

    fn on_error(&self, _root_name: &str, _invoker: &dyn Invoker, _error: &anyhow::Error) {}

    fn log_if_debug(&self, _message: &str) {}
}

/// Forwards events to `tracing`, filtered by [`DispatchConfig`].
///
/// - execution: `info`, only with `log_execution`
/// - elapsed time: `info`, only with `log_execution` and `log_performance`
/// - errors: `error`; the full error chain is added in debug mode
/// - debug lines: `debug`, only in debug mode
#[derive(Debug, Clone, Default)]
pub struct TracingInstrumentation {
    config: DispatchConfig,
}

impl TracingInstrumentation {
    pub fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }
}

impl Instrumentation for TracingInstrumentation {
    fn on_execution_start(&self, root_name: &str, invoker: &dyn Invoker) {
        if self.config.debug {
            tracing::debug!(
                command = root_name,
                invoker = invoker.name(),
                "[cmdkit:debug] dispatch started"
            );
        }
    }

    fn on_execution_end(&self, root_name: &str, invoker: &dyn Invoker, elapsed_ms: u64) {
        if !self.config.log_execution {
            return;
        }

        tracing::info!(
            command = root_name,
            invoker = invoker.name(),
            kind = invoker.kind().as_str(),
            "[cmdkit] /{root_name} executed by {} ({})",
            invoker.name(),
            invoker.kind()
        );

        if self.config.logs_performance() {
            tracing::info!(
                command = root_name,
                elapsed_ms,
                "[cmdkit] Execution time: {elapsed_ms} ms"
            );
        }
    }

    fn on_error(&self, root_name: &str, invoker: &dyn Invoker, error: &anyhow::Error) {
        tracing::error!(
            command = root_name,
            invoker = invoker.name(),
            "[cmdkit] Error executing command /{root_name} by {}",
            invoker.name()
        );

        if self.config.debug {
            tracing::error!(command = root_name, "{error:?}");
        }
    }

    fn log_if_debug(&self, message: &str) {
        if self.config.debug {
            tracing::debug!("[cmdkit:debug] {message}");
        }
    }

    fn on_warning(&self, message: &str) {
        tracing::warn!("[cmdkit] {message}");
    }

    fn on_info(&self, message: &str) {
        tracing::info!("[cmdkit] {message}");
    }
}
