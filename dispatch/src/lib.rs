//! Subcommand dispatch for hosted command lines.
//!
//! A host hands over a root command invocation (`econ pay bob 10`) together
//! with an [`Invoker`]. The [`Dispatcher`] picks the handler named by the
//! first argument, runs the enabled/permission/console gate, executes it or
//! falls back to the root behavior, and reports timing and failures through
//! an [`Instrumentation`] sink. [`Dispatcher::complete`] produces completion
//! candidates for partially typed input.
//!
//! ```
//! use std::sync::Arc;
//! use cmdkit_dispatch::{
//!     DispatchConfig, Dispatcher, Handler, HandlerResult, Invoker, NoopInstrumentation,
//! };
//!
//! struct Balance;
//!
//! impl Handler for Balance {
//!     fn name(&self) -> &str {
//!         "balance"
//!     }
//!
//!     fn aliases(&self) -> &[&str] {
//!         &["bal"]
//!     }
//!
//!     fn allow_console_invocation(&self) -> bool {
//!         true
//!     }
//!
//!     fn execute(&self, invoker: &dyn Invoker, _args: &[String]) -> HandlerResult {
//!         invoker.send_message("balance: 0");
//!         Ok(true)
//!     }
//! }
//!
//! let mut dispatcher = Dispatcher::new(DispatchConfig::default())
//!     .with_root_name("econ")
//!     .with_instrumentation(Arc::new(NoopInstrumentation));
//! dispatcher.add_handler(Balance);
//! assert_eq!(dispatcher.resolve("BAL").map(|h| h.name()), Some("balance"));
//! ```

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod activation;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod instrumentation;
pub mod invoker;
pub mod prefix;
pub mod root;
pub mod timing;

pub use activation::{Activation, CommandHost};
pub use config::{ConfigLoader, DispatchConfig};
pub use dispatcher::{
    CONSOLE_REJECTED_MESSAGE, DispatchOutcome, Dispatcher, EXECUTION_FAILED_MESSAGE, Gate,
    NO_PERMISSION_MESSAGE, Route,
};
pub use error::{DispatchError, HandlerPanic, Result};
pub use handler::{DEFAULT_DISABLED_MESSAGE, Handler, HandlerResult};
pub use instrumentation::{Instrumentation, NoopInstrumentation, TracingInstrumentation};
pub use invoker::{Invoker, InvokerKind};
pub use prefix::filter_by_prefix;
pub use root::{RootFallback, UsageFallback, usage_message};
