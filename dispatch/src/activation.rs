//! Binding a finished dispatcher into a host's command table.

use std::sync::Arc;

use crate::dispatcher::Dispatcher;
use crate::error::Result;

/// The host side of activation: a table of known root commands.
pub trait CommandHost {
    /// Whether the host declares a root command called `name`.
    fn has_command(&self, name: &str) -> bool;

    /// Make `dispatcher` the execute and complete target for `name`.
    fn bind(&mut self, name: &str, dispatcher: Arc<Dispatcher>);
}

/// Result of [`Dispatcher::activate`].
#[derive(Debug, Clone)]
pub struct Activation {
    pub dispatcher: Arc<Dispatcher>,
    /// False when the host did not know the root name and nothing was bound.
    pub bound: bool,
}

impl Dispatcher {
    /// Freeze the handler table and bind it to `host`.
    ///
    /// An empty root name is a configuration error. A root name the host does
    /// not declare only produces a warning; the returned dispatcher is still
    /// usable directly.
    pub fn activate<H>(self, host: &mut H) -> Result<Activation>
    where
        H: CommandHost + ?Sized,
    {
        self.validate()?;

        let name = self.root_name().to_string();
        let dispatcher = Arc::new(self);

        if !host.has_command(&name) {
            dispatcher
                .instrumentation()
                .on_warning(&format!("Command '{name}' is not declared by the host"));
            return Ok(Activation {
                dispatcher,
                bound: false,
            });
        }

        host.bind(&name, Arc::clone(&dispatcher));
        dispatcher
            .instrumentation()
            .on_info(&format!("Registered command: {name}"));

        Ok(Activation {
            dispatcher,
            bound: true,
        })
    }
}
