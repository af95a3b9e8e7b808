//! Invoker for a single command line session.

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use cmdkit_dispatch::{Invoker, InvokerKind};

/// Display name used for console sessions
pub const CONSOLE_NAME: &str = "CONSOLE";

/// A console or player session with a fixed set of granted permissions.
///
/// Messages sent by handlers are buffered until [`SessionInvoker::take_messages`].
#[derive(Debug)]
pub struct SessionInvoker {
    name: String,
    kind: InvokerKind,
    granted: BTreeSet<String>,
    outbox: Mutex<Vec<String>>,
}

impl SessionInvoker {
    pub fn console() -> Self {
        Self::new(CONSOLE_NAME, InvokerKind::Console)
    }

    pub fn player(name: impl Into<String>) -> Self {
        Self::new(name, InvokerKind::Player)
    }

    fn new(name: impl Into<String>, kind: InvokerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            granted: BTreeSet::new(),
            outbox: Mutex::new(Vec::new()),
        }
    }

    /// Builder: grant permission keys
    pub fn with_grants<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.granted.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Drain buffered messages in the order they were sent.
    pub fn take_messages(&self) -> Vec<String> {
        std::mem::take(&mut *self.outbox.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Invoker for SessionInvoker {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> InvokerKind {
        self.kind
    }

    fn has_permission(&self, key: &str) -> bool {
        self.granted.contains(key)
    }

    fn send_message(&self, message: &str) {
        tracing::trace!(invoker = %self.name, "message: {message}");
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
