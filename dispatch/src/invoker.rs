//! The actor issuing an invocation, as seen by the dispatcher.

use serde::{Deserialize, Serialize};

/// What sort of actor is behind an invocation. Used for log text and as the
/// default console check.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvokerKind {
    /// Server console or another non-interactive operator context
    Console,
    /// Interactive user
    Player,
    /// Remote admin connection (RCON and similar)
    Remote,
    /// Automation embedded in the host (command blocks, schedulers)
    Block,
    Other,
}

impl InvokerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InvokerKind::Console => "console",
            InvokerKind::Player => "player",
            InvokerKind::Remote => "remote",
            InvokerKind::Block => "block",
            InvokerKind::Other => "other",
        }
    }
}

impl std::fmt::Display for InvokerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity supplied by the host for each invocation.
///
/// The dispatcher consults only the permission and console predicates, and
/// uses `send_message` for rejection notices. `name` and `kind` appear in log
/// text only.
pub trait Invoker: Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> InvokerKind;

    fn has_permission(&self, key: &str) -> bool;

    /// Whether this invocation comes from a context that interactive-only
    /// handlers must refuse.
    fn is_console_like(&self) -> bool {
        self.kind() != InvokerKind::Player
    }

    fn send_message(&self, message: &str);
}
