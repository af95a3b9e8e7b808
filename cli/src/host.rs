//! In-memory command table that dispatchers bind into.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use anyhow::{Context, Result};
use cmdkit_dispatch::{CommandHost, Dispatcher, Invoker, filter_by_prefix};

/// Root commands known to the host and the dispatchers bound to them.
///
/// Lines are split shell-style, so `econ pay "bob smith" 10` yields four
/// tokens. A leading `/` on the root token is ignored.
#[derive(Debug, Default)]
pub struct CommandTable {
    declared: BTreeSet<String>,
    bound: BTreeMap<String, Arc<Dispatcher>>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `name` a known root command. Only declared names can be bound.
    pub fn declare(&mut self, name: impl Into<String>) -> &mut Self {
        self.declared.insert(name.into());
        self
    }

    pub fn dispatcher(&self, name: &str) -> Option<&Arc<Dispatcher>> {
        self.bound.get(name)
    }

    /// Bound root names in sorted order.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.bound.keys().map(String::as_str)
    }

    /// Run a raw command line. `None` when the root is not bound.
    pub fn execute(&self, line: &str, invoker: &dyn Invoker) -> Result<Option<bool>> {
        let tokens = split_line(line)?;
        Ok(self.execute_tokens(&tokens, invoker))
    }

    /// Run an already split command line.
    pub fn execute_tokens(&self, tokens: &[String], invoker: &dyn Invoker) -> Option<bool> {
        let (root, args) = tokens.split_first()?;
        let dispatcher = self.bound.get(root_name(root))?;
        Some(dispatcher.dispatch(invoker, args))
    }

    /// Completions for a raw line. A trailing space starts a new, empty token.
    pub fn complete(&self, line: &str, invoker: &dyn Invoker) -> Result<Vec<String>> {
        let mut tokens = split_line(line)?;
        if line.ends_with(char::is_whitespace) {
            tokens.push(String::new());
        }
        Ok(self.complete_tokens(&tokens, invoker))
    }

    /// Completions for split tokens; the last token is the one being typed.
    pub fn complete_tokens(&self, tokens: &[String], invoker: &dyn Invoker) -> Vec<String> {
        match tokens {
            [] => Vec::new(),
            [root] => {
                let names: Vec<&str> = self.commands().collect();
                filter_by_prefix(&names, Some(root_name(root)))
            }
            [root, args @ ..] => self
                .bound
                .get(root_name(root))
                .map(|dispatcher| dispatcher.complete(invoker, args))
                .unwrap_or_default(),
        }
    }
}

impl CommandHost for CommandTable {
    fn has_command(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    fn bind(&mut self, name: &str, dispatcher: Arc<Dispatcher>) {
        tracing::debug!("binding /{name}");
        self.bound.insert(name.to_string(), dispatcher);
    }
}

fn root_name(token: &str) -> &str {
    token.strip_prefix('/').unwrap_or(token)
}

fn split_line(line: &str) -> Result<Vec<String>> {
    shlex::split(line).with_context(|| format!("unbalanced quotes in command line: {line}"))
}
