//! Shared fixtures: a recording invoker, a recording instrumentation sink and
//! a configurable handler.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cmdkit_dispatch::{
    DispatchConfig, Dispatcher, Handler, HandlerResult, Instrumentation, Invoker, InvokerKind,
};

pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(ToString::to_string).collect()
}

pub struct RecordingInvoker {
    name: String,
    kind: InvokerKind,
    granted: Vec<String>,
    inbox: Mutex<Vec<String>>,
}

impl RecordingInvoker {
    pub fn console(granted: &[&str]) -> Self {
        Self::new("CONSOLE", InvokerKind::Console, granted)
    }

    pub fn player(name: &str, granted: &[&str]) -> Self {
        Self::new(name, InvokerKind::Player, granted)
    }

    pub fn new(name: &str, kind: InvokerKind, granted: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind,
            granted: granted.iter().map(ToString::to_string).collect(),
            inbox: Mutex::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.inbox.lock().unwrap().clone()
    }
}

impl Invoker for RecordingInvoker {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> InvokerKind {
        self.kind
    }

    fn has_permission(&self, key: &str) -> bool {
        self.granted.iter().any(|granted| granted == key)
    }

    fn send_message(&self, message: &str) {
        self.inbox.lock().unwrap().push(message.to_string());
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Start { root: String, invoker: String },
    End { root: String, invoker: String },
    Error { root: String, message: String },
    Debug(String),
    Warning(String),
    Info(String),
}

#[derive(Default)]
pub struct RecordingInstrumentation {
    events: Mutex<Vec<Event>>,
}

impl RecordingInstrumentation {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|event| matches(event)).count()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Instrumentation for RecordingInstrumentation {
    fn on_execution_start(&self, root_name: &str, invoker: &dyn Invoker) {
        self.push(Event::Start {
            root: root_name.to_string(),
            invoker: invoker.name().to_string(),
        });
    }

    fn on_execution_end(&self, root_name: &str, invoker: &dyn Invoker, _elapsed_ms: u64) {
        self.push(Event::End {
            root: root_name.to_string(),
            invoker: invoker.name().to_string(),
        });
    }

    fn on_error(&self, root_name: &str, _invoker: &dyn Invoker, error: &anyhow::Error) {
        self.push(Event::Error {
            root: root_name.to_string(),
            message: format!("{error:#}"),
        });
    }

    fn log_if_debug(&self, message: &str) {
        self.push(Event::Debug(message.to_string()));
    }

    fn on_warning(&self, message: &str) {
        self.push(Event::Warning(message.to_string()));
    }

    fn on_info(&self, message: &str) {
        self.push(Event::Info(message.to_string()));
    }
}

pub enum Behavior {
    Succeed(bool),
    Fail(&'static str),
    Panic(&'static str),
}

/// Handler whose flags and behavior are plain fields.
pub struct StubHandler {
    pub name: &'static str,
    pub aliases: Vec<&'static str>,
    pub permission: Option<&'static str>,
    pub enabled: Arc<AtomicBool>,
    pub console: bool,
    pub disabled_message: &'static str,
    pub behavior: Behavior,
    pub completions: Option<Vec<&'static str>>,
    pub calls: Arc<AtomicUsize>,
    pub seen_args: Arc<Mutex<Vec<Vec<String>>>>,
}

impl StubHandler {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            aliases: Vec::new(),
            permission: None,
            enabled: Arc::new(AtomicBool::new(true)),
            console: false,
            disabled_message: "This feature is disabled.",
            behavior: Behavior::Succeed(true),
            completions: None,
            calls: Arc::new(AtomicUsize::new(0)),
            seen_args: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn aliases(mut self, aliases: &[&'static str]) -> Self {
        self.aliases = aliases.to_vec();
        self
    }

    pub fn permission(mut self, key: &'static str) -> Self {
        self.permission = Some(key);
        self
    }

    pub fn disabled(self) -> Self {
        self.enabled.store(false, Ordering::SeqCst);
        self
    }

    pub fn console(mut self) -> Self {
        self.console = true;
        self
    }

    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn completions(mut self, completions: Option<Vec<&'static str>>) -> Self {
        self.completions = completions;
        self
    }

    pub fn call_count(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Handler for StubHandler {
    fn name(&self) -> &str {
        self.name
    }

    fn aliases(&self) -> &[&str] {
        &self.aliases
    }

    fn permission_key(&self) -> &str {
        self.permission.unwrap_or_default()
    }

    fn requires_permission(&self) -> bool {
        self.permission.is_some()
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn disabled_message(&self) -> &str {
        self.disabled_message
    }

    fn allow_console_invocation(&self) -> bool {
        self.console
    }

    fn execute(&self, invoker: &dyn Invoker, args: &[String]) -> HandlerResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_args.lock().unwrap().push(args.to_vec());
        match self.behavior {
            Behavior::Succeed(handled) => {
                invoker.send_message(&format!("{} ran", self.name));
                Ok(handled)
            }
            Behavior::Fail(reason) => Err(anyhow::anyhow!(reason)),
            Behavior::Panic(reason) => panic!("{reason}"),
        }
    }

    fn completion_candidates(&self, _invoker: &dyn Invoker, _args: &[String]) -> Option<Vec<String>> {
        self.completions
            .as_ref()
            .map(|list| list.iter().map(ToString::to_string).collect())
    }
}

pub fn econ(config: DispatchConfig) -> (Dispatcher, Arc<RecordingInstrumentation>) {
    let recorder = Arc::new(RecordingInstrumentation::default());
    let dispatcher = Dispatcher::new(config)
        .with_root_name("econ")
        .with_instrumentation(recorder.clone());
    (dispatcher, recorder)
}
