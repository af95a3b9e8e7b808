//! `cmdkit`: a small host that binds the demo `econ` dispatcher and drives it
//! from the command line.
//!
//! ## Commands
//!
//! - `cmdkit exec [--console | --as NAME] [--grant KEY]... -- <line...>`
//! - `cmdkit complete [--console | --as NAME] [--grant KEY]... -- <line...>`
//! - `cmdkit list`
//!
//! ## Exit codes
//!
//! - 0: handled
//! - 1: the dispatcher reported the line as not handled
//! - 2: no such root command

pub mod econ;
pub mod host;
pub mod session;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use cmdkit_dispatch::{ConfigLoader, DispatchConfig};

pub use econ::{Ledger, ROOT, econ_dispatcher};
pub use host::CommandTable;
pub use session::SessionInvoker;

/// Route command lines through a cmdkit dispatcher
#[derive(Debug, Parser)]
#[command(name = "cmdkit", version, about)]
pub struct Cli {
    /// Configuration file (defaults to ./cmdkit.toml, then the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose logging and error details in failure notices
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Execute a command line and print the messages it produced
    Exec(LineArgs),

    /// Print completion candidates for the last token, one per line
    Complete(LineArgs),

    /// List the subcommands of every bound root command
    List,
}

/// Who runs the line, and the line itself
#[derive(Debug, Args)]
pub struct LineArgs {
    /// Run as the server console
    #[arg(long, conflicts_with = "player")]
    pub console: bool,

    /// Run as this player
    #[arg(long = "as", value_name = "NAME", default_value = "alex")]
    pub player: String,

    /// Grant a permission key to the session (repeatable)
    #[arg(long = "grant", value_name = "KEY")]
    pub grants: Vec<String>,

    /// Root command and arguments, e.g. `econ pay bob 10`
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub line: Vec<String>,
}

impl LineArgs {
    fn invoker(&self) -> SessionInvoker {
        let invoker = if self.console {
            SessionInvoker::console()
        } else {
            SessionInvoker::player(self.player.clone())
        };
        invoker.with_grants(self.grants.iter().cloned())
    }
}

/// Load the layered configuration; `--debug` forces debug mode on.
pub fn load_config(path: Option<&Path>, debug: bool) -> anyhow::Result<DispatchConfig> {
    let config = match path {
        Some(path) => ConfigLoader::new()
            .with_file(path)
            .load()
            .with_context(|| format!("loading {}", path.display()))?,
        None => ConfigLoader::load_default()?,
    };
    Ok(if debug { config.with_debug(true) } else { config })
}

/// Send panic reports through `tracing` instead of straight to stderr.
///
/// Dispatchers recover handler panics, but the hook runs before recovery, so
/// without this every caught panic still prints the default report.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("handler {info}");
    }));
}

/// A host with the demo `econ` command declared and bound.
pub fn demo_table(config: DispatchConfig) -> anyhow::Result<CommandTable> {
    let mut table = CommandTable::new();
    table.declare(ROOT);
    econ_dispatcher(config, Arc::new(Ledger::seeded())).activate(&mut table)?;
    Ok(table)
}

impl Cli {
    /// Run the selected command and return the process exit code.
    pub fn run(self) -> anyhow::Result<i32> {
        let config = load_config(self.config.as_deref(), self.debug)?;
        tracing::debug!(?config, "configuration loaded");
        let table = demo_table(config)?;

        match self.command {
            CliCommand::Exec(args) => Ok(run_exec(&table, &args)),
            CliCommand::Complete(args) => {
                let invoker = args.invoker();
                for candidate in table.complete_tokens(&args.line, &invoker) {
                    println!("{candidate}");
                }
                Ok(0)
            }
            CliCommand::List => {
                run_list(&table);
                Ok(0)
            }
        }
    }
}

fn run_exec(table: &CommandTable, args: &LineArgs) -> i32 {
    let invoker = args.invoker();
    let handled = table.execute_tokens(&args.line, &invoker);
    for message in invoker.take_messages() {
        println!("{message}");
    }
    match handled {
        Some(true) => 0,
        Some(false) => 1,
        None => {
            let root = args.line.first().map(String::as_str).unwrap_or_default();
            eprintln!("Unknown command: {root}");
            2
        }
    }
}

fn run_list(table: &CommandTable) {
    for root in table.commands() {
        let Some(dispatcher) = table.dispatcher(root) else {
            continue;
        };
        println!("/{root}");
        for handler in dispatcher.handlers() {
            let aliases = if handler.aliases().is_empty() {
                String::new()
            } else {
                format!(" ({})", handler.aliases().join(", "))
            };
            let status = if handler.is_enabled() { "" } else { " [disabled]" };
            let permission = if handler.requires_permission() {
                let key = dispatcher
                    .config()
                    .qualified_permission(handler.permission_key());
                format!(" [permission: {key}]")
            } else {
                String::new()
            };
            println!(
                "  {}{aliases}{status}{permission}  {}",
                handler.name(),
                handler.description()
            );
        }
    }
}
