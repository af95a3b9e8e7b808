//! Demo `econ` root command backed by an in-memory ledger.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result, bail};
use cmdkit_dispatch::{
    DispatchConfig, Dispatcher, Handler, HandlerResult, Invoker, RootFallback, filter_by_prefix,
    usage_message,
};

pub const ROOT: &str = "econ";

/// Player balances. Every account holder counts as online.
#[derive(Debug, Default)]
pub struct Ledger {
    balances: Mutex<BTreeMap<String, u64>>,
}

impl Ledger {
    /// alex 100, bob 50, carol 0
    pub fn seeded() -> Self {
        let ledger = Self::default();
        {
            let mut balances = ledger.balances();
            balances.insert("alex".to_string(), 100);
            balances.insert("bob".to_string(), 50);
            balances.insert("carol".to_string(), 0);
        }
        ledger
    }

    pub fn balance(&self, player: &str) -> Option<u64> {
        self.balances().get(player).copied()
    }

    pub fn players(&self) -> Vec<String> {
        self.balances().keys().cloned().collect()
    }

    fn transfer(&self, from: &str, to: &str, amount: u64) -> Result<u64> {
        if from == to {
            bail!("cannot pay yourself");
        }
        let mut balances = self.balances();
        if !balances.contains_key(to) {
            bail!("unknown player '{to}'");
        }
        let available = balances.get(from).copied().unwrap_or_default();
        if available < amount {
            bail!("insufficient funds: {from} has {available}, needs {amount}");
        }
        let remaining = available - amount;
        balances.insert(from.to_string(), remaining);
        if let Some(target) = balances.get_mut(to) {
            *target = target.saturating_add(amount);
        }
        Ok(remaining)
    }

    fn mint(&self, to: &str, amount: u64) -> Result<u64> {
        let mut balances = self.balances();
        let Some(target) = balances.get_mut(to) else {
            bail!("unknown player '{to}'");
        };
        *target = target.saturating_add(amount);
        Ok(*target)
    }

    fn balances(&self) -> MutexGuard<'_, BTreeMap<String, u64>> {
        self.balances.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn parse_amount(raw: &str) -> Result<u64> {
    let amount: u64 = raw
        .parse()
        .with_context(|| format!("invalid amount '{raw}'"))?;
    if amount == 0 {
        bail!("amount must be positive");
    }
    Ok(amount)
}

fn complete_player(ledger: &Ledger, args: &[String]) -> Option<Vec<String>> {
    // args[0] is the subcommand itself
    match args {
        [_, typed] => Some(filter_by_prefix(&ledger.players(), Some(typed.as_str()))),
        _ => Some(Vec::new()),
    }
}

/// `econ pay <player> <amount>`: move money from the invoking player.
pub struct Pay {
    ledger: Arc<Ledger>,
}

impl Handler for Pay {
    fn name(&self) -> &str {
        "pay"
    }

    fn aliases(&self) -> &[&str] {
        &["p"]
    }

    fn description(&self) -> &str {
        "Send money to another player"
    }

    fn permission_key(&self) -> &str {
        "pay"
    }

    fn requires_permission(&self) -> bool {
        true
    }

    fn execute(&self, invoker: &dyn Invoker, args: &[String]) -> HandlerResult {
        let [_, target, amount] = args else {
            invoker.send_message("usage: econ pay <player> <amount>");
            return Ok(true);
        };
        let amount = parse_amount(amount)?;
        match self.ledger.transfer(invoker.name(), target, amount) {
            Ok(remaining) => {
                invoker.send_message(&format!("Paid {target} {amount}. Balance: {remaining}"));
            }
            Err(err) => invoker.send_message(&format!("Payment failed: {err}")),
        }
        Ok(true)
    }

    fn completion_candidates(&self, _invoker: &dyn Invoker, args: &[String]) -> Option<Vec<String>> {
        complete_player(&self.ledger, args)
    }
}

/// `econ balance [player]`
pub struct Balance {
    ledger: Arc<Ledger>,
}

impl Handler for Balance {
    fn name(&self) -> &str {
        "balance"
    }

    fn aliases(&self) -> &[&str] {
        &["bal"]
    }

    fn description(&self) -> &str {
        "Show a balance"
    }

    fn allow_console_invocation(&self) -> bool {
        true
    }

    fn execute(&self, invoker: &dyn Invoker, args: &[String]) -> HandlerResult {
        let player = match args.get(1) {
            Some(player) => player.as_str(),
            None if invoker.is_console_like() => {
                invoker.send_message("usage: econ balance <player>");
                return Ok(true);
            }
            None => invoker.name(),
        };
        match self.ledger.balance(player) {
            Some(balance) => invoker.send_message(&format!("{player}: {balance}")),
            None => invoker.send_message(&format!("Unknown player '{player}'")),
        }
        Ok(true)
    }

    fn completion_candidates(&self, _invoker: &dyn Invoker, args: &[String]) -> Option<Vec<String>> {
        complete_player(&self.ledger, args)
    }
}

/// `econ give <player> <amount>`: create money.
pub struct Give {
    ledger: Arc<Ledger>,
}

impl Handler for Give {
    fn name(&self) -> &str {
        "give"
    }

    fn aliases(&self) -> &[&str] {
        &["g"]
    }

    fn description(&self) -> &str {
        "Add money to a player's account"
    }

    fn permission_key(&self) -> &str {
        "give"
    }

    fn requires_permission(&self) -> bool {
        true
    }

    fn allow_console_invocation(&self) -> bool {
        true
    }

    fn execute(&self, invoker: &dyn Invoker, args: &[String]) -> HandlerResult {
        let [_, target, amount] = args else {
            invoker.send_message("usage: econ give <player> <amount>");
            return Ok(true);
        };
        let amount = parse_amount(amount)?;
        let balance = self.ledger.mint(target, amount)?;
        invoker.send_message(&format!("Gave {target} {amount}. Balance: {balance}"));
        Ok(true)
    }

    fn completion_candidates(&self, _invoker: &dyn Invoker, args: &[String]) -> Option<Vec<String>> {
        complete_player(&self.ledger, args)
    }
}

/// `econ reset`: switched off in this build.
pub struct Reset;

impl Handler for Reset {
    fn name(&self) -> &str {
        "reset"
    }

    fn description(&self) -> &str {
        "Reset all balances"
    }

    fn permission_key(&self) -> &str {
        "reset"
    }

    fn requires_permission(&self) -> bool {
        true
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn disabled_message(&self) -> &str {
        "Resetting balances is disabled."
    }

    fn allow_console_invocation(&self) -> bool {
        true
    }

    fn execute(&self, invoker: &dyn Invoker, _args: &[String]) -> HandlerResult {
        invoker.send_message("All balances reset.");
        Ok(true)
    }
}

/// Usage for the bare command, a subcommand summary for `econ help`.
pub struct EconFallback {
    summary: String,
}

impl RootFallback for EconFallback {
    fn execute(&self, root_name: &str, invoker: &dyn Invoker, args: &[String]) -> HandlerResult {
        if args.first().is_some_and(|arg| arg.eq_ignore_ascii_case("help")) {
            invoker.send_message(&self.summary);
        } else {
            invoker.send_message(&usage_message(root_name));
        }
        Ok(true)
    }

    fn completions(&self, _invoker: &dyn Invoker, args: &[String]) -> Vec<String> {
        match args {
            [typed] => filter_by_prefix(&["help"], Some(typed.as_str())),
            _ => Vec::new(),
        }
    }
}

/// The demo dispatcher: `pay`, `balance`, `give` and a disabled `reset`.
pub fn econ_dispatcher(config: DispatchConfig, ledger: Arc<Ledger>) -> Dispatcher {
    let handlers: Vec<Box<dyn Handler>> = vec![
        Box::new(Pay {
            ledger: Arc::clone(&ledger),
        }),
        Box::new(Balance {
            ledger: Arc::clone(&ledger),
        }),
        Box::new(Give { ledger }),
        Box::new(Reset),
    ];
    let names: Vec<&str> = handlers.iter().map(|handler| handler.name()).collect();
    let summary = format!("Subcommands: {}", names.join(", "));

    let mut dispatcher = Dispatcher::new(config)
        .with_root_name(ROOT)
        .with_root_fallback(EconFallback { summary });
    dispatcher.add_handlers(handlers);
    dispatcher
}
