use crate::config::error::{ConfigError, Result};
use crate::config::loader::DispatchConfig;

/// Check a loaded configuration for values the dispatcher cannot use.
///
/// Collects every problem into one error so a bad file is fixed in a single
/// pass. `log_performance` without `log_execution` is allowed but has no
/// effect, so it only produces a warning.
pub fn validate(config: &DispatchConfig) -> Result<()> {
    let mut problems = Vec::new();

    if let Some(namespace) = config.permission_namespace.as_deref() {
        if namespace.trim().is_empty() {
            problems.push("permission_namespace must not be empty when set".to_string());
        } else {
            if namespace.ends_with('.') || namespace.starts_with('.') {
                problems.push(format!(
                    "permission_namespace '{namespace}' must not start or end with '.'"
                ));
            }
            if namespace.chars().any(char::is_whitespace) {
                problems.push(format!(
                    "permission_namespace '{namespace}' must not contain whitespace"
                ));
            }
        }
    }

    if config.log_performance && !config.log_execution {
        tracing::warn!("log_performance has no effect while log_execution is disabled");
    }

    if problems.is_empty() {
        return Ok(());
    }

    Err(ConfigError::Invalid { problems })
}
