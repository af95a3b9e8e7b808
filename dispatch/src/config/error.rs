use std::path::PathBuf;
use thiserror::Error;

/// Why a [`DispatchConfig`](crate::config::DispatchConfig) could not be built.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested file is missing. Discovered files are only
    /// used when they exist.
    #[error("cmdkit config file {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    /// A layer (file or `CMDKIT_*` variable) could not be read or did not
    /// deserialize into dispatcher settings.
    #[error("cannot read dispatcher settings: {0}")]
    Source(#[from] config::ConfigError),

    #[error("cannot encode built-in dispatcher defaults: {0}")]
    Defaults(#[from] serde_json::Error),

    /// Settings loaded but unusable; every problem is listed.
    #[error("invalid dispatcher settings {}", list_problems(.problems))]
    Invalid { problems: Vec<String> },
}

fn list_problems(problems: &[String]) -> String {
    let noun = if problems.len() == 1 { "problem" } else { "problems" };
    format!("({} {noun}):\n  - {}", problems.len(), problems.join("\n  - "))
}

impl ConfigError {
    /// Validation problems, empty for every other kind of failure.
    pub fn problems(&self) -> &[String] {
        match self {
            ConfigError::Invalid { problems } => problems,
            _ => &[],
        }
    }
}

/// Type alias for Results using ConfigError
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_problem() {
        let err = ConfigError::Invalid {
            problems: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "invalid dispatcher settings (2 problems):\n  - first\n  - second"
        );
        assert_eq!(err.problems().len(), 2);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ConfigError::FileNotFound(PathBuf::from("/etc/cmdkit.toml"));
        assert_eq!(
            err.to_string(),
            "cmdkit config file /etc/cmdkit.toml does not exist"
        );
        assert!(err.problems().is_empty());
    }
}
