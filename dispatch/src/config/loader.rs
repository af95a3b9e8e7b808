use crate::config::error::{ConfigError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Dispatcher and instrumentation settings.
///
/// Passed explicitly to [`crate::Dispatcher`] and
/// [`crate::TracingInstrumentation`]; nothing here is process-global.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Extra diagnostics: debug log lines, full error chains, and error text
    /// appended to the failure notice shown to the invoker
    #[serde(default)]
    pub debug: bool,

    /// Log every dispatch with the invoker's name and kind
    #[serde(default)]
    pub log_execution: bool,

    /// Log elapsed time per dispatch (only with `log_execution`)
    #[serde(default)]
    pub log_performance: bool,

    /// Namespace prepended to handler permission keys (`<ns>.<key>`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_namespace: Option<String>,
}

impl DispatchConfig {
    /// Builder: enable debug diagnostics
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Builder: enable execution logging, optionally with timings
    pub fn with_execution_logging(mut self, log_execution: bool, log_performance: bool) -> Self {
        self.log_execution = log_execution;
        self.log_performance = log_performance;
        self
    }

    /// Builder: set the permission namespace
    pub fn with_permission_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.permission_namespace = Some(namespace.into());
        self
    }

    /// The key checked against the invoker for a handler's permission.
    pub fn qualified_permission(&self, key: &str) -> String {
        match self.permission_namespace.as_deref() {
            Some(namespace) => format!("{namespace}.{key}"),
            None => key.to_string(),
        }
    }

    /// Whether elapsed time should be reported.
    pub fn logs_performance(&self) -> bool {
        self.log_execution && self.log_performance
    }
}

/// Configuration loader with layered merging support
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new ConfigLoader
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration with layered merging:
    /// 1. Start with defaults
    /// 2. Merge config file if provided
    /// 3. Override with environment variables (CMDKIT_ prefix)
    pub fn load(&self) -> Result<DispatchConfig> {
        let mut builder = Config::builder();

        let defaults_json = serde_json::to_string(&DispatchConfig::default())?;
        builder = builder.add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        if let Some(ref path) = self.config_path {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_ref()));
            } else {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
        }

        // Example: CMDKIT_LOG_EXECUTION=true
        builder = builder.add_source(
            Environment::with_prefix("CMDKIT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let dispatch_config: DispatchConfig = config.try_deserialize()?;

        crate::config::validator::validate(&dispatch_config)?;

        Ok(dispatch_config)
    }

    /// Locate the default config file in standard locations:
    /// 1. Current directory: ./cmdkit.toml
    /// 2. XDG config: ~/.config/cmdkit/config.toml
    /// 3. Home directory: ~/.cmdkit.toml
    pub fn find_config_file() -> Option<PathBuf> {
        let cwd_config = PathBuf::from("./cmdkit.toml");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("cmdkit").join("config.toml");
            if xdg_config.exists() {
                return Some(xdg_config);
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".cmdkit.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<DispatchConfig> {
        let loader = if let Some(config_path) = Self::find_config_file() {
            ConfigLoader::new().with_file(config_path)
        } else {
            ConfigLoader::new()
        };

        loader.load()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
