/// Dispatcher configuration
///
/// Layered the 12-factor way:
/// 1. Defaults (from code)
/// 2. Config file (cmdkit.toml)
/// 3. Environment variables (CMDKIT_* prefix)
///
/// # Example
///
/// ```no_run
/// use cmdkit_dispatch::config::ConfigLoader;
///
/// let config = ConfigLoader::load_default()?;
///
/// let config = ConfigLoader::new()
///     .with_file("./cmdkit.toml")
///     .load()?;
/// # Ok::<(), cmdkit_dispatch::config::ConfigError>(())
/// ```
pub mod error;
pub mod loader;
pub mod validator;

pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, DispatchConfig};
pub use validator::validate;
