//! YAML configuration loading for jeedom-status
//!
//! The configuration file holds the same settings as the command line, so a
//! status bar entry can run the tool without flags. Two custom tags keep the
//! API key out of the file itself:
//!
//! - `!secret key` - Substitute from `secrets.yaml` next to the config file
//! - `!env_var VAR` - Environment variable substitution
//!
//! # Example
//!
//! ```ignore
//! use jeedom_config::FileConfig;
//!
//! // Default location, skipped when absent
//! let config = FileConfig::discover(None)?;
//!
//! // Explicit location, must exist
//! let config = FileConfig::discover(Some(Path::new("/etc/jeedom-status.yaml")))?;
//! ```

mod error;
mod file_config;
mod loader;
mod secrets;

pub use error::{ConfigError, ConfigResult};
pub use file_config::{default_config_path, FileConfig, CONFIG_FILE_NAME};
pub use loader::{load_yaml, YamlLoader};
pub use secrets::{Secrets, SECRETS_FILE_NAME};
