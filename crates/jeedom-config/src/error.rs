//! Error types for configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist
    #[error("configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read a file
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse YAML
    #[error("failed to parse YAML in {path}: {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Secret not found
    #[error("secret '{key}' not found in {path}")]
    SecretNotFound { key: String, path: PathBuf },

    /// Environment variable not found
    #[error("environment variable '{var}' not set")]
    EnvVarNotFound { var: String },

    /// Tag other than `!secret` and `!env_var`
    #[error("unsupported tag '{tag}' in {path}")]
    UnsupportedTag { tag: String, path: PathBuf },

    /// Invalid configuration value
    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}
