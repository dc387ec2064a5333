//! Secrets loaded from `secrets.yaml`

use crate::error::{ConfigError, ConfigResult};
use serde_yaml::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up next to the configuration file
pub const SECRETS_FILE_NAME: &str = "secrets.yaml";

/// Scalar values of `secrets.yaml`, keyed by name
///
/// A missing file gives an empty store, so `!secret` lookups fail with
/// [`ConfigError::SecretNotFound`] naming the expected path.
#[derive(Clone, Default)]
pub struct Secrets {
    values: HashMap<String, String>,
    path: PathBuf,
}

impl Secrets {
    /// Load `secrets.yaml` from a directory
    pub fn load(config_dir: &Path) -> ConfigResult<Self> {
        let path = config_dir.join(SECRETS_FILE_NAME);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No secrets file at {:?}", path);
                return Ok(Self {
                    values: HashMap::new(),
                    path,
                });
            }
            Err(source) => return Err(ConfigError::ReadFile { path, source }),
        };

        let raw: Option<HashMap<String, Value>> =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::ParseYaml {
                path: path.clone(),
                source,
            })?;

        let values = raw
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => Ok((key, s)),
                Value::Number(n) => Ok((key, n.to_string())),
                Value::Bool(b) => Ok((key, b.to_string())),
                _ => Err(ConfigError::InvalidValue {
                    key,
                    reason: format!("secrets in {} must be scalars", path.display()),
                }),
            })
            .collect::<ConfigResult<HashMap<_, _>>>()?;

        debug!("Loaded {} secrets from {:?}", values.len(), path);
        Ok(Self { values, path })
    }

    /// Get a secret by key
    pub fn get(&self, key: &str) -> ConfigResult<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::SecretNotFound {
                key: key.to_string(),
                path: self.path.clone(),
            })
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("path", &self.path)
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scalars_become_strings() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SECRETS_FILE_NAME),
            "jeedom_api_key: 3cTaBnjHuOfgrDL8Exd3\nport: 8080\nenabled: true\n",
        )
        .unwrap();

        let secrets = Secrets::load(dir.path()).unwrap();
        assert_eq!(secrets.get("jeedom_api_key").unwrap(), "3cTaBnjHuOfgrDL8Exd3");
        assert_eq!(secrets.get("port").unwrap(), "8080");
        assert_eq!(secrets.get("enabled").unwrap(), "true");
    }

    #[test]
    fn test_missing_file_names_expected_path() {
        let dir = TempDir::new().unwrap();
        let secrets = Secrets::load(dir.path()).unwrap();

        match secrets.get("jeedom_api_key") {
            Err(ConfigError::SecretNotFound { key, path }) => {
                assert_eq!(key, "jeedom_api_key");
                assert_eq!(path, dir.path().join(SECRETS_FILE_NAME));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_nested_value_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SECRETS_FILE_NAME), "jeedom:\n  key: abc\n").unwrap();

        assert!(matches!(
            Secrets::load(dir.path()),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_debug_hides_values() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SECRETS_FILE_NAME), "jeedom_api_key: hunter2\n").unwrap();

        let debug = format!("{:?}", Secrets::load(dir.path()).unwrap());
        assert!(debug.contains("jeedom_api_key"));
        assert!(!debug.contains("hunter2"));
    }
}
