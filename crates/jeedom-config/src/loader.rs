//! YAML loader with `!secret` and `!env_var` tag support

use crate::error::{ConfigError, ConfigResult};
use crate::secrets::Secrets;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// YAML loader resolving the custom tags of a configuration file
#[derive(Debug)]
pub struct YamlLoader {
    /// Directory holding the configuration file and its secrets
    config_dir: PathBuf,
    secrets: Secrets,
}

impl YamlLoader {
    /// Create a loader reading secrets from `config_dir`
    pub fn new(config_dir: impl Into<PathBuf>) -> ConfigResult<Self> {
        let config_dir = config_dir.into();
        let secrets = Secrets::load(&config_dir)?;

        Ok(Self {
            config_dir,
            secrets,
        })
    }

    /// Load and process a YAML file, relative paths resolved from the config
    /// directory
    pub fn load_file(&self, path: impl AsRef<Path>) -> ConfigResult<Value> {
        let path = self.resolve_path(path.as_ref());
        debug!("Loading YAML file: {:?}", path);

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

        self.load_string(&content, &path)
    }

    /// Load and process YAML from a string
    pub fn load_string(&self, content: &str, source_path: &Path) -> ConfigResult<Value> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
            path: source_path.to_path_buf(),
            source: e,
        })?;

        self.process_value(value, source_path)
    }

    fn process_value(&self, value: Value, source_path: &Path) -> ConfigResult<Value> {
        match value {
            Value::Tagged(tagged) => self.process_tagged(*tagged, source_path),
            Value::Mapping(map) => {
                let mut result = serde_yaml::Mapping::new();
                for (k, v) in map {
                    result.insert(k, self.process_value(v, source_path)?);
                }
                Ok(Value::Mapping(result))
            }
            Value::Sequence(seq) => {
                let result: ConfigResult<Vec<Value>> = seq
                    .into_iter()
                    .map(|v| self.process_value(v, source_path))
                    .collect();
                Ok(Value::Sequence(result?))
            }
            _ => Ok(value),
        }
    }

    fn process_tagged(
        &self,
        tagged: serde_yaml::value::TaggedValue,
        source_path: &Path,
    ) -> ConfigResult<Value> {
        let tag = tagged.tag.to_string();
        trace!("Processing tag '{}' with value {:?}", tag, tagged.value);

        match tag.as_str() {
            "!secret" => self.process_secret(tagged.value),
            "!env_var" => self.process_env_var(tagged.value),
            _ => Err(ConfigError::UnsupportedTag {
                tag,
                path: source_path.to_path_buf(),
            }),
        }
    }

    fn process_secret(&self, value: Value) -> ConfigResult<Value> {
        let Value::String(key) = value else {
            return Err(ConfigError::InvalidValue {
                key: "!secret".to_string(),
                reason: "secret key must be a string".to_string(),
            });
        };

        let secret_value = self.secrets.get(&key)?;
        debug!("Substituted secret: {}", key);
        Ok(Value::String(secret_value.to_string()))
    }

    fn process_env_var(&self, value: Value) -> ConfigResult<Value> {
        let Value::String(var_name) = value else {
            return Err(ConfigError::InvalidValue {
                key: "!env_var".to_string(),
                reason: "environment variable name must be a string".to_string(),
            });
        };

        let env_value = std::env::var(&var_name).map_err(|_| ConfigError::EnvVarNotFound {
            var: var_name.clone(),
        })?;

        debug!("Substituted env var: {}", var_name);
        Ok(Value::String(env_value))
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.config_dir.join(path)
        }
    }
}

/// Load a YAML file, reading secrets from the file's own directory
pub fn load_yaml(path: impl AsRef<Path>) -> ConfigResult<Value> {
    let path = path.as_ref();
    let config_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path.file_name().map(Path::new).unwrap_or(path);
    YamlLoader::new(config_dir)?.load_file(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn get<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
        value.as_mapping().and_then(|map| map.get(key))
    }

    #[test]
    fn test_load_simple_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "config.yaml",
            "url: http://jeedom.local\nstyle: emoji\n",
        );

        let value = load_yaml(&path).unwrap();
        assert_eq!(
            get(&value, "url"),
            Some(&Value::String("http://jeedom.local".to_string()))
        );
        assert_eq!(get(&value, "style"), Some(&Value::String("emoji".to_string())));
    }

    #[test]
    fn test_secret() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "secrets.yaml", "jeedom_api_key: s3cr3t\n");
        let path = write_file(dir.path(), "config.yaml", "api_key: !secret jeedom_api_key\n");

        let value = load_yaml(&path).unwrap();
        assert_eq!(get(&value, "api_key"), Some(&Value::String("s3cr3t".to_string())));
    }

    #[test]
    fn test_missing_secret() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "config.yaml", "api_key: !secret nope\n");

        assert!(matches!(
            load_yaml(&path),
            Err(ConfigError::SecretNotFound { .. })
        ));
    }

    #[test]
    fn test_env_var() {
        let dir = TempDir::new().unwrap();
        std::env::set_var("TEST_JEEDOM_CONFIG_VAR", "env_value");
        let path = write_file(
            dir.path(),
            "config.yaml",
            "api_key: !env_var TEST_JEEDOM_CONFIG_VAR\n",
        );

        let value = load_yaml(&path).unwrap();
        assert_eq!(
            get(&value, "api_key"),
            Some(&Value::String("env_value".to_string()))
        );

        std::env::remove_var("TEST_JEEDOM_CONFIG_VAR");
    }

    #[test]
    fn test_missing_env_var() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "config.yaml",
            "api_key: !env_var TEST_JEEDOM_CONFIG_UNSET_VAR\n",
        );

        assert!(matches!(
            load_yaml(&path),
            Err(ConfigError::EnvVarNotFound { .. })
        ));
    }

    #[test]
    fn test_unsupported_tag() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "config.yaml", "url: !include other.yaml\n");

        match load_yaml(&path).unwrap_err() {
            ConfigError::UnsupportedTag { tag, .. } => assert_eq!(tag, "!include"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_relative_path_uses_config_dir() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "config.yaml", "timeout_secs: 5\n");

        let loader = YamlLoader::new(dir.path()).unwrap();
        let value = loader.load_file("config.yaml").unwrap();
        assert_eq!(get(&value, "timeout_secs").and_then(Value::as_u64), Some(5));
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "config.yaml", "url: [unclosed\n");

        assert!(matches!(load_yaml(&path), Err(ConfigError::ParseYaml { .. })));
    }
}
