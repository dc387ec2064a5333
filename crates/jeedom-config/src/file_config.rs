//! Settings read from the configuration file
//!
//! Every field is optional: the file only fills what the command line and the
//! environment leave unset.

use std::path::{Path, PathBuf};

use jeedom_render::{BarType, Style};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::loader::load_yaml;

/// File name inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// `<config dir>/jeedom-status/config.yaml`, when the platform has a config
/// directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("jeedom-status").join(CONFIG_FILE_NAME))
}

/// Contents of a configuration file
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Hub base URL
    #[serde(default)]
    pub url: Option<String>,

    /// Fallback base URL tried when `url` does not answer
    #[serde(default)]
    pub alternate_url: Option<String>,

    /// API key (user hash)
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub style: Option<Style>,

    #[serde(default)]
    pub bar_type: Option<BarType>,

    #[serde(default)]
    pub ignore_battery_warning: Option<bool>,

    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Version-check cache file
    #[serde(default)]
    pub version_cache: Option<PathBuf>,
}

impl FileConfig {
    /// Load the configuration file
    ///
    /// With an explicit path the file must exist. Without one the default
    /// location is used, and an absent file gives an empty configuration.
    pub fn discover(explicit: Option<&Path>) -> ConfigResult<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.to_path_buf(),
                    });
                }
                Self::load(path)
            }
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load(&path),
                Some(path) => {
                    debug!("No configuration file at {:?}", path);
                    Ok(Self::default())
                }
                None => Ok(Self::default()),
            },
        }
    }

    /// Load a configuration file, resolving its tags
    pub fn load(path: &Path) -> ConfigResult<Self> {
        debug!("Loading configuration from {:?}", path);
        let yaml = load_yaml(path)?;
        Self::from_yaml(yaml)
    }

    /// Build from an already processed YAML document
    pub fn from_yaml(yaml: Value) -> ConfigResult<Self> {
        // an empty file is an empty configuration
        if yaml.is_null() {
            return Ok(Self::default());
        }
        if !yaml.is_mapping() {
            return Err(ConfigError::InvalidValue {
                key: "root".to_string(),
                reason: "configuration must be a mapping".to_string(),
            });
        }

        let config: FileConfig =
            serde_yaml::from_value(yaml).map_err(|e| ConfigError::InvalidValue {
                key: "root".to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        for (key, value) in [("url", &self.url), ("alternate_url", &self.alternate_url)] {
            if value.as_deref().is_some_and(|url| url.trim().is_empty()) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for FileConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfig")
            .field("url", &self.url)
            .field("alternate_url", &self.alternate_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("style", &self.style)
            .field("bar_type", &self.bar_type)
            .field("ignore_battery_warning", &self.ignore_battery_warning)
            .field("timeout_secs", &self.timeout_secs)
            .field("version_cache", &self.version_cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_full_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("secrets.yaml"), "jeedom_api_key: abc123\n").unwrap();
        let path = write_config(
            dir.path(),
            r#"
url: http://jeedom.local
alternate_url: https://jeedom.example.org
api_key: !secret jeedom_api_key
style: emoji
bar_type: i3blocks
ignore_battery_warning: true
timeout_secs: 10
version_cache: /tmp/jeedom-status-test
"#,
        );

        let config = FileConfig::discover(Some(&path)).unwrap();
        assert_eq!(config.url.as_deref(), Some("http://jeedom.local"));
        assert_eq!(
            config.alternate_url.as_deref(),
            Some("https://jeedom.example.org")
        );
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.style, Some(Style::Emoji));
        assert_eq!(config.bar_type, Some(BarType::I3blocks));
        assert_eq!(config.ignore_battery_warning, Some(true));
        assert_eq!(config.timeout_secs, Some(10));
        assert_eq!(
            config.version_cache,
            Some(PathBuf::from("/tmp/jeedom-status-test"))
        );
    }

    #[test]
    fn test_partial_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "url: http://192.168.0.10\n");

        let config = FileConfig::load(&path).unwrap();
        assert_eq!(config.url.as_deref(), Some("http://192.168.0.10"));
        assert_eq!(config.api_key, None);
        assert_eq!(config.style, None);
    }

    #[test]
    fn test_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "");
        assert_eq!(FileConfig::load(&path).unwrap(), FileConfig::default());
    }

    #[test]
    fn test_i3status_rust_bar_type() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "bar_type: i3status-rust\n");
        assert_eq!(
            FileConfig::load(&path).unwrap().bar_type,
            Some(BarType::I3StatusRust)
        );
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.yaml");

        assert!(matches!(
            FileConfig::discover(Some(&missing)),
            Err(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "uri: http://jeedom.local\n");
        assert!(matches!(
            FileConfig::load(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_invalid_style_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "style: fancy\n");
        assert!(matches!(
            FileConfig::load(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validation() {
        let dir = TempDir::new().unwrap();

        let path = write_config(dir.path(), "timeout_secs: 0\n");
        match FileConfig::load(&path).unwrap_err() {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "timeout_secs"),
            other => panic!("unexpected error: {other}"),
        }

        let path = write_config(dir.path(), "url: '  '\n");
        match FileConfig::load(&path).unwrap_err() {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "url"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_not_a_mapping() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "- http://jeedom.local\n");
        assert!(FileConfig::load(&path).is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = FileConfig {
            api_key: Some("abc123".to_string()),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("abc123"));
    }

    #[test]
    fn test_default_path() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("jeedom-status/config.yaml"));
        }
    }
}
