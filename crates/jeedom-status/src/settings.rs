//! Effective settings of an invocation
//!
//! Command-line flags and environment variables win over the configuration
//! file, which wins over the built-in defaults.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use jeedom_api::DEFAULT_TIMEOUT;
use jeedom_config::FileConfig;
use jeedom_render::{BarType, Style};

use crate::cli::Cli;
use crate::version_check::{FileVersionCache, DEFAULT_RELEASE_URL};

#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URLs to try, in order
    pub urls: Vec<String>,
    pub api_key: String,
    pub style: Style,
    pub bar_type: BarType,
    pub ignore_battery_warning: bool,
    pub debug: bool,
    pub fake: bool,
    pub timeout: Duration,
    pub version_cache: PathBuf,
    pub release_url: String,
}

impl Settings {
    /// Read the configuration file selected by `cli` and merge it
    pub fn load(cli: Cli) -> Result<Self> {
        let file = FileConfig::discover(cli.config.as_deref())
            .context("failed to load the configuration file")?;
        Self::resolve(cli, file)
    }

    /// Merge command-line values over file values
    pub fn resolve(cli: Cli, file: FileConfig) -> Result<Self> {
        let url = cli.url.or(file.url);
        let alternate_url = cli.alternate_url.or(file.alternate_url);
        let api_key = cli.api_key.or(file.api_key);

        let (urls, api_key) = if cli.fake {
            (url.into_iter().chain(alternate_url).collect(), api_key.unwrap_or_default())
        } else {
            let Some(url) = url else {
                bail!("missing Jeedom URL: use --url, JEEDOM_URL or 'url' in the configuration file");
            };
            let Some(api_key) = api_key else {
                bail!(
                    "missing Jeedom API key: use --api-key, JEEDOM_API_KEY or 'api_key' in the configuration file"
                );
            };
            (std::iter::once(url).chain(alternate_url).collect(), api_key)
        };

        Ok(Self {
            urls,
            api_key,
            style: cli.style.or(file.style).unwrap_or_default(),
            bar_type: cli.bar_type.or(file.bar_type).unwrap_or_default(),
            ignore_battery_warning: cli.ignore_battery_warning
                || file.ignore_battery_warning.unwrap_or(false),
            debug: cli.debug,
            fake: cli.fake,
            timeout: cli
                .timeout_secs
                .or(file.timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            version_cache: cli
                .version_cache
                .or(file.version_cache)
                .unwrap_or_else(FileVersionCache::default_path),
            release_url: cli
                .release_url
                .unwrap_or_else(|| DEFAULT_RELEASE_URL.to_string()),
        })
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("urls", &self.urls)
            .field("api_key", &"<redacted>")
            .field("style", &self.style)
            .field("bar_type", &self.bar_type)
            .field("ignore_battery_warning", &self.ignore_battery_warning)
            .field("debug", &self.debug)
            .field("fake", &self.fake)
            .field("timeout", &self.timeout)
            .field("version_cache", &self.version_cache)
            .field("release_url", &self.release_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("jeedom-status").chain(args.iter().copied())).unwrap()
    }

    fn file() -> FileConfig {
        FileConfig {
            url: Some("http://file.local".to_string()),
            alternate_url: Some("https://file.example.org".to_string()),
            api_key: Some("file-key".to_string()),
            style: Some(Style::Nerd),
            bar_type: Some(BarType::Mac),
            ignore_battery_warning: Some(true),
            timeout_secs: Some(7),
            version_cache: Some(PathBuf::from("/tmp/file-cache")),
        }
    }

    #[test]
    fn test_cli_wins_over_file() {
        let settings = Settings::resolve(
            cli(&["-u", "http://cli.local", "-k", "cli-key", "-s", "emoji", "-b", "none"]),
            file(),
        )
        .unwrap();

        assert_eq!(settings.urls, ["http://cli.local", "https://file.example.org"]);
        assert_eq!(settings.api_key, "cli-key");
        assert_eq!(settings.style, Style::Emoji);
        assert_eq!(settings.bar_type, BarType::None);
        assert!(settings.ignore_battery_warning);
        assert_eq!(settings.timeout, Duration::from_secs(7));
        assert_eq!(settings.version_cache, PathBuf::from("/tmp/file-cache"));
    }

    #[test]
    fn test_defaults() {
        let settings =
            Settings::resolve(cli(&["-u", "http://jeedom", "-k", "key"]), FileConfig::default())
                .unwrap();

        assert_eq!(settings.urls, ["http://jeedom"]);
        assert_eq!(settings.style, Style::Text);
        assert_eq!(settings.bar_type, BarType::Autodetect);
        assert!(!settings.ignore_battery_warning);
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
        assert_eq!(settings.version_cache, FileVersionCache::default_path());
        assert_eq!(settings.release_url, DEFAULT_RELEASE_URL);
    }

    #[test]
    fn test_file_only() {
        let settings = Settings::resolve(cli(&[]), file()).unwrap();
        assert_eq!(settings.urls, ["http://file.local", "https://file.example.org"]);
        assert_eq!(settings.api_key, "file-key");
        assert_eq!(settings.style, Style::Nerd);
    }

    #[test]
    fn test_missing_url_or_key() {
        let err = Settings::resolve(cli(&["-k", "key"]), FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("missing Jeedom URL"));

        let err = Settings::resolve(cli(&["-u", "http://jeedom"]), FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("missing Jeedom API key"));
    }

    #[test]
    fn test_fake_needs_nothing() {
        let settings = Settings::resolve(cli(&["--fake"]), FileConfig::default()).unwrap();
        assert!(settings.fake);
        assert!(settings.urls.is_empty());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let settings = Settings::resolve(cli(&[]), file()).unwrap();
        assert!(!format!("{settings:?}").contains("file-key"));
    }
}
