//! Command-line arguments

use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::Parser;
use jeedom_render::{BarType, Style};

/// Get summary of your Jeedom equipments, notifications and battery
#[derive(Parser, Debug)]
#[command(name = "jeedom-status")]
#[command(version)]
#[command(about = "Get summary of your Jeedom equipments, notifications and battery")]
pub struct Cli {
    /// Jeedom API URL, like http://jeedom
    #[arg(short = 'u', long, env = "JEEDOM_URL")]
    pub url: Option<String>,

    /// Fallback URL used when the first one does not answer, like https://jeedom.example.org
    #[arg(short = 'a', long, env = "JEEDOM_ALTERNATE_URL")]
    pub alternate_url: Option<String>,

    /// Jeedom API key or user hash key
    #[arg(short = 'k', long, env = "JEEDOM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Icon style: text, jeedom, nerd or emoji [default: text]
    #[arg(short = 's', long)]
    pub style: Option<Style>,

    /// Bar type: autodetect, mac, i3blocks, i3status-rust or none [default: autodetect]
    #[arg(short = 'b', long)]
    pub bar_type: Option<BarType>,

    /// Ignore battery warning report
    #[arg(short = 'w', long)]
    pub ignore_battery_warning: bool,

    /// Print the settings and the collected data before the bar output
    #[arg(short = 'd', long, env = "DEBUG", value_parser = FalseyValueParser::new())]
    pub debug: bool,

    /// Render a sample summary without contacting Jeedom
    #[arg(short = 'f', long)]
    pub fake: bool,

    /// Configuration file [default: <config dir>/jeedom-status/config.yaml]
    #[arg(short = 'c', long, env = "JEEDOM_STATUS_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds [default: 30]
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Version check cache file [default: <temp dir>/jeedom-status]
    #[arg(long, env = "JEEDOM_STATUS_VERSION_CACHE", value_name = "PATH")]
    pub version_cache: Option<PathBuf>,

    /// Page redirecting to the latest release
    #[arg(long, env = "JEEDOM_STATUS_RELEASE_URL", hide = true)]
    pub release_url: Option<String>,
}
