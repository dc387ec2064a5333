//! Bar-format adapters
//!
//! A bar program reads the tool's stdout: the first line is shown in the bar,
//! the rest is a host specific secondary block.
//!
//! - `none`: plain text, empty secondary block
//! - `mac`: ANSI coloured badges, BitBar/xbar style dropdown menu
//! - `i3blocks`: Pango markup, secondary block repeats the line (short text)
//! - `i3status-rust`: Pango markup, the line alone

use std::fmt;
use std::str::FromStr;

use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParseChoiceError;
use crate::line::{StatusLine, Tint};

/// Separator between the bar line and the dropdown menu
const MENU_SEPARATOR: &str = "---";

/// Bar program the output is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Host {
    Mac,
    I3blocks,
    I3StatusRust,
    None,
}

impl Host {
    /// Host matching the current platform
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::Mac
        } else {
            Self::None
        }
    }

    /// Wrap `text` in the host's colour markup
    pub fn paint(self, text: &str, tint: Tint) -> String {
        match self {
            Self::None => text.to_string(),
            Self::Mac => {
                let color = match tint {
                    Tint::Red => Color::Red,
                    Tint::Yellow => Color::Yellow,
                };
                text.color(color).to_string()
            }
            Self::I3blocks | Self::I3StatusRust => {
                format!("<span color='{}'>{}</span>", tint.name(), text)
            }
        }
    }

    /// Whether the host shows the dropdown menu and its version line
    pub fn has_menu(self) -> bool {
        matches!(self, Self::Mac)
    }

    /// Render a status line with this host's markup and secondary block
    pub fn render(self, line: &StatusLine, menu: &MenuContext) -> BarOutput {
        let primary = line.render_with(|badge| self.paint(&badge.text, badge.tint));
        let secondary = match self {
            Self::None => Some(String::new()),
            Self::I3blocks => Some(primary.clone()),
            Self::I3StatusRust => None,
            Self::Mac => Some(mac_menu(line, menu)),
        };
        debug!("Rendered for {}: {:?}", self, primary);

        BarOutput { primary, secondary }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mac => "mac",
            Self::I3blocks => "i3blocks",
            Self::I3StatusRust => "i3status-rust",
            Self::None => "none",
        })
    }
}

/// Bar type requested by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarType {
    /// Pick the host from the platform
    #[default]
    Autodetect,
    Mac,
    I3blocks,
    #[serde(rename = "i3status-rust", alias = "i3-status-rust")]
    I3StatusRust,
    None,
}

impl BarType {
    pub const ALL: [BarType; 5] = [
        BarType::Autodetect,
        BarType::Mac,
        BarType::I3blocks,
        BarType::I3StatusRust,
        BarType::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Autodetect => "autodetect",
            Self::Mac => "mac",
            Self::I3blocks => "i3blocks",
            Self::I3StatusRust => "i3status-rust",
            Self::None => "none",
        }
    }

    /// The host to render for
    pub fn resolve(self) -> Host {
        match self {
            Self::Autodetect => Host::detect(),
            Self::Mac => Host::Mac,
            Self::I3blocks => Host::I3blocks,
            Self::I3StatusRust => Host::I3StatusRust,
            Self::None => Host::None,
        }
    }
}

impl FromStr for BarType {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("i3-status-rust") {
            return Ok(Self::I3StatusRust);
        }
        Self::ALL
            .into_iter()
            .find(|bar| bar.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                ParseChoiceError::new(
                    "bar type",
                    s,
                    "autodetect, mac, i3blocks, i3status-rust, none",
                )
            })
    }
}

impl fmt::Display for BarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A newer release of the tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeNotice {
    /// Latest version, without the `v` prefix
    pub latest: String,
    /// Page the menu entry links to
    pub release_url: String,
}

/// What the mac dropdown menu links to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuContext {
    /// Base URL of the hub that answered, without trailing slash
    pub base_url: String,
    pub upgrade: Option<UpgradeNotice>,
}

impl MenuContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            upgrade: None,
        }
    }

    pub fn with_upgrade(mut self, upgrade: Option<UpgradeNotice>) -> Self {
        self.upgrade = upgrade;
        self
    }
}

fn mac_menu(line: &StatusLine, menu: &MenuContext) -> String {
    let counts = line.counts();
    let mut entries = vec![MENU_SEPARATOR.to_string()];

    if counts.updates > 0 {
        entries.push(format!(
            "Updates {} | color=red href={}/index.php?v=d&p=update",
            counts.updates, menu.base_url
        ));
    }
    if counts.messages > 0 {
        entries.push(format!(
            "Messages {} | color=orange href={}/index.php?v=d&p=message",
            counts.messages, menu.base_url
        ));
    }
    if let Some(upgrade) = &menu.upgrade {
        entries.push(format!(
            "New version available v{} | href={}",
            upgrade.latest, upgrade.release_url
        ));
    }

    entries.join("\n")
}

/// Everything written to stdout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarOutput {
    /// Line shown in the bar
    pub primary: String,
    /// Host specific block following it, `None` when the host reads a
    /// single line
    pub secondary: Option<String>,
}

impl fmt::Display for BarOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.secondary {
            Some(secondary) => write!(f, "{}\n{}", self.primary, secondary),
            None => f.write_str(&self.primary),
        }
    }
}
