//! Icon sets, one per output style
//!
//! Each set maps the summary categories to a glyph. The `jeedom` style needs
//! the Jeedom icon fonts, `nerd` a Nerd Font, `emoji` an emoji-capable font;
//! `text` only uses ASCII letters.

use std::fmt;
use std::str::FromStr;

use jeedom_core::categories;
use serde::{Deserialize, Serialize};

use crate::error::ParseChoiceError;

/// Icon style requested by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// One ASCII letter per category
    #[default]
    Text,
    /// Jeedom icon fonts
    Jeedom,
    /// Nerd Fonts
    Nerd,
    /// Unicode emoji
    Emoji,
}

impl Style {
    /// Every style, in help order
    pub const ALL: [Style; 4] = [Style::Text, Style::Jeedom, Style::Nerd, Style::Emoji];

    /// Name used on the command line and in the config file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Jeedom => "jeedom",
            Self::Nerd => "nerd",
            Self::Emoji => "emoji",
        }
    }
}

impl FromStr for Style {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseChoiceError::new("style", s, "text, jeedom, nerd, emoji"))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Glyphs = [(&'static str, &'static str); 12];

const TEXT: Glyphs = [
    (categories::ALARM, "A"),
    (categories::DOOR, "D"),
    (categories::HUMIDITY, "H"),
    (categories::LIGHT, "G"),
    (categories::LUMINOSITY, "L"),
    (categories::MOTION, "M"),
    (categories::OUTLET, "O"),
    (categories::POWER, "P"),
    (categories::SECURITY, "S"),
    (categories::SHUTTER, "U"),
    (categories::TEMPERATURE, "R"),
    (categories::WINDOWS, "W"),
];

// Jeedom, Jeedomapp, Nature and Font Awesome fonts
const JEEDOM: Glyphs = [
    (categories::ALARM, "\u{E60E}"),
    (categories::DOOR, "\u{E61D}"),
    (categories::HUMIDITY, "\u{E90F}"),
    (categories::LIGHT, "\u{E611}"),
    (categories::LUMINOSITY, "\u{E601}"),
    (categories::MOTION, "\u{E612}"),
    (categories::OUTLET, "\u{E61E}"),
    (categories::POWER, "\u{F0E7}"),
    (categories::SECURITY, "\u{E601}"),
    (categories::SHUTTER, "\u{E627}"),
    (categories::TEMPERATURE, "\u{E622}"),
    (categories::WINDOWS, "\u{E60A}"),
];

// https://www.nerdfonts.com/cheat-sheet
const NERD: Glyphs = [
    (categories::ALARM, "\u{F023}"),
    (categories::DOOR, "\u{FD18}"),
    (categories::HUMIDITY, "\u{E373}"),
    (categories::LIGHT, "\u{F834}"),
    (categories::LUMINOSITY, "\u{FAA7}"),
    (categories::MOTION, "\u{FC0C}"),
    (categories::OUTLET, "\u{F1E6}"),
    (categories::POWER, "\u{F0E7}"),
    (categories::SECURITY, "\u{FC8D}"),
    (categories::SHUTTER, "S"),
    (categories::TEMPERATURE, "\u{F2C7}"),
    (categories::WINDOWS, "\u{F17A}"),
];

const EMOJI: Glyphs = [
    (categories::ALARM, "\u{1F512}"),
    (categories::DOOR, "\u{1F6AA}"),
    (categories::HUMIDITY, "\u{1F4A7}"),
    (categories::LIGHT, "\u{1F4A1}"),
    (categories::LUMINOSITY, "\u{1F506}"),
    (categories::MOTION, "\u{1F3C3}"),
    (categories::OUTLET, "\u{1F50C}"),
    (categories::POWER, "\u{26A1}"),
    (categories::SECURITY, "\u{1F6A8}"),
    (categories::SHUTTER, "\u{2195}"),
    (categories::TEMPERATURE, "\u{1F321}"),
    (categories::WINDOWS, "\u{1F5BC}"),
];

/// Category to glyph lookup for one [`Style`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSet {
    glyphs: &'static Glyphs,
    battery: &'static str,
}

impl IconSet {
    /// Icon set of a style
    pub fn for_style(style: Style) -> Self {
        let (glyphs, battery) = match style {
            Style::Text => (&TEXT, "B"),
            Style::Jeedom => (&JEEDOM, "\u{E602}"),
            Style::Nerd => (&NERD, "\u{F244}"),
            Style::Emoji => (&EMOJI, "\u{1F50B}"),
        };
        Self { glyphs, battery }
    }

    /// Glyph of a known category
    pub fn icon(&self, key: &str) -> Option<&'static str> {
        self.glyphs
            .iter()
            .find(|(category, _)| *category == key)
            .map(|(_, glyph)| *glyph)
    }

    /// Glyph of a category, or the key itself when the category is unknown
    pub fn label<'a>(&self, key: &'a str) -> &'a str {
        self.icon(key).unwrap_or(key)
    }

    /// Glyph used by the battery badges
    pub fn battery(&self) -> &'static str {
        self.battery
    }
}

impl From<Style> for IconSet {
    fn from(style: Style) -> Self {
        Self::for_style(style)
    }
}
