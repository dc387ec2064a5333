//! Primary status line
//!
//! The line is made of the summary entries followed by the badges:
//!
//! ```text
//! A 2D 4G 3H 5L 6M 7O 8P 2R 9S 1U 3W ① ② 1B 2B
//! └──────────── summary entries ───────────┘ └─ badges ─┘
//! ```

use jeedom_core::{categories, NotificationCounts, StatusRecord, FALLBACK_LABEL};
use tracing::debug;

use crate::icons::IconSet;

/// Highest count with its own circled digit
const MAX_CIRCLED: u32 = 20;

/// Badge shown for counts above [`MAX_CIRCLED`]
const OVERFLOW_BADGE: &str = "+";

/// Colour of a badge, translated to markup by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tint {
    Red,
    Yellow,
}

impl Tint {
    /// Colour name used by Pango markup and the mac menu
    pub fn name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
        }
    }
}

/// A coloured suffix of the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub tint: Tint,
}

impl Badge {
    fn new(text: impl Into<String>, tint: Tint) -> Self {
        Self {
            text: text.into(),
            tint,
        }
    }
}

/// Circled digit for `count` (① to ⑳), `+` above twenty, nothing for zero
pub fn circled(count: u32) -> Option<String> {
    match count {
        0 => None,
        1..=MAX_CIRCLED => char::from_u32(0x2460 + count - 1).map(String::from),
        _ => Some(OVERFLOW_BADGE.to_string()),
    }
}

/// The rendered primary line, before host markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    summary: String,
    badges: Vec<Badge>,
    counts: NotificationCounts,
}

impl StatusLine {
    /// Render a record and its counters with an icon set
    ///
    /// A record with nothing to show renders as the fallback label, without
    /// any badge.
    pub fn build(record: &StatusRecord, counts: NotificationCounts, icons: &IconSet) -> Self {
        let entries = summary_entries(record, icons);
        if entries.is_empty() {
            debug!("Nothing to show in the global summary");
            return Self::fallback();
        }

        Self {
            summary: entries.join(" ").trim_end().to_string(),
            badges: badges(counts, icons),
            counts,
        }
    }

    /// The bare fallback label
    pub fn fallback() -> Self {
        Self {
            summary: FALLBACK_LABEL.to_string(),
            badges: Vec::new(),
            counts: NotificationCounts::default(),
        }
    }

    /// Summary entries joined by spaces
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    /// Counters shown by the line (zero for the fallback)
    pub fn counts(&self) -> NotificationCounts {
        self.counts
    }

    pub fn is_fallback(&self) -> bool {
        self.badges.is_empty() && self.summary == FALLBACK_LABEL
    }

    /// Join the summary and the badges, each badge passed through `paint`
    pub fn render_with(&self, paint: impl Fn(&Badge) -> String) -> String {
        let mut line = self.summary.clone();
        for badge in &self.badges {
            line.push(' ');
            line.push_str(&paint(badge));
        }
        line.trim_end().to_string()
    }
}

/// Summary entries sorted by glyph, idle categories removed
fn summary_entries(record: &StatusRecord, icons: &IconSet) -> Vec<String> {
    // record iteration is ordered by key, so the stable sort breaks glyph ties
    // by key
    let mut entries: Vec<(&str, String)> = record
        .iter()
        .filter(|(_, value)| !StatusRecord::is_idle(value))
        .map(|(key, value)| {
            let label = icons.label(key);
            if key == categories::ALARM {
                (label, label.to_string())
            } else {
                (label, format!("{value}{label}"))
            }
        })
        .collect();

    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries.into_iter().map(|(_, entry)| entry).collect()
}

fn badges(counts: NotificationCounts, icons: &IconSet) -> Vec<Badge> {
    let mut badges = Vec::new();

    if let Some(badge) = circled(counts.updates) {
        badges.push(Badge::new(badge, Tint::Red));
    }
    if let Some(badge) = circled(counts.messages) {
        badges.push(Badge::new(badge, Tint::Yellow));
    }
    if counts.battery_warning > 0 {
        badges.push(Badge::new(
            format!("{}{}", counts.battery_warning, icons.battery()),
            Tint::Yellow,
        ));
    }
    if counts.battery_danger > 0 {
        badges.push(Badge::new(
            format!("{}{}", counts.battery_danger, icons.battery()),
            Tint::Red,
        ));
    }

    badges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::Style;
    use serde_json::json;

    fn sample_record() -> StatusRecord {
        [
            ("alarm", "1"),
            ("door", "2"),
            ("humidity", "3"),
            ("light", "4"),
            ("luminosity", "5"),
            ("motion", "6"),
            ("outlet", "7"),
            ("power", "8"),
            ("security", "9"),
            ("shutter", "1"),
            ("temperature", "2"),
            ("windows", "3"),
        ]
        .into_iter()
        .collect()
    }

    fn plain(line: &StatusLine) -> String {
        line.render_with(|badge| badge.text.clone())
    }

    fn counts(updates: u32, messages: u32) -> NotificationCounts {
        NotificationCounts {
            updates,
            messages,
            ..Default::default()
        }
    }

    #[test]
    fn test_text_style_with_notifications() {
        let icons = IconSet::for_style(Style::Text);
        let line = StatusLine::build(&sample_record(), counts(1, 2), &icons);

        assert_eq!(plain(&line), "A 2D 4G 3H 5L 6M 7O 8P 2R 9S 1U 3W ① ②");
        assert_eq!(
            line.badges(),
            &[Badge::new("①", Tint::Red), Badge::new("②", Tint::Yellow)]
        );
    }

    #[test]
    fn test_battery_badges_follow_notifications() {
        let icons = IconSet::for_style(Style::Text);
        let counts = NotificationCounts {
            updates: 1,
            messages: 2,
            battery_warning: 1,
            battery_danger: 2,
        };
        let line = StatusLine::build(&sample_record(), counts, &icons);

        assert_eq!(plain(&line), "A 2D 4G 3H 5L 6M 7O 8P 2R 9S 1U 3W ① ② 1B 2B");
        assert_eq!(line.badges()[2].tint, Tint::Yellow);
        assert_eq!(line.badges()[3].tint, Tint::Red);
    }

    #[test]
    fn test_emoji_style_sorts_by_glyph() {
        let icons = IconSet::for_style(Style::Emoji);
        let line = StatusLine::build(&sample_record(), NotificationCounts::default(), &icons);

        assert_eq!(
            plain(&line),
            "1↕ 8⚡ 2🌡 6🏃 4💡 3💧 5🔆 7🔌 🔒 3🖼 9🚨 2🚪"
        );
    }

    #[test]
    fn test_empty_record_is_fallback() {
        for style in Style::ALL {
            let icons = IconSet::for_style(style);
            let line = StatusLine::build(&StatusRecord::new(), counts(3, 4), &icons);

            assert!(line.is_fallback(), "{style}");
            assert_eq!(plain(&line), "Jeedom", "{style}");
            assert_eq!(line.counts(), NotificationCounts::default(), "{style}");
        }
    }

    #[test]
    fn test_idle_values_are_dropped() {
        let record: StatusRecord = [("door", "0"), ("light", "null"), ("windows", "2")]
            .into_iter()
            .collect();
        let idle: StatusRecord = [("door", "0"), ("alarm", "null")].into_iter().collect();

        for style in Style::ALL {
            let icons = IconSet::for_style(style);
            let line = StatusLine::build(&record, NotificationCounts::default(), &icons);
            assert_eq!(plain(&line), format!("2{}", icons.label("windows")), "{style}");

            let line = StatusLine::build(&idle, counts(1, 0), &icons);
            assert!(line.is_fallback(), "{style}");
            assert_eq!(plain(&line), "Jeedom", "{style}");
        }
    }

    #[test]
    fn test_whole_float_zero_is_idle() {
        let record: StatusRecord = [
            ("door", StatusRecord::stringify(&json!(0.0))),
            ("light", StatusRecord::stringify(&json!(3.0))),
        ]
        .into_iter()
        .collect();
        let icons = IconSet::for_style(Style::Text);
        assert_eq!(
            plain(&StatusLine::build(&record, NotificationCounts::default(), &icons)),
            "3G"
        );

        let zero: StatusRecord = [("door", StatusRecord::stringify(&json!(0.0)))]
            .into_iter()
            .collect();
        assert!(StatusLine::build(&zero, NotificationCounts::default(), &icons).is_fallback());
    }

    #[test]
    fn test_alarm_is_a_bare_icon() {
        let icons = IconSet::for_style(Style::Text);
        let record: StatusRecord = [("alarm", "3")].into_iter().collect();
        assert_eq!(
            plain(&StatusLine::build(&record, NotificationCounts::default(), &icons)),
            "A"
        );

        let disarmed: StatusRecord = [("alarm", "0")].into_iter().collect();
        assert!(StatusLine::build(&disarmed, NotificationCounts::default(), &icons).is_fallback());
    }

    #[test]
    fn test_unknown_key_uses_raw_key() {
        let icons = IconSet::for_style(Style::Text);
        let record: StatusRecord = [("garage", "1"), ("door", "2")].into_iter().collect();
        assert_eq!(
            plain(&StatusLine::build(&record, NotificationCounts::default(), &icons)),
            "2D 1garage"
        );
    }

    #[test]
    fn test_glyph_ties_are_ordered_by_key() {
        // luminosity and security share a glyph in the jeedom style
        let icons = IconSet::for_style(Style::Jeedom);
        let record: StatusRecord = [("security", "9"), ("luminosity", "5")]
            .into_iter()
            .collect();
        assert_eq!(
            plain(&StatusLine::build(&record, NotificationCounts::default(), &icons)),
            "5\u{E601} 9\u{E601}"
        );
    }

    #[test]
    fn test_circled() {
        assert_eq!(circled(0), None);
        assert_eq!(circled(1).as_deref(), Some("①"));
        assert_eq!(circled(10).as_deref(), Some("⑩"));
        assert_eq!(circled(20).as_deref(), Some("⑳"));
        assert_eq!(circled(21).as_deref(), Some("+"));
        assert_eq!(circled(500).as_deref(), Some("+"));
    }

    #[test]
    fn test_notification_overflow() {
        let icons = IconSet::for_style(Style::Text);
        let record: StatusRecord = [("door", "1")].into_iter().collect();
        let line = StatusLine::build(&record, counts(21, 20), &icons);
        assert_eq!(plain(&line), "1D + ⑳");
    }
}
