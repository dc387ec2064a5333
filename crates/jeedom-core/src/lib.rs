//! Core types for jeedom-status
//!
//! This crate provides the fundamental types shared by the collectors and the
//! renderer: the flattened global summary ([`StatusRecord`]), the notification
//! and battery counters ([`NotificationCounts`]) and hub/release version
//! ordering ([`HubVersion`]).

mod counts;
mod record;
mod version;

pub use counts::NotificationCounts;
pub use record::StatusRecord;
pub use version::{HubVersion, VersionError};

/// String a JSON `null` summary value flattens to ("no data")
pub const NO_DATA: &str = "null";

/// Summary value meaning "nothing to show"
pub const ZERO: &str = "0";

/// Label rendered when the summary has nothing to show
pub const FALLBACK_LABEL: &str = "Jeedom";

/// Category keys reported by the hub's global summary
pub mod categories {
    /// Alarm armed (custom summary, rendered without a count)
    pub const ALARM: &str = "alarm";

    /// Open doors
    pub const DOOR: &str = "door";

    /// Average humidity
    pub const HUMIDITY: &str = "humidity";

    /// Lights on
    pub const LIGHT: &str = "light";

    /// Average luminosity
    pub const LUMINOSITY: &str = "luminosity";

    /// Motion detected
    pub const MOTION: &str = "motion";

    /// Outlets on
    pub const OUTLET: &str = "outlet";

    /// Total power
    pub const POWER: &str = "power";

    /// Security alerts
    pub const SECURITY: &str = "security";

    /// Open shutters
    pub const SHUTTER: &str = "shutter";

    /// Average temperature
    pub const TEMPERATURE: &str = "temperature";

    /// Open windows
    pub const WINDOWS: &str = "windows";

    /// Every known category, in alphabetical order
    pub const ALL: [&str; 12] = [
        ALARM,
        DOOR,
        HUMIDITY,
        LIGHT,
        LUMINOSITY,
        MOTION,
        OUTLET,
        POWER,
        SECURITY,
        SHUTTER,
        TEMPERATURE,
        WINDOWS,
    ];
}
