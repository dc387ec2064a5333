//! Notification and battery counters

use serde::{Deserialize, Serialize};

/// Counters gathered alongside the global summary
///
/// All counters start at zero and are only filled by a single collection
/// pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCounts {
    /// Plugins or core components with a pending update
    pub updates: u32,
    /// Unread messages in the hub's message center
    pub messages: u32,
    /// Equipments reporting a low battery
    pub battery_warning: u32,
    /// Equipments reporting a critically low battery
    pub battery_danger: u32,
}
