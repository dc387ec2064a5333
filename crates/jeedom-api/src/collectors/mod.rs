//! Status collectors built on [`JeedomClient`]
//!
//! Each collector issues one JSON-RPC call and interprets its own result
//! shape. Collectors never recover from an [`ApiError`](crate::ApiError); the
//! only tolerated gaps are per-equipment ones in the battery collector.

mod battery;
mod notifications;
mod summary;

pub use battery::{battery_alerts, tally_battery_alerts, BatteryAlerts, MIN_DANGER_LEVEL};
pub use notifications::{count_messages, count_pending_updates, pending_updates, unread_messages};
pub use summary::{global_summary, parse_summary, SummaryShape, NESTED_SUMMARY_SINCE};

use std::fmt;

use jeedom_core::{NotificationCounts, StatusRecord};
use thiserror::Error;
use tracing::debug;

use crate::client::JeedomClient;
use crate::error::ApiError;

/// Step of a collection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Version,
    GlobalSummary,
    Updates,
    Messages,
    Battery,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Version => "Version",
            Self::GlobalSummary => "Global summary",
            Self::Updates => "Updates",
            Self::Messages => "Messages",
            Self::Battery => "Battery status",
        })
    }
}

/// An [`ApiError`] tagged with the step that failed
#[derive(Debug, Error)]
#[error("{stage} error: {source}")]
pub struct CollectError {
    pub stage: Stage,
    #[source]
    pub source: ApiError,
}

impl CollectError {
    pub fn new(stage: Stage, source: ApiError) -> Self {
        Self { stage, source }
    }
}

/// Attach a [`Stage`] to a collector result
pub trait AtStage<T> {
    fn at_stage(self, stage: Stage) -> Result<T, CollectError>;
}

impl<T> AtStage<T> for Result<T, ApiError> {
    fn at_stage(self, stage: Stage) -> Result<T, CollectError> {
        self.map_err(|source| CollectError::new(stage, source))
    }
}

/// Everything the renderer needs, gathered in one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HubStatus {
    /// Flattened global summary
    pub record: StatusRecord,
    /// Update, message and battery counters
    pub counts: NotificationCounts,
}

/// Run every collector in turn
///
/// Calls are sequential; the first failure aborts the collection and is
/// reported with its [`Stage`].
pub async fn collect_all(
    client: &JeedomClient,
    hub_version: &str,
    ignore_battery_warning: bool,
) -> Result<HubStatus, CollectError> {
    let record = global_summary(client, hub_version)
        .await
        .at_stage(Stage::GlobalSummary)?;
    debug!("Global summary: {}", record);

    let updates = pending_updates(client).await.at_stage(Stage::Updates)?;
    let messages = unread_messages(client).await.at_stage(Stage::Messages)?;
    let battery = battery_alerts(client, ignore_battery_warning)
        .await
        .at_stage(Stage::Battery)?;
    debug!(
        "Updates: {}, messages: {}, battery: {:?}",
        updates, messages, battery
    );

    Ok(HubStatus {
        record,
        counts: NotificationCounts {
            updates,
            messages,
            battery_warning: battery.warning,
            battery_danger: battery.danger,
        },
    })
}
