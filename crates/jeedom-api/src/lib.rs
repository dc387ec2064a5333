//! Jeedom JSON-RPC client and status collectors
//!
//! This crate talks to a Jeedom hub's single JSON-RPC endpoint
//! (`<base>/core/api/jeeApi.php`) and turns the answers into the types of
//! `jeedom-core`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  ping   ┌──────────────┐
//! │ connectivity │────────▶│ JeedomClient │── POST {jsonrpc, id, method, params}
//! └──────────────┘         └──────┬───────┘
//!                                 │ result
//!        ┌──────────────┬─────────┴──────┬──────────────┐
//!        ▼              ▼                ▼              ▼
//!  global_summary  pending_updates  unread_messages  battery_alerts
//!   StatusRecord        u32             u32          BatteryAlerts
//! ```
//!
//! Every collector is an async call plus a pure parse function, so the
//! response shapes can be tested without a hub.
//!
//! # Example
//!
//! ```ignore
//! use jeedom_api::{collectors, connectivity};
//!
//! let client = connectivity::select_reachable(&urls, &api_key, timeout).await?;
//! let version = client.version().await?;
//! let status = collectors::collect_all(&client, &version, false).await?;
//! ```

pub mod client;
pub mod collectors;
pub mod connectivity;
mod error;

pub use client::{methods, JeedomClient, JsonRpcRequest, API_PATH, DEFAULT_TIMEOUT};
pub use collectors::{AtStage, BatteryAlerts, CollectError, HubStatus, Stage, SummaryShape};
pub use error::{ApiError, ApiResult};
