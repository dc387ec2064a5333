//! Status-line rendering for jeedom-status
//!
//! Turns a [`StatusRecord`](jeedom_core::StatusRecord) and its
//! [`NotificationCounts`](jeedom_core::NotificationCounts) into the text a
//! status bar displays.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   IconSet    │──▶│  StatusLine  │──▶│     Host     │──▶ BarOutput
//! │ (per Style)  │   │ (plain text) │   │   (markup)   │
//! └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! The line itself is host independent: badges only carry a [`Tint`], and the
//! [`Host`] decides how a tint is written (ANSI escapes, Pango spans, nothing).

mod error;
pub mod host;
pub mod icons;
pub mod line;

pub use error::ParseChoiceError;
pub use host::{BarOutput, BarType, Host, MenuContext, UpgradeNotice};
pub use icons::{IconSet, Style};
pub use line::{circled, Badge, StatusLine, Tint};
