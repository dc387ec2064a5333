//! Global summary collector

use jeedom_core::{HubVersion, StatusRecord, VersionError};
use serde_json::Value;
use tracing::debug;

use crate::client::{methods, JeedomClient};
use crate::error::{ApiError, ApiResult};

/// First hub version answering the global summary with nested objects
pub const NESTED_SUMMARY_SINCE: HubVersion = HubVersion::new(4, 1, 0);

/// Shape of the `summary::global` result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryShape {
    /// `{"door": 1, ...}` (hubs before 4.1)
    Flat,
    /// `{"door": {"key": "door", "value": 1, ...}, ...}` (4.1 and later)
    Nested,
}

impl SummaryShape {
    /// Select the shape from the hub's version string
    pub fn for_version(version: &str) -> Result<Self, VersionError> {
        let version: HubVersion = version.parse()?;
        Ok(if version < NESTED_SUMMARY_SINCE {
            Self::Flat
        } else {
            Self::Nested
        })
    }
}

/// Fetch the global summary, parsed with the shape matching `hub_version`
pub async fn global_summary(client: &JeedomClient, hub_version: &str) -> ApiResult<StatusRecord> {
    let shape = SummaryShape::for_version(hub_version)
        .map_err(|e| ApiError::malformed(methods::VERSION, e.to_string()))?;
    debug!("Jeedom {} uses the {:?} summary shape", hub_version, shape);

    let result = client.call(methods::GLOBAL_SUMMARY).await?;
    parse_summary(shape, &result)
}

/// Flatten a `summary::global` result into a [`StatusRecord`]
pub fn parse_summary(shape: SummaryShape, result: &Value) -> ApiResult<StatusRecord> {
    let Some(categories) = result.as_object() else {
        return Err(ApiError::malformed(
            methods::GLOBAL_SUMMARY,
            "result is not an object",
        ));
    };

    categories
        .iter()
        .map(|(key, content)| {
            let value = match shape {
                SummaryShape::Flat => content,
                SummaryShape::Nested => {
                    let Some(summary) = content.as_object() else {
                        return Err(ApiError::malformed(
                            methods::GLOBAL_SUMMARY,
                            format!("summary '{key}' is not an object"),
                        ));
                    };
                    summary.get("value").unwrap_or(&Value::Null)
                }
            };
            Ok((key.clone(), StatusRecord::stringify(value)))
        })
        .collect()
}
