//! Selection of the first reachable hub URL
//!
//! A hub is often reachable through a local URL at home and an external one
//! elsewhere. Each candidate is pinged in order and the first one that
//! answers is used for the whole invocation.

use std::time::Duration;

use tracing::{debug, warn};

use crate::client::JeedomClient;
use crate::error::{ApiError, ApiResult};

/// Return a client bound to the first candidate URL answering `ping`
///
/// An unparsable URL is reported immediately; unreachable ones are skipped.
pub async fn select_reachable<S: AsRef<str>>(
    candidates: &[S],
    api_key: &str,
    timeout: Duration,
) -> ApiResult<JeedomClient> {
    for url in candidates {
        let url = url.as_ref();
        debug!("Checking {} connectivity", url);

        let client = JeedomClient::with_timeout(url, api_key, timeout)?;
        match client.ping().await {
            Ok(()) => {
                debug!("Using Jeedom at {}", client.base_url());
                return Ok(client);
            }
            Err(e) => warn!("Jeedom at {} did not answer ping: {}", url, e),
        }
    }

    Err(ApiError::NoReachableUrl)
}
