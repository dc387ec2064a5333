//! Error types for the Jeedom API client

use reqwest::StatusCode;
use thiserror::Error;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while talking to the hub
///
/// None of these are recovered from: they abort the invocation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, truncated body)
    #[error("Jeedom unreachable at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The hub answered with a status other than 200
    #[error("error while trying to reach {url}: HTTP {status}")]
    HttpStatus { url: String, status: StatusCode },

    /// The JSON-RPC response carried an `error` member
    #[error("Jeedom API error: {message}")]
    RemoteError { code: Option<i64>, message: String },

    /// The response did not have the expected shape
    #[error("malformed '{method}' response: {reason}")]
    MalformedResponse { method: String, reason: String },

    /// A configured base URL can't be parsed
    #[error("URL can't be parsed: {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// None of the configured base URLs answered a ping
    #[error("no given Jeedom URL can be reached")]
    NoReachableUrl,

    /// The HTTP client could not be built
    #[error("failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl ApiError {
    /// Build a [`ApiError::MalformedResponse`]
    pub fn malformed(method: &str, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            method: method.to_string(),
            reason: reason.into(),
        }
    }
}
