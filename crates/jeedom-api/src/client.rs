//! JSON-RPC client for the Jeedom API

use std::fmt;
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ApiError, ApiResult};

/// Path of the JSON-RPC endpoint, relative to the hub base URL
pub const API_PATH: &str = "/core/api/jeeApi.php";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC methods used by jeedom-status
pub mod methods {
    /// Connectivity check, answers "pong"
    pub const PING: &str = "ping";

    /// Hub version string
    pub const VERSION: &str = "version";

    /// Global summary (per-category counters)
    pub const GLOBAL_SUMMARY: &str = "summary::global";

    /// Update status of the core and every plugin
    pub const UPDATES: &str = "update::all";

    /// Messages of the message center
    pub const MESSAGES: &str = "message::all";

    /// Every equipment, with its battery status
    pub const EQUIPMENTS: &str = "eqLogic::all";
}

/// The fixed JSON-RPC envelope sent for every call
///
/// ```json
/// {"jsonrpc": "2.0", "id": "1", "method": "ping", "params": {"apikey": "...", "id": "1"}}
/// ```
#[derive(Serialize)]
pub struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: &'static str,
    method: &'a str,
    params: JsonRpcParams<'a>,
}

#[derive(Serialize)]
struct JsonRpcParams<'a> {
    apikey: &'a str,
    id: &'static str,
}

impl<'a> JsonRpcRequest<'a> {
    /// Build the envelope for a method call
    pub fn new(method: &'a str, api_key: &'a str) -> Self {
        Self {
            jsonrpc: "2.0",
            id: "1",
            method,
            params: JsonRpcParams {
                apikey: api_key,
                id: "1",
            },
        }
    }
}

impl fmt::Debug for JsonRpcRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the API key never reaches logs
        f.debug_struct("JsonRpcRequest")
            .field("jsonrpc", &self.jsonrpc)
            .field("id", &self.id)
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

/// Client bound to one hub base URL and API key
#[derive(Clone)]
pub struct JeedomClient {
    http: Client,
    base_url: String,
    endpoint: String,
    api_key: String,
}

impl JeedomClient {
    /// Create a client with the default timeout
    pub fn new(base_url: &str, api_key: &str) -> ApiResult<Self> {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT)
    }

    /// Create a client with a request timeout
    pub fn with_timeout(base_url: &str, api_key: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.host_str().is_none() {
            return Err(ApiError::InvalidUrl {
                url: base_url,
                reason: "missing host".to_string(),
            });
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::HttpClient)?;

        Ok(Self {
            http,
            endpoint: format!("{base_url}{API_PATH}"),
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Hub base URL (used for deep links)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full JSON-RPC endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Call a JSON-RPC method and return its `result` member
    ///
    /// A missing `result` is returned as `Value::Null`.
    pub async fn call(&self, method: &str) -> ApiResult<Value> {
        let request = JsonRpcRequest::new(method, &self.api_key);
        debug!("Calling {:?} on {}", request, self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|source| ApiError::Unreachable {
                url: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::HttpStatus {
                url: self.endpoint.clone(),
                status,
            });
        }

        let raw_body = response
            .text()
            .await
            .map_err(|source| ApiError::Unreachable {
                url: self.endpoint.clone(),
                source,
            })?;
        trace!("'{}' raw response: {}", method, raw_body);

        Self::parse_body(method, &raw_body)
    }

    /// Check the hub answers on this URL
    pub async fn ping(&self) -> ApiResult<()> {
        let result = self.call(methods::PING).await?;
        debug!("Ping on {} answered {}", self.base_url, result);
        Ok(())
    }

    /// Get the hub version string
    pub async fn version(&self) -> ApiResult<String> {
        match self.call(methods::VERSION).await? {
            Value::String(version) => Ok(version),
            Value::Null => Err(ApiError::malformed(methods::VERSION, "missing result")),
            other => Ok(other.to_string()),
        }
    }

    fn parse_body(method: &str, raw_body: &str) -> ApiResult<Value> {
        // some plugins leak raw tabs into string values, which is invalid JSON
        let cleaned = raw_body.replace('\t', "");
        let body: Value = serde_json::from_str(&cleaned)
            .map_err(|e| ApiError::malformed(method, e.to_string()))?;

        let Value::Object(mut body) = body else {
            return Err(ApiError::malformed(method, "response is not a JSON object"));
        };

        if let Some(error) = body.remove("error").filter(|e| !e.is_null()) {
            return Err(Self::remote_error(error));
        }

        Ok(body.remove("result").unwrap_or(Value::Null))
    }

    fn remote_error(error: Value) -> ApiError {
        let code = match error.get("code") {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.parse().ok(),
            _ => None,
        };
        let message = match error.get("message") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => error.to_string(),
        };

        ApiError::RemoteError { code, message }
    }
}

impl fmt::Debug for JeedomClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JeedomClient")
            .field("base_url", &self.base_url)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
