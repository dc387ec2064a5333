//! Pending update and unread message counters

use serde_json::Value;

use crate::client::{methods, JeedomClient};
use crate::error::{ApiError, ApiResult};

/// Update status meaning "up to date"
const STATUS_OK: &str = "ok";

/// Count plugins and core components with a pending update
pub async fn pending_updates(client: &JeedomClient) -> ApiResult<u32> {
    let result = client.call(methods::UPDATES).await?;
    count_pending_updates(&result)
}

/// Count the unread messages of the message center
pub async fn unread_messages(client: &JeedomClient) -> ApiResult<u32> {
    let result = client.call(methods::MESSAGES).await?;
    count_messages(&result)
}

/// Count `update::all` entries whose `status` is present and not `"ok"`
pub fn count_pending_updates(result: &Value) -> ApiResult<u32> {
    let updates = as_list(methods::UPDATES, result)?;
    let pending = updates
        .iter()
        .filter(|update| match update.get("status") {
            Some(Value::String(status)) => status != STATUS_OK,
            Some(_) => true,
            None => false,
        })
        .count();
    Ok(saturating_count(pending))
}

/// Number of entries of a `message::all` result, 0 when absent
pub fn count_messages(result: &Value) -> ApiResult<u32> {
    let messages = as_list(methods::MESSAGES, result)?;
    Ok(saturating_count(messages.len()))
}

fn as_list<'a>(method: &str, result: &'a Value) -> ApiResult<&'a [Value]> {
    match result {
        Value::Array(items) => Ok(items.as_slice()),
        Value::Null => Ok(Default::default()),
        _ => Err(ApiError::malformed(method, "result is not a list")),
    }
}

fn saturating_count(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
