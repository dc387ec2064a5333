//! Battery warning/danger collector

use serde_json::{Map, Value};
use tracing::debug;

use crate::client::{methods, JeedomClient};
use crate::error::{ApiError, ApiResult};

/// Battery level at or below which an equipment is in danger, whatever the
/// hub reports
pub const MIN_DANGER_LEVEL: u32 = 5;

/// Battery alert totals over every equipment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatteryAlerts {
    /// Sum of `batterywarning` (zero when warnings are ignored)
    pub warning: u32,
    /// Sum of `batterydanger`, with the low-level override applied
    pub danger: u32,
}

/// Fetch every equipment and total their battery alerts
pub async fn battery_alerts(
    client: &JeedomClient,
    ignore_warning: bool,
) -> ApiResult<BatteryAlerts> {
    let result = client.call(methods::EQUIPMENTS).await?;
    tally_battery_alerts(&result, ignore_warning)
}

/// Total the battery alerts of an `eqLogic::all` result
///
/// Equipments without a non-empty `status` object, or missing one of
/// `batterywarning`, `batterydanger` and `battery`, are skipped. A field
/// that is present but not a number fails the whole call.
pub fn tally_battery_alerts(result: &Value, ignore_warning: bool) -> ApiResult<BatteryAlerts> {
    let equipments: &[Value] = match result {
        Value::Array(items) => items.as_slice(),
        Value::Null => Default::default(),
        _ => {
            return Err(ApiError::malformed(
                methods::EQUIPMENTS,
                "result is not a list",
            ))
        }
    };

    let mut alerts = BatteryAlerts::default();
    for equipment in equipments {
        let Some(status) = equipment
            .get("status")
            .and_then(Value::as_object)
            .filter(|status| !status.is_empty())
        else {
            continue;
        };

        let Some((warning, mut danger, level)) = read_battery_fields(status)? else {
            debug!(
                "Skipping equipment {} without battery information",
                equipment_name(equipment)
            );
            continue;
        };

        if danger == 0 && level <= MIN_DANGER_LEVEL {
            debug!(
                "Equipment {} battery at {}%, forcing danger",
                equipment_name(equipment),
                level
            );
            danger = 1;
        }

        if !ignore_warning {
            alerts.warning = alerts.warning.saturating_add(warning);
        }
        alerts.danger = alerts.danger.saturating_add(danger);
    }

    Ok(alerts)
}

/// `(batterywarning, batterydanger, battery)`, or `None` when one is missing
fn read_battery_fields(status: &Map<String, Value>) -> ApiResult<Option<(u32, u32, u32)>> {
    let warning = read_number(status, "batterywarning")?;
    let danger = read_number(status, "batterydanger")?;
    let level = read_number(status, "battery")?;

    Ok(match (warning, danger, level) {
        (Some(warning), Some(danger), Some(level)) => Some((warning, danger, level)),
        _ => None,
    })
}

/// Read an unsigned integer given as a JSON number or a numeric string
///
/// Missing, `null` and empty-string fields are `None`.
fn read_number(status: &Map<String, Value>, field: &str) -> ApiResult<Option<u32>> {
    let not_a_number = |value: &Value| {
        ApiError::malformed(
            methods::EQUIPMENTS,
            format!("'{field}' is not a number: {value}"),
        )
    };

    let Some(value) = status.get(field) else {
        return Ok(None);
    };

    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s.trim().parse().map(Some).map_err(|_| not_a_number(value)),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|i| u32::try_from(i).ok())
            .map(Some)
            .ok_or_else(|| not_a_number(value)),
        _ => Err(not_a_number(value)),
    }
}

fn equipment_name(equipment: &Value) -> &str {
    equipment
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
}
