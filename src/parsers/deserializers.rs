use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Convert fractional seconds since the Unix epoch into a UTC timestamp
fn from_epoch_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let millis = (seconds * 1000.0).round();
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

fn timestamp_from_value<E: Error>(value: &Value) -> Result<DateTime<Utc>, E> {
    match value {
        Value::Number(n) => {
            let seconds = n.as_f64().ok_or_else(|| E::custom("invalid timestamp"))?;
            from_epoch_seconds(seconds).ok_or_else(|| E::custom("timestamp out of range"))
        }
        Value::String(s) => {
            // Some exports write RFC3339 strings instead of epoch seconds
            s.parse::<DateTime<Utc>>()
                .map_err(|e| E::custom(format!("invalid RFC3339 timestamp: {}", e)))
        }
        _ => Err(E::custom("timestamp must be a number or string")),
    }
}

/// Deserialize a required timestamp given as epoch seconds (integer or fractional)
pub fn deserialize_epoch_seconds<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    timestamp_from_value(&value)
}

/// Deserialize an optional epoch-seconds timestamp, mapping `null` to `None`
pub fn deserialize_optional_epoch_seconds<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        other => timestamp_from_value(&other).map(Some),
    }
}
