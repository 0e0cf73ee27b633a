//! JSON encoding helpers for admin entities.
//!
//! The gateway encodes an empty array as `{}` in some responses, so array
//! fields are decoded leniently. Request bodies carry only present fields.

use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Decodes an array that may arrive as `{}` or `null`.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) if map.is_empty() => Ok(Vec::new()),
        Value::Array(_) => serde_json::from_value(value).map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("expected an array, got {other}"))),
    }
}

/// Like [`lenient_vec`] for optional fields: `null` stays absent, `{}` is
/// an empty array.
pub(crate) fn lenient_opt_vec<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::Object(map) if map.is_empty() => Ok(Some(Vec::new())),
        Value::Array(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("expected an array, got {other}"))),
    }
}

/// Encodes `entity` as a JSON object without the `omit` keys.
///
/// `None` fields are already skipped during serialization; explicit nulls
/// are dropped as well so absent and present stay distinct.
pub(crate) fn encode_body<T: Serialize>(
    entity: &T,
    omit: &[&str],
) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(entity)? {
        Value::Object(mut map) => {
            map.retain(|key, value| !value.is_null() && !omit.contains(&key.as_str()));
            Ok(map)
        }
        other => Err(serde_json::Error::custom(format!(
            "expected an object, got {other}"
        ))),
    }
}

/// Converts unix seconds from the wire into a UTC timestamp.
pub(crate) fn timestamp(seconds: Option<i64>) -> Option<DateTime<Utc>> {
    seconds.and_then(|s| DateTime::from_timestamp(s, 0))
}
