//! Serde helpers

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a field, substituting `T::default()` when the value has the wrong shape
///
/// Only the input itself must be valid JSON; a mismatched type (`"checked": "yes"`,
/// `"rich_text": null`) never propagates as an error.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
