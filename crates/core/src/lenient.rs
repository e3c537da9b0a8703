//! Forgiving field decoders for stored documents.
//!
//! Documents written by older clients can carry values of the wrong type in
//! optional fields (a numeric string in a pixel field, an alignment the
//! current enum no longer knows). Such a field decodes as unset so the rest
//! of the document still loads and the type default applies.
//!
//! Collections are decoded entry by entry: one unreadable list item or map
//! value is dropped on its own and the readable entries are kept.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode an optional field, treating unreadable values as `None`.
pub(crate) fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    match raw {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => match serde_json::from_value(value) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => {
                tracing::debug!(error = %e, "Dropping unreadable optional field");
                Ok(None)
            }
        },
    }
}

/// Decode a required-with-default field, falling back to `T::default()`.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(option(deserializer)?.unwrap_or_default())
}

/// Decode a list, dropping unreadable items. Null, missing or a non-list
/// value decodes as an empty list.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(option_list(deserializer)?.unwrap_or_default())
}

/// Decode an optional list, dropping unreadable items. Null, missing or a
/// non-list value decodes as `None`.
pub(crate) fn option_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(
            items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| match serde_json::from_value(item) {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        tracing::warn!(index, error = %e, "Dropping unreadable list item");
                        None
                    }
                })
                .collect(),
        )),
        Some(_) => {
            tracing::debug!("Dropping list field that is not a list");
            Ok(None)
        }
    }
}

/// Decode a map, dropping entries whose key or value is unreadable. Null,
/// missing or a non-object value decodes as an empty map.
pub(crate) fn map<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: DeserializeOwned + Ord,
    V: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Object(entries)) = raw else {
        return Ok(BTreeMap::new());
    };

    let mut out = BTreeMap::new();
    for (key, value) in entries {
        // A one-entry object goes through serde_json's map-key handling, so
        // numeric keys such as row indices parse from their string form.
        let mut single = serde_json::Map::new();
        single.insert(key.clone(), value);
        match serde_json::from_value::<BTreeMap<K, V>>(Value::Object(single)) {
            Ok(parsed) => out.extend(parsed),
            Err(e) => tracing::warn!(key = %key, error = %e, "Dropping unreadable map entry"),
        }
    }
    Ok(out)
}
