//! Serializes the item collection to a single key of a [`KeyValueStore`].
//!
//! The stored blob is a JSON array of `{id, text, completed, order}`
//! objects. Loading never fails: missing data is an empty list, and
//! corrupt data is logged and treated as missing.

use std::collections::HashSet;

use serde_json::Value;

use crate::io::store::{KeyValueStore, StoreError};
use crate::model::item::{Item, ValidationMode};

/// Load all items stored under `key`.
pub fn load(store: &dyn KeyValueStore, key: &str, mode: ValidationMode) -> Vec<Item> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::error!("failed to read stored items under '{}': {}", key, e);
            return Vec::new();
        }
    };
    if raw.is_empty() {
        return Vec::new();
    }

    let records = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(records)) => records,
        Ok(other) => {
            log::error!(
                "failed to parse stored items under '{}': expected an array, found {}",
                key,
                json_kind(&other)
            );
            return Vec::new();
        }
        Err(e) => {
            log::error!("failed to parse stored items under '{}': {}", key, e);
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match Item::from_untrusted(record, mode) {
            Ok(item) => {
                if seen.insert(item.id.clone()) {
                    items.push(item);
                } else {
                    log::warn!("skipping stored item {}: duplicate id '{}'", index, item.id);
                }
            }
            Err(e) => log::warn!("skipping stored item {}: {}", index, e),
        }
    }
    items
}

/// Serialize every item and overwrite the blob under `key`.
pub fn save<'a, I>(store: &mut dyn KeyValueStore, key: &str, items: I) -> Result<(), StoreError>
where
    I: IntoIterator<Item = &'a Item>,
{
    let items: Vec<&Item> = items.into_iter().collect();
    let blob = serde_json::to_string(&items)?;
    store.set(key, &blob)?;
    log::debug!("saved {} items under '{}'", items.len(), key);
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
