//! Versioned snapshot format for persisted collections.
//!
//! ```json
//! { "version": 1, "items": [ ... ] }
//! ```
//!
//! Older data directories hold a bare JSON array. Those still load and get
//! rewritten in the versioned layout on the next save. Snapshots written by a
//! newer build are refused instead of being silently truncated.

use crate::error::{KbError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotOut<'a, T> {
    version: u32,
    items: &'a [T],
}

pub fn encode<T: Serialize>(items: &[T]) -> Result<String> {
    let snapshot = SnapshotOut {
        version: SNAPSHOT_VERSION,
        items,
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(raw)? {
        Value::Array(items) => Ok(serde_json::from_value(Value::Array(items))?),
        Value::Object(mut map) => {
            let version = match map.get("version") {
                Some(v) => v
                    .as_u64()
                    .and_then(|v| u32::try_from(v).ok())
                    .ok_or_else(|| KbError::Store(format!("Invalid snapshot version: {}", v)))?,
                None => return Err(KbError::Store("Snapshot has no version".to_string())),
            };
            if version > SNAPSHOT_VERSION {
                return Err(KbError::UnsupportedSnapshot {
                    found: version,
                    supported: SNAPSHOT_VERSION,
                });
            }
            match map.remove("items") {
                Some(items) => Ok(serde_json::from_value(items)?),
                None => Ok(Vec::new()),
            }
        }
        other => Err(KbError::Store(format!(
            "Unexpected snapshot shape: {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
