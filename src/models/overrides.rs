use serde_json::{Map, Value};

use crate::error::PlatformError;
use super::config::ModelConfigOverrides;

/// Parses `key=value` assignments into a JSON object.
///
/// Values are read as JSON when possible (`640`, `true`, `[3,6]`) and kept
/// as plain strings otherwise, so `device=cuda` needs no quoting.
pub fn parse_assignments<S: AsRef<str>>(assignments: &[S]) -> Result<Map<String, Value>, PlatformError> {
    let mut map = Map::new();
    for assignment in assignments {
        let assignment = assignment.as_ref();
        let (key, raw) = assignment.split_once('=').ok_or_else(|| {
            PlatformError::InvalidConfiguration(format!("Expected key=value, got: {}", assignment))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(PlatformError::InvalidConfiguration(format!(
                "Missing key in assignment: {}",
                assignment
            )));
        }

        let raw = raw.trim();
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        map.insert(key.to_string(), value);
    }
    Ok(map)
}

/// Converts parsed assignments into typed model overrides.
pub fn model_overrides(map: Map<String, Value>) -> Result<ModelConfigOverrides, PlatformError> {
    Ok(serde_json::from_value(Value::Object(map))?)
}
