/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use serde_json::Value;

/// Type guard to check if value is a record/object.
pub fn is_record(value: &Value) -> bool {
    value.is_object()
}

/// Type guard to check if value has a string property `key`.
pub fn string_member<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.as_object()?.get(key)?.as_str()
}

/// Type guard to check if value is a registry object with a routes array.
pub fn is_registry(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|obj| obj.get("routes"))
        .is_some_and(Value::is_array)
}

/// Route versions may be written as strings or numbers.
pub fn version_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
