/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
use serde_json::Value;

use crate::error::ParseError;

/// Embed the registry schema at compile time
const REGISTRY_SCHEMA_JSON: &str = include_str!("../schemas/registry.schema.v1.json");

/// Load the registry document schema
///
/// Returns the parsed JSON schema as a `serde_json::Value`.
///
/// # Errors
///
/// Returns `InvalidJson` if the embedded schema does not parse.
pub fn load_registry_schema() -> Result<Value, ParseError> {
    serde_json::from_str(REGISTRY_SCHEMA_JSON)
        .map_err(|e| ParseError::InvalidJson(format!("embedded registry schema: {e}")))
}
