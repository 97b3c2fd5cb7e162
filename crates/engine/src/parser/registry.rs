/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Parser for handler registry documents from YAML/JSON strings.
 */

use crate::parser::error::ParseError;
use crate::parser::utils::parse_yaml_or_json;
use serde_json::Value;

/// Parse a registry document from a YAML/JSON string.
///
/// # Errors
///
/// Returns `ParseError` if:
/// - The content is invalid YAML/JSON
/// - The content is not an object
/// - The "routes" field is missing or not an array
/// - The "types" field is present but not an object
pub fn parse_registry(content: &str) -> Result<Value, ParseError> {
    parse_registry_from_string(content, None)
}

/// Parse a registry document with an optional file path for format detection.
///
/// # Errors
///
/// See [`parse_registry`].
pub fn parse_registry_from_string(
    content: &str,
    file_path: Option<&str>,
) -> Result<Value, ParseError> {
    let parsed_data = parse_yaml_or_json(content, file_path)?;

    let Some(registry_obj) = parsed_data.as_object() else {
        return Err(ParseError::InvalidFieldType(
            "Invalid registry: expected an object".to_string(),
        ));
    };

    match registry_obj.get("routes") {
        None => {
            return Err(ParseError::MissingField(
                "Invalid registry: missing required field \"routes\"".to_string(),
            ));
        }
        Some(routes) if !routes.is_array() => {
            return Err(ParseError::InvalidFieldType(
                "Invalid registry: \"routes\" must be an array".to_string(),
            ));
        }
        Some(_) => {}
    }

    if let Some(types) = registry_obj.get("types") {
        if !types.is_object() {
            return Err(ParseError::InvalidFieldType(
                "Invalid registry: \"types\" must be an object keyed by type id".to_string(),
            ));
        }
    }

    // Full structural validation is the schema validator's job
    Ok(parsed_data)
}
