/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use jsonschema::JSONSchema;
use serde_json::Value;

use crate::validator::error::{convert_jsonschema_error, ValidationError, ValidationResult};

/// Compiles the schema, validates the data, and appends the errors of `additional_validation`.
///
/// Semantic rules still run when the schema check fails so one pass reports everything.
pub fn validate_with_schema<F>(
    schema: &Value,
    file_path: &str,
    data: &Value,
    additional_validation: F,
) -> ValidationResult
where
    F: FnOnce(&str, &Value) -> Vec<ValidationError>,
{
    let compiled = match JSONSchema::compile(schema) {
        Ok(compiled) => compiled,
        Err(err) => {
            return ValidationResult::invalid(vec![ValidationError::new(
                file_path,
                format!("Failed to compile schema: {err}"),
            )]);
        }
    };

    let schema_errors: Vec<ValidationError> = if let Err(errors) = compiled.validate(data) {
        errors
            .map(|error| convert_jsonschema_error(file_path, &error))
            .collect()
    } else {
        Vec::new()
    };

    let additional_errors = additional_validation(file_path, data);

    ValidationResult::invalid([schema_errors, additional_errors].concat())
}
