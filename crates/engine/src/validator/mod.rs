/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

pub mod common;
pub mod error;
pub mod registry;
pub mod type_guards;

#[cfg(test)]
mod tests;

use serde_json::Value;

use crate::error::ParseError;
use crate::schemas;
use crate::validator::error::{ValidationError, ValidationResult};
use crate::validator::registry::validate_registry as validate_registry_impl;

/// Validator for handler registry documents.
/// Checks documents against the embedded JSON schema and the rules the schema cannot express.
pub struct Validator {
    registry_schema: Value,
}

impl Validator {
    /// Create a new Validator instance with the embedded schema.
    ///
    /// # Errors
    ///
    /// Returns `InvalidJson` if the embedded schema does not parse.
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            registry_schema: schemas::load_registry_schema()?,
        })
    }

    /// Create a new Validator instance with a custom schema.
    pub fn with_schema(registry_schema: Value) -> Self {
        Self { registry_schema }
    }

    /// Validate a parsed registry document.
    pub fn validate_registry(&self, file_path: &str, data: &Value) -> ValidationResult {
        validate_registry_impl(&self.registry_schema, file_path, data)
    }

    /// Format validation errors for display.
    pub fn format_errors(&self, errors: &[ValidationError]) -> String {
        if errors.is_empty() {
            return String::new();
        }

        let mut error_lines = vec!["✗ Validation failed\n".to_string()];

        for error in errors {
            error_lines.push(error.file.clone());
            error_lines.push(format!("  Error: {}", error.message));

            if let Some(path) = &error.path {
                error_lines.push(format!("  Path: {path}"));
            }

            if let Some(suggestion) = &error.suggestion {
                error_lines.push(format!("  Suggestion: {suggestion}"));
            }

            error_lines.push(String::new());
        }

        error_lines.join("\n")
    }
}
