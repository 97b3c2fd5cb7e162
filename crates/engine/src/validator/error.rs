/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use serde::{Deserialize, Serialize};

/// One problem found in a registry document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationError {
    pub file: String,
    pub message: String,
    /// JSON pointer into the document, e.g. `/routes/0/versions/1`.
    pub path: Option<String>,
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(file: &str, message: impl Into<String>) -> Self {
        Self {
            file: file.to_string(),
            message: message.into(),
            path: None,
            suggestion: None,
        }
    }

    #[must_use]
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a valid result with no errors
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Create a result from a list of errors; an empty list is valid
    pub fn invalid(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Convert a jsonschema ValidationError to our ValidationError format.
///
/// `jsonschema` reports no line/column information, only the instance path.
pub fn convert_jsonschema_error(
    file_path: &str,
    error: &jsonschema::ValidationError,
) -> ValidationError {
    let instance_path = error.instance_path.to_string();

    ValidationError {
        file: file_path.to_string(),
        message: error.to_string(),
        path: if instance_path.is_empty() {
            None
        } else {
            Some(instance_path)
        },
        suggestion: generate_suggestion_from_error(error),
    }
}

/// Generate a helpful suggestion based on jsonschema error.
fn generate_suggestion_from_error(error: &jsonschema::ValidationError) -> Option<String> {
    // Use Debug formatting to get the keyword name
    let keyword = format!("{:?}", error.kind);

    if keyword.contains("Required") {
        Some("Add the missing required field".to_string())
    } else if keyword.contains("AdditionalProperties") {
        Some("Remove the unknown field or check its spelling".to_string())
    } else if keyword.contains("OneOf") {
        Some("A type reference is either a type id string or an inline type definition".to_string())
    } else if keyword.contains("Type") {
        Some("Check the field type matches the schema".to_string())
    } else if keyword.contains("Pattern") {
        Some("Check that the value matches the required pattern".to_string())
    } else {
        None
    }
}
