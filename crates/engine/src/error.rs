/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
use thiserror::Error;

/// Top-level error type for the generator
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// A type the engine cannot represent. Aborts the whole run.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Two distinct types were assigned the same canonical name.
    #[error("Naming collision: '{name}' is claimed by both {first} and {second}")]
    NamingCollision {
        name: String,
        first: String,
        second: String,
    },

    #[error("Template error: {0}")]
    Template(String),
}

/// Parse errors for YAML/JSON registry documents
///
/// This is a wrapper around the parser module's `ParseError` to keep the
/// parser internals out of the public API.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid YAML: {0}")]
    InvalidYaml(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid field type: {0}")]
    InvalidFieldType(String),
}

impl From<crate::parser::error::ParseError> for ParseError {
    fn from(err: crate::parser::error::ParseError) -> Self {
        match err {
            crate::parser::error::ParseError::InvalidYaml(msg) => Self::InvalidYaml(msg),
            crate::parser::error::ParseError::InvalidJson(msg) => Self::InvalidJson(msg),
            crate::parser::error::ParseError::MissingField(msg) => Self::MissingField(msg),
            crate::parser::error::ParseError::InvalidFieldType(msg) => Self::InvalidFieldType(msg),
        }
    }
}

/// Errors raised by a handler registry implementation.
///
/// The engine never retries these; they are handed to the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Unknown type reference: {0}")]
    UnknownType(String),

    #[error("Duplicate route version: {0}")]
    DuplicateRoute(String),

    #[error("Invalid type definition: {0}")]
    InvalidType(String),

    #[error("{0}")]
    Access(String),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;
