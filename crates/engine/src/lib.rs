//! Adaptergen Engine Library
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.
//!
//! This library turns a handler registry (routes plus the types their handlers exchange) into
//! the pieces of a Go HTTP/JSON client package: flat type declarations, one method per route
//! version and the declared error tables.
//! It works only with in-memory data (no file I/O).
//!
//! # Example
//!
//! ```rust,no_run
//! use adaptergen_engine::{generate, load_registry, GeneratorConfig};
//!
//! let registry_yaml = r#"
//! routes:
//!   - path: /users/get
//!     versions:
//!       - version: 1
//!         input: int64
//!         output: User
//! types:
//!   User:
//!     name: User
//!     namespace: lazada_api/models
//!     kind: struct
//!     fields:
//!       - { name: ID, type: int, tags: { json: id } }
//! "#;
//!
//! let registry = load_registry(registry_yaml, None)?;
//! let code = generate(&registry, &GeneratorConfig::default())?;
//! assert_eq!(code.routes[0].output_type, "Lazada_api_models_User");
//! # Ok::<(), adaptergen_engine::GeneratorError>(())
//! ```

pub mod collector;
pub mod config;
pub mod emitter;
pub mod error;
pub mod generate;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod schemas;
pub mod types;
pub mod validator;
pub mod walker;

// Re-export the public API
pub use collector::RouteMetadata;
pub use config::GeneratorConfig;
pub use error::{GeneratorError, GeneratorResult, RegistryError};
pub use generate::{generate, GeneratedCode};
pub use registry::{load_registry, HandlerRegistry, StaticRegistry};
pub use resolver::{DegradedType, ANY_TYPE};
pub use validator::error::{ValidationError, ValidationResult};

/// Parse a registry document from YAML/JSON string
///
/// The document is only checked for its top-level shape; use [`validate_registry`] for a full
/// check and [`load_registry`] to build a registry from it.
///
/// # Errors
///
/// Returns `ParseError` if the input is invalid YAML/JSON or missing required fields.
pub fn parse_registry(content: &str) -> Result<serde_json::Value, GeneratorError> {
    parser::parse_registry(content).map_err(|e| GeneratorError::Parse(e.into()))
}

/// Validate a parsed registry document against the embedded schema and semantic rules
///
/// # Errors
///
/// Returns `ParseError` only if the embedded schema cannot be loaded; problems with the
/// document itself are reported in the returned `ValidationResult`.
pub fn validate_registry(
    file_path: &str,
    registry: &serde_json::Value,
) -> Result<ValidationResult, GeneratorError> {
    let validator = validator::Validator::new()?;
    Ok(validator.validate_registry(file_path, registry))
}
