/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Parser module for reading handler registry documents from YAML/JSON strings.
 * This module works only with in-memory data (no file I/O).
 */

pub mod error;
pub mod registry;
pub mod utils;

pub use error::ParseError as ParserError;
pub use registry::{parse_registry, parse_registry_from_string};
