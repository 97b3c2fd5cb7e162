/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use serde::{Deserialize, Serialize};

pub const DEFAULT_PACKAGE_NAME: &str = "adapter";
pub const DEFAULT_SERVICE_NAME: &str = "ExternalAPI";
pub const DEFAULT_INTERNAL_PREFIX: &str = "lazada_api";

/// Settings for one generation run.
///
/// The engine treats these as opaque input; callers build a fresh value per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Package name of the generated code.
    pub package_name: String,
    /// Name of the generated client type.
    pub service_name: String,
    /// Package path prefixes whose types are copied into the generated package.
    /// Anything else is imported.
    pub internal_prefixes: Vec<String>,
    /// Struct tag keys consulted for the emitted `json` tag, in priority order.
    pub tag_keys: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            internal_prefixes: vec![DEFAULT_INTERNAL_PREFIX.to_string()],
            tag_keys: vec!["json".to_string(), "key".to_string()],
        }
    }
}

impl GeneratorConfig {
    /// True when `namespace` starts with one of the internal prefixes.
    #[must_use]
    pub fn is_internal(&self, namespace: &str) -> bool {
        self.internal_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && namespace.starts_with(prefix.as_str()))
    }
}
