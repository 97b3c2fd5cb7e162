/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use tera::{Context, Tera};

use crate::emitter::{template_engine, MethodPlan};
use crate::error::{GeneratorError, GeneratorResult};

const TEMPLATE_NAME: &str = "methods.go.tera";

/// Renders one client method per route.
pub struct MethodEmitter {
    tera: Tera,
}

impl MethodEmitter {
    /// # Errors
    ///
    /// Returns `Template` if the embedded template fails to load.
    pub fn new() -> GeneratorResult<Self> {
        Ok(Self {
            tera: template_engine(TEMPLATE_NAME, include_str!("templates/methods.go.tera"))?,
        })
    }

    /// Render the methods of `service` in plan order.
    ///
    /// # Errors
    ///
    /// Returns `Template` if rendering fails.
    pub fn render(&self, service: &str, methods: &[MethodPlan]) -> GeneratorResult<String> {
        let mut context = Context::new();
        context.insert("service", service);
        context.insert("methods", methods);
        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| GeneratorError::Template(format!("Failed to render methods: {e}")))
    }
}
