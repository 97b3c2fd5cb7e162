/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Generation entry point.
 *
 * One call is one run: it owns a fresh resolver, so concurrent or repeated runs never see
 * each other's names.
 */

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use crate::collector::{collect_routes, RouteMetadata};
use crate::config::GeneratorConfig;
use crate::emitter::{plan_methods, ErrorEmitter, MethodEmitter};
use crate::error::GeneratorResult;
use crate::registry::HandlerRegistry;
use crate::resolver::{sanitize_identifier, DegradedType};
use crate::walker::{Declaration, GraphWalker, WalkOutput};

/// The pieces of a generated client package, ready for assembly.
#[derive(Debug, Clone, Default)]
pub struct GeneratedCode {
    /// Type declarations in first-sighting order.
    pub declarations: Vec<Declaration>,
    pub methods: String,
    pub errors: String,
    /// Namespaces of external types the declarations refer to, with the qualifier each is
    /// imported under.
    pub required_imports: BTreeMap<String, String>,
    pub routes: Vec<RouteMetadata>,
    pub degraded: Vec<DegradedType>,
}

impl GeneratedCode {
    /// All declarations concatenated.
    #[must_use]
    pub fn declarations_code(&self) -> String {
        self.declarations.iter().map(|d| d.code.as_str()).collect()
    }
}

/// Generate client code for every route of `registry`.
///
/// # Errors
///
/// Any unsupported type, naming collision, registry failure or template failure aborts the run;
/// nothing is returned in that case.
pub fn generate<R>(registry: &R, config: &GeneratorConfig) -> GeneratorResult<GeneratedCode>
where
    R: HandlerRegistry + ?Sized,
{
    let mut walker = GraphWalker::new(registry.type_graph(), config);
    let routes = collect_routes(registry, &mut walker)?;

    let plans = plan_methods(&routes)?;
    let service = sanitize_identifier(&config.service_name);
    let methods = MethodEmitter::new()?.render(&service, &plans)?;
    let errors = ErrorEmitter::new()?.render(&plans)?;

    let WalkOutput {
        declarations,
        imports,
        degraded,
    } = walker.finish();

    tracing::info!(
        routes = routes.len(),
        declarations = declarations.len(),
        imports = imports.len(),
        degraded = degraded.len(),
        "Generated client code"
    );

    Ok(GeneratedCode {
        declarations,
        methods,
        errors,
        required_imports: imports,
        routes,
        degraded,
    })
}
