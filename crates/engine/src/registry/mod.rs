/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Handler registry: the routes to generate methods for and the types they exchange.
 *
 * The engine only talks to a registry through the `HandlerRegistry` trait. `StaticRegistry` is
 * the in-memory implementation built from a registry document by `load_registry`.
 */

pub mod document;
pub mod loader;

use std::collections::HashMap;

use crate::error::RegistryError;
use crate::types::{TypeGraph, TypeId};

pub use loader::{build_registry, load_registry};

/// Source of routes and their reflected types.
pub trait HandlerRegistry {
    /// Arena every `TypeId` handed out by this registry points into.
    fn type_graph(&self) -> &TypeGraph;

    /// Route paths in a stable order.
    fn list_routes(&self) -> Result<Vec<String>, RegistryError>;

    /// Versions registered under `route`.
    fn route_versions(&self, route: &str) -> Result<Vec<RouteVersion>, RegistryError>;
}

/// Error code a handler version may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredError {
    pub code: String,
    pub description: Option<String>,
}

/// A documented handler parameter. Rendered into the method's doc comment only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerParameter {
    pub name: String,
    pub type_name: Option<String>,
    pub required: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteVersion {
    pub version: String,
    pub input: TypeId,
    pub output: TypeId,
    pub errors: Vec<DeclaredError>,
    pub params: Vec<HandlerParameter>,
}

/// Registry held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    service: Option<String>,
    graph: TypeGraph,
    /// Paths in first-registration order.
    order: Vec<String>,
    routes: HashMap<String, Vec<RouteVersion>>,
}

impl StaticRegistry {
    #[must_use]
    pub fn new(graph: TypeGraph) -> Self {
        Self {
            graph,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Service name the document declared, if any.
    #[must_use]
    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    /// Mutable access to the arena, for building types before registering routes.
    pub fn graph_mut(&mut self) -> &mut TypeGraph {
        &mut self.graph
    }

    /// Register a route version. Versions of a path that is already known are appended to it.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateRoute` when the same path and version is registered twice, and
    /// `UnknownType` when a type id does not belong to this registry's graph.
    pub fn register(&mut self, path: &str, version: RouteVersion) -> Result<(), RegistryError> {
        for id in [version.input, version.output] {
            if self.graph.try_get(id).is_none() {
                return Err(RegistryError::UnknownType(format!(
                    "type id {} used by {path} version {}",
                    id.index(),
                    version.version
                )));
            }
        }

        let versions = match self.routes.get_mut(path) {
            Some(versions) => versions,
            None => {
                self.order.push(path.to_string());
                self.routes.entry(path.to_string()).or_default()
            }
        };
        if versions.iter().any(|v| v.version == version.version) {
            return Err(RegistryError::DuplicateRoute(format!(
                "{path} version {}",
                version.version
            )));
        }
        versions.push(version);
        Ok(())
    }

    #[must_use]
    pub fn route_count(&self) -> usize {
        self.order.len()
    }
}

impl HandlerRegistry for StaticRegistry {
    fn type_graph(&self) -> &TypeGraph {
        &self.graph
    }

    fn list_routes(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self.order.clone())
    }

    fn route_versions(&self, route: &str) -> Result<Vec<RouteVersion>, RegistryError> {
        self.routes
            .get(route)
            .cloned()
            .ok_or_else(|| RegistryError::RouteNotFound(route.to_string()))
    }
}
