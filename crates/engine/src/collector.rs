/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Route collection: walks every registered route version and records what the method
 * emitters need to know about it.
 */

use std::collections::HashSet;

use crate::error::{GeneratorResult, RegistryError};
use crate::registry::{DeclaredError, HandlerParameter, HandlerRegistry};
use crate::walker::GraphWalker;

/// What one (path, version) pair looks like in generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMetadata {
    /// Route key the client posts to, e.g. `/users/get/v1`.
    pub route: String,
    pub path: String,
    pub version: String,
    pub input_type: String,
    pub output_type: String,
    pub errors: Vec<DeclaredError>,
    pub params: Vec<HandlerParameter>,
}

/// Key of a route version. A purely numeric version is written `vN`.
#[must_use]
pub fn route_key(path: &str, version: &str) -> String {
    let path = path.trim_end_matches('/');
    if !version.is_empty() && version.chars().all(|c| c.is_ascii_digit()) {
        format!("{path}/v{version}")
    } else {
        format!("{path}/{version}")
    }
}

/// Expand the types of every route version, output first, and collect route metadata.
///
/// # Errors
///
/// Registry errors are passed through unchanged. A route key produced twice is a
/// `DuplicateRoute` error; walk errors abort the collection.
pub fn collect_routes<R>(
    registry: &R,
    walker: &mut GraphWalker<'_, '_>,
) -> GeneratorResult<Vec<RouteMetadata>>
where
    R: HandlerRegistry + ?Sized,
{
    let mut routes = Vec::new();
    let mut seen = HashSet::new();

    for path in registry.list_routes()? {
        for version in registry.route_versions(&path)? {
            let route = route_key(&path, &version.version);
            if !seen.insert(route.clone()) {
                return Err(RegistryError::DuplicateRoute(route).into());
            }

            let output_type = walker.expand(version.output)?;
            let input_type = walker.expand(version.input)?;
            tracing::debug!(%route, %input_type, %output_type, "Collected route");

            routes.push(RouteMetadata {
                route,
                path: path.clone(),
                version: version.version,
                input_type,
                output_type,
                errors: version.errors,
                params: version.params,
            });
        }
    }

    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::error::GeneratorError;
    use crate::registry::{RouteVersion, StaticRegistry};
    use crate::types::{Field, Primitive, TypeDescriptor, TypeGraph, TypeKind};
    use std::collections::BTreeMap;

    fn version(version: &str, input: crate::types::TypeId, output: crate::types::TypeId) -> RouteVersion {
        RouteVersion {
            version: version.to_string(),
            input,
            output,
            errors: Vec::new(),
            params: Vec::new(),
        }
    }

    #[test]
    fn test_route_key() {
        assert_eq!(route_key("/users/get", "1"), "/users/get/v1");
        assert_eq!(route_key("/users/get", "v2"), "/users/get/v2");
        assert_eq!(route_key("/users/get/", "beta"), "/users/get/beta");
    }

    #[test]
    fn test_shared_type_is_declared_once() {
        let config = GeneratorConfig::default();
        let mut graph = TypeGraph::new();
        let int = graph.builtin(Primitive::Int);
        let user = graph.add(TypeDescriptor::named(
            "User",
            "lazada_api/models",
            TypeKind::Struct {
                fields: vec![Field {
                    name: "ID".to_string(),
                    ty: int,
                    tags: BTreeMap::new(),
                    embedded: false,
                }],
            },
        ));
        let mut registry = StaticRegistry::new(graph);
        registry.register("/users/get", version("1", int, user)).unwrap();
        registry.register("/users/me", version("1", int, user)).unwrap();

        let mut walker = GraphWalker::new(registry.type_graph(), &config);
        let routes = collect_routes(&registry, &mut walker).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].output_type, "Lazada_api_models_User");
        assert_eq!(routes[1].output_type, "Lazada_api_models_User");
        assert_eq!(routes[0].input_type, "int");
        assert_eq!(walker.declarations().len(), 1);
    }

    #[test]
    fn test_output_is_expanded_before_input() {
        let config = GeneratorConfig::default();
        let mut graph = TypeGraph::new();
        let args = graph.add(TypeDescriptor::named(
            "Args",
            "lazada_api/handlers",
            TypeKind::Struct { fields: Vec::new() },
        ));
        let reply = graph.add(TypeDescriptor::named(
            "Reply",
            "lazada_api/handlers",
            TypeKind::Struct { fields: Vec::new() },
        ));
        let mut registry = StaticRegistry::new(graph);
        registry.register("/ping", version("1", args, reply)).unwrap();

        let mut walker = GraphWalker::new(registry.type_graph(), &config);
        collect_routes(&registry, &mut walker).unwrap();
        let names: Vec<&str> = walker.declarations().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Lazada_api_handlers_Reply", "Lazada_api_handlers_Args"]);
    }

    #[test]
    fn test_colliding_route_keys_are_rejected() {
        let config = GeneratorConfig::default();
        let mut graph = TypeGraph::new();
        let string = graph.builtin(Primitive::String);
        let mut registry = StaticRegistry::new(graph);
        registry.register("/ping", version("1", string, string)).unwrap();
        registry.register("/ping", version("v1", string, string)).unwrap();

        let mut walker = GraphWalker::new(registry.type_graph(), &config);
        let err = collect_routes(&registry, &mut walker).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::Registry(RegistryError::DuplicateRoute(ref key)) if key == "/ping/v1"
        ));
    }

    struct FailingRegistry(TypeGraph);

    impl HandlerRegistry for FailingRegistry {
        fn type_graph(&self) -> &TypeGraph {
            &self.0
        }

        fn list_routes(&self) -> Result<Vec<String>, RegistryError> {
            Ok(vec!["/broken".to_string()])
        }

        fn route_versions(&self, route: &str) -> Result<Vec<RouteVersion>, RegistryError> {
            Err(RegistryError::Access(format!("metadata for {route} is unavailable")))
        }
    }

    #[test]
    fn test_registry_errors_pass_through() {
        let config = GeneratorConfig::default();
        let registry = FailingRegistry(TypeGraph::new());
        let mut walker = GraphWalker::new(registry.type_graph(), &config);
        let err = collect_routes(&registry, &mut walker).unwrap_err();
        assert_eq!(err.to_string(), "Registry error: metadata for /broken is unavailable");
    }
}
