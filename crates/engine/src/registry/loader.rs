/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Builds a `StaticRegistry` from a registry document.
 *
 * Every entry of `types` gets its id reserved up front, so definitions can refer to each other
 * in any order and cycles between named types need no special handling.
 */

use std::collections::{BTreeMap, HashMap};

use crate::error::{GeneratorResult, ParseError, RegistryError};
use crate::parser::parse_registry_from_string;
use crate::registry::document::{RegistryDocument, TypeDoc, TypeRefDoc};
use crate::registry::{DeclaredError, HandlerParameter, RouteVersion, StaticRegistry};
use crate::types::{Field, Primitive, TypeDescriptor, TypeGraph, TypeId, TypeKind};

/// Spellings that mean "any value".
const ANY_SPELLINGS: [&str; 2] = ["interface{}", "any"];

/// Parse and load a registry document from a YAML/JSON string.
///
/// # Errors
///
/// Returns a `Parse` error when the content is not a well-formed registry document and a
/// `Registry` error when it references unknown types or repeats a route version.
pub fn load_registry(content: &str, file_path: Option<&str>) -> GeneratorResult<StaticRegistry> {
    let value = parse_registry_from_string(content, file_path).map_err(ParseError::from)?;
    let document: RegistryDocument = serde_json::from_value(value)
        .map_err(|e| ParseError::InvalidFieldType(format!("Invalid registry: {e}")))?;
    Ok(build_registry(&document)?)
}

/// Lower a parsed document into a registry.
///
/// # Errors
///
/// See [`load_registry`].
pub fn build_registry(document: &RegistryDocument) -> Result<StaticRegistry, RegistryError> {
    let mut lowering = Lowering::new(&document.types);
    lowering.lower_definitions()?;

    let mut pending = Vec::new();
    for route in &document.routes {
        for version in &route.versions {
            let context = format!("{} version {}", route.path, version.version);
            let input = lowering.lower_ref(&version.input, &format!("{context} input"))?;
            let output = lowering.lower_ref(&version.output, &format!("{context} output"))?;
            pending.push((
                route.path.clone(),
                RouteVersion {
                    version: version.version.clone(),
                    input,
                    output,
                    errors: version
                        .errors
                        .iter()
                        .map(|e| DeclaredError {
                            code: e.code.clone(),
                            description: e.description.clone(),
                        })
                        .collect(),
                    params: version
                        .params
                        .iter()
                        .map(|p| HandlerParameter {
                            name: p.name.clone(),
                            type_name: p.type_name.clone(),
                            required: p.required,
                            description: p.description.clone(),
                        })
                        .collect(),
                },
            ));
        }
    }

    let mut registry = StaticRegistry::new(lowering.graph);
    if let Some(service) = &document.service {
        registry = registry.with_service(service.clone());
    }
    for (path, version) in pending {
        registry.register(&path, version)?;
    }

    tracing::debug!(
        routes = registry.route_count(),
        types = document.types.len(),
        "Loaded handler registry"
    );
    Ok(registry)
}

struct Lowering<'d> {
    definitions: &'d BTreeMap<String, TypeDoc>,
    ids: HashMap<&'d str, TypeId>,
    graph: TypeGraph,
}

impl<'d> Lowering<'d> {
    fn new(definitions: &'d BTreeMap<String, TypeDoc>) -> Self {
        Self {
            definitions,
            ids: HashMap::new(),
            graph: TypeGraph::new(),
        }
    }

    fn lower_definitions(&mut self) -> Result<(), RegistryError> {
        let definitions = self.definitions;
        for id in definitions.keys() {
            let reserved = self.graph.reserve();
            self.ids.insert(id.as_str(), reserved);
        }
        for (id, doc) in definitions {
            let descriptor = self.lower_type(doc, id)?;
            self.graph.set(self.ids[id.as_str()], descriptor);
        }
        Ok(())
    }

    fn lower_ref(&mut self, reference: &TypeRefDoc, context: &str) -> Result<TypeId, RegistryError> {
        match reference {
            TypeRefDoc::Name(name) => self.lookup(name, context),
            TypeRefDoc::Inline(doc) => {
                let descriptor = self.lower_type(doc, context)?;
                Ok(self.graph.add(descriptor))
            }
        }
    }

    /// Definitions shadow built-in spellings.
    fn lookup(&mut self, name: &str, context: &str) -> Result<TypeId, RegistryError> {
        if let Some(&id) = self.ids.get(name) {
            return Ok(id);
        }
        if ANY_SPELLINGS.contains(&name) {
            return Ok(self.graph.interface());
        }
        if let Some(primitive) = Primitive::from_name(name) {
            return Ok(self.graph.builtin(primitive));
        }
        Err(RegistryError::UnknownType(format!(
            "'{name}' referenced by {context}"
        )))
    }

    fn lower_type(&mut self, doc: &TypeDoc, context: &str) -> Result<TypeDescriptor, RegistryError> {
        let kind = match doc.kind.as_str() {
            "struct" => {
                let mut fields = Vec::with_capacity(doc.fields.len());
                for field in &doc.fields {
                    let ty = self.lower_ref(&field.ty, &format!("{context}.{}", field.name))?;
                    fields.push(Field {
                        name: field.name.clone(),
                        ty,
                        tags: field.tags.clone(),
                        embedded: field.embedded,
                    });
                }
                TypeKind::Struct { fields }
            }
            "slice" | "array" => TypeKind::Slice {
                elem: self.member(doc.elem.as_ref(), "elem", context)?,
            },
            "map" => TypeKind::Map {
                key: self.member(doc.key.as_ref(), "key", context)?,
                value: self.member(doc.value.as_ref(), "value", context)?,
            },
            "pointer" | "ptr" => TypeKind::Pointer {
                pointee: self.member(doc.pointee.as_ref(), "pointee", context)?,
            },
            "primitive" => {
                let spelling = doc.primitive.as_deref().ok_or_else(|| {
                    RegistryError::InvalidType(format!(
                        "{context}: primitive kind requires a 'primitive' member"
                    ))
                })?;
                let primitive = Primitive::from_name(spelling).ok_or_else(|| {
                    RegistryError::InvalidType(format!(
                        "{context}: '{spelling}' is not a primitive type"
                    ))
                })?;
                TypeKind::Primitive(primitive)
            }
            "interface" => TypeKind::Interface,
            other => match Primitive::from_name(other) {
                Some(primitive) => TypeKind::Primitive(primitive),
                None => TypeKind::Unsupported {
                    kind: other.to_string(),
                },
            },
        };

        match (&doc.name, &doc.namespace) {
            (Some(name), Some(namespace)) => Ok(TypeDescriptor::named(name, namespace, kind)),
            // Only built-ins such as `int` or `error` live outside a package.
            (Some(name), None) if matches!(kind, TypeKind::Primitive(_) | TypeKind::Interface) => {
                Ok(TypeDescriptor {
                    name: Some(name.clone()),
                    namespace: None,
                    kind,
                })
            }
            (Some(name), None) => Err(RegistryError::InvalidType(format!(
                "{context}: {} type '{name}' has no namespace",
                kind.label()
            ))),
            (None, Some(_)) => Err(RegistryError::InvalidType(format!(
                "{context}: a namespace is given but the type has no name"
            ))),
            (None, None) => Ok(TypeDescriptor::anonymous(kind)),
        }
    }

    fn member(
        &mut self,
        reference: Option<&TypeRefDoc>,
        member: &str,
        context: &str,
    ) -> Result<TypeId, RegistryError> {
        let reference = reference.ok_or_else(|| {
            RegistryError::InvalidType(format!("{context}: missing '{member}' member"))
        })?;
        self.lower_ref(reference, &format!("{context} {member}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneratorError;
    use crate::registry::HandlerRegistry;

    const REGISTRY: &str = r#"
service: ExternalAPI
routes:
  - path: /users/get
    versions:
      - version: 1
        input: GetUserArgs
        output: User
        params:
          - name: user_id
            type: int64
            required: true
        errors:
          - code: USER_NOT_FOUND
            description: No such user
types:
  GetUserArgs:
    name: GetUserArgs
    namespace: lazada_api/handlers/users
    kind: struct
    fields:
      - name: UserID
        type: int64
        tags:
          key: user_id
  User:
    name: User
    namespace: lazada_api/models
    kind: struct
    fields:
      - name: Friends
        type:
          kind: slice
          elem:
            kind: pointer
            pointee: User
      - name: Extra
        type: any
"#;

    #[test]
    fn test_load_registry_from_yaml() {
        let registry = load_registry(REGISTRY, Some("registry.yaml")).unwrap();
        assert_eq!(registry.service(), Some("ExternalAPI"));
        assert_eq!(registry.list_routes().unwrap(), vec!["/users/get".to_string()]);

        let versions = registry.route_versions("/users/get").unwrap();
        assert_eq!(versions.len(), 1);
        let version = &versions[0];
        assert_eq!(version.version, "1");
        assert_eq!(version.errors[0].code, "USER_NOT_FOUND");
        assert_eq!(version.params[0].type_name.as_deref(), Some("int64"));

        let graph = registry.type_graph();
        let user = graph.get(version.output);
        assert_eq!(user.display_name(), "lazada_api/models.User");
        let TypeKind::Struct { fields } = &user.kind else {
            panic!("User should be a struct");
        };
        let TypeKind::Slice { elem } = graph.get(fields[0].ty).kind else {
            panic!("Friends should be a slice");
        };
        // The cycle closes on the same id.
        assert_eq!(graph.get(elem).kind, TypeKind::Pointer { pointee: version.output });
        assert_eq!(graph.get(fields[1].ty).kind, TypeKind::Interface);
    }

    #[test]
    fn test_unknown_reference_is_an_error() {
        let yaml = r#"
routes:
  - path: /users/get
    versions:
      - version: v1
        input: Missing
        output: string
"#;
        let err = load_registry(yaml, None).unwrap_err();
        match err {
            GeneratorError::Registry(RegistryError::UnknownType(msg)) => {
                assert!(msg.contains("Missing"));
                assert!(msg.contains("/users/get version v1 input"));
            }
            other => panic!("Expected UnknownType, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind_loads_as_unsupported() {
        let yaml = r#"
routes:
  - path: /events/subscribe
    versions:
      - version: 1
        input: Stream
        output: string
types:
  Stream:
    name: Stream
    namespace: lazada_api/events
    kind: chan
"#;
        let registry = load_registry(yaml, None).unwrap();
        let versions = registry.route_versions("/events/subscribe").unwrap();
        assert_eq!(
            registry.type_graph().get(versions[0].input).kind,
            TypeKind::Unsupported { kind: "chan".to_string() }
        );
    }

    #[test]
    fn test_primitive_kinds() {
        let yaml = r#"
routes:
  - path: /ids
    versions:
      - version: 1
        input: UserID
        output: Score
types:
  UserID:
    name: UserID
    namespace: lazada_api/models
    kind: primitive
    primitive: int64
  Score:
    name: Score
    namespace: lazada_api/models
    kind: float64
"#;
        let registry = load_registry(yaml, None).unwrap();
        let version = &registry.route_versions("/ids").unwrap()[0];
        let graph = registry.type_graph();
        assert_eq!(graph.get(version.input).kind, TypeKind::Primitive(Primitive::Int64));
        assert_eq!(graph.get(version.output).kind, TypeKind::Primitive(Primitive::Float64));
    }

    #[test]
    fn test_missing_member_is_invalid() {
        let yaml = r#"
routes: []
types:
  Broken:
    name: Broken
    namespace: lazada_api/models
    kind: map
    key: string
"#;
        let err = load_registry(yaml, None).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::Registry(RegistryError::InvalidType(ref msg)) if msg.contains("value")
        ));
    }

    #[test]
    fn test_named_struct_without_namespace_is_rejected() {
        let yaml = r#"
routes:
  - path: /users/get
    versions:
      - { version: 1, input: string, output: U }
types:
  U:
    name: User
    kind: struct
    fields:
      - { name: ID, type: int }
"#;
        let err = load_registry(yaml, None).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::Registry(RegistryError::InvalidType(ref msg)) if msg.contains("'User' has no namespace")
        ));
    }

    #[test]
    fn test_named_builtins_need_no_namespace() {
        let yaml = r#"
routes:
  - path: /ping
    versions:
      - { version: 1, input: Count, output: Failure }
types:
  Count:
    name: int
    kind: primitive
    primitive: int
  Failure:
    name: error
    kind: interface
"#;
        let registry = load_registry(yaml, None).unwrap();
        assert_eq!(registry.route_count(), 1);
    }

    #[test]
    fn test_duplicate_route_version_is_rejected() {
        let yaml = r#"
routes:
  - path: /ping
    versions:
      - { version: 1, input: string, output: string }
  - path: /ping
    versions:
      - { version: "1", input: string, output: string }
"#;
        let err = load_registry(yaml, None).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::Registry(RegistryError::DuplicateRoute(_))
        ));
    }

    #[test]
    fn test_malformed_document_is_a_parse_error() {
        let err = load_registry("routes:\n  - path: /ping\n", None).unwrap_err();
        assert!(matches!(err, GeneratorError::Parse(_)));
    }
}
