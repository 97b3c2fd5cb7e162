/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Name resolution for the type graph.
 *
 * Decides whether a type is imported or redeclared, assigns canonical names to redeclared types
 * and remembers what it has already seen during one generation run.
 */

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, GeneratorResult};
use crate::types::{TypeDescriptor, TypeGraph, TypeId, TypeKind};

/// Spelling used for types the generator cannot describe precisely.
pub const ANY_TYPE: &str = "interface{}";

/// Standard packages the generated client refers to, with the names it uses for them.
///
/// These qualifiers are never handed to another import.
pub const CLIENT_IMPORTS: [(&str, &str); 6] = [
    ("bytes", "bytes"),
    ("context", "context"),
    ("encoding/json", "json"),
    ("errors", "errors"),
    ("fmt", "fmt"),
    ("net/http", "http"),
];

const GO_KEYWORDS: [&str; 25] = [
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range", "return",
    "select", "struct", "switch", "type", "var",
];

/// How a resolved name relates to the generated package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameClass {
    /// Lives in another package and is imported.
    External,
    /// Redeclared in the generated package under a canonical name.
    Internal,
    /// Spelled structurally or as a built-in; needs no declaration of its own.
    Inline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub spelling: String,
    pub class: NameClass,
}

impl ResolvedName {
    fn inline(spelling: impl Into<String>) -> Self {
        Self {
            spelling: spelling.into(),
            class: NameClass::Inline,
        }
    }
}

/// Result of resolving one type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub name: ResolvedName,
    /// Internal types seen for the first time while resolving; each must be declared.
    pub expand: Vec<TypeId>,
}

/// A place where type information was replaced by `interface{}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedType {
    /// Declaration and field the type was found in, or `<root>` for route types.
    pub location: String,
    pub reason: String,
}

/// Per-run naming state.
///
/// One resolver belongs to exactly one generation run. It is never shared between runs, so
/// names registered by one run cannot leak into another.
#[derive(Debug)]
pub struct NameResolver<'c> {
    config: &'c GeneratorConfig,
    /// Canonical name -> type that owns it.
    declared: HashMap<String, TypeId>,
    memo: HashMap<TypeId, ResolvedName>,
    /// Namespace -> qualifier, for external namespaces referenced in this run.
    imports: BTreeMap<String, String>,
    /// Namespace -> qualifier, including the client's own imports.
    qualifiers: HashMap<String, String>,
    taken: HashSet<String>,
    degraded: Vec<DegradedType>,
    /// Anonymous nodes currently being spelled, to reject anonymous cycles.
    in_progress: HashSet<TypeId>,
    context: Option<String>,
}

impl<'c> NameResolver<'c> {
    #[must_use]
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self {
            config,
            declared: HashMap::new(),
            memo: HashMap::new(),
            imports: BTreeMap::new(),
            qualifiers: CLIENT_IMPORTS
                .iter()
                .map(|(path, qualifier)| ((*path).to_string(), (*qualifier).to_string()))
                .collect(),
            taken: CLIENT_IMPORTS
                .iter()
                .map(|(_, qualifier)| (*qualifier).to_string())
                .collect(),
            degraded: Vec::new(),
            in_progress: HashSet::new(),
            context: None,
        }
    }

    /// Resolve a type reference to its spelling in generated code.
    ///
    /// Internal named types are registered on first sight, before any of their members are
    /// looked at, and returned in `expand`. Later sightings return the same name and an empty
    /// `expand`, which is what makes self-referencing types terminate.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` for kinds that cannot be generated and `NamingCollision` when two
    /// distinct types map to the same canonical name.
    pub fn resolve(&mut self, graph: &TypeGraph, id: TypeId) -> GeneratorResult<Resolution> {
        if let Some(name) = self.memo.get(&id) {
            return Ok(Resolution {
                name: name.clone(),
                expand: Vec::new(),
            });
        }

        let descriptor = graph.try_get(id).ok_or_else(|| {
            GeneratorError::UnsupportedType(format!("dangling type id {}", id.index()))
        })?;

        let degraded_before = self.degraded.len();
        let mut expand = Vec::new();
        let name = match descriptor.name.as_deref() {
            Some(declared) => self.resolve_named(graph, id, descriptor, declared, &mut expand)?,
            None => self.resolve_anonymous(graph, id, descriptor, &mut expand)?,
        };

        // Degraded spellings are not cached so every occurrence gets reported.
        if self.degraded.len() == degraded_before {
            self.memo.insert(id, name.clone());
        }

        Ok(Resolution { name, expand })
    }

    /// Resolve a map key. Keys must be primitives or named primitives.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` for composite, pointer or interface keys.
    pub fn resolve_map_key(&mut self, graph: &TypeGraph, key: TypeId) -> GeneratorResult<Resolution> {
        let descriptor = graph.try_get(key).ok_or_else(|| {
            GeneratorError::UnsupportedType(format!("dangling map key id {}", key.index()))
        })?;
        match descriptor.kind {
            TypeKind::Primitive(_) => self.resolve(graph, key),
            _ => Err(GeneratorError::UnsupportedType(format!(
                "map key {} must be a primitive or named primitive, got {}",
                descriptor.display_name(),
                descriptor.kind.label()
            ))),
        }
    }

    /// Set the declaration/field currently being walked, for degradation reports.
    pub(crate) fn set_context(&mut self, context: Option<String>) {
        self.context = context;
    }

    /// Record that type information was lost and return the placeholder spelling.
    pub(crate) fn degrade(&mut self, reason: String) -> ResolvedName {
        let location = self.context.clone().unwrap_or_else(|| "<root>".to_string());
        tracing::warn!(%location, %reason, "Unknown type has been replaced with {ANY_TYPE}");
        self.degraded.push(DegradedType { location, reason });
        ResolvedName::inline(ANY_TYPE)
    }

    /// Namespaces of every external type resolved so far, with their qualifiers.
    #[must_use]
    pub fn imports(&self) -> &BTreeMap<String, String> {
        &self.imports
    }

    #[must_use]
    pub fn degraded(&self) -> &[DegradedType] {
        &self.degraded
    }

    /// Number of canonical names registered in this run.
    #[must_use]
    pub fn declared_count(&self) -> usize {
        self.declared.len()
    }

    /// Consume the resolver, keeping the run's imports and degradation reports.
    #[must_use]
    pub fn into_parts(self) -> (BTreeMap<String, String>, Vec<DegradedType>) {
        (self.imports, self.degraded)
    }

    fn resolve_named(
        &mut self,
        graph: &TypeGraph,
        id: TypeId,
        descriptor: &TypeDescriptor,
        declared: &str,
        expand: &mut Vec<TypeId>,
    ) -> GeneratorResult<ResolvedName> {
        let Some(namespace) = descriptor.namespace.as_deref().filter(|ns| !ns.is_empty()) else {
            // Built-in such as `int` or `error`.
            return Ok(ResolvedName::inline(declared));
        };

        if !self.config.is_internal(namespace) {
            tracing::debug!(namespace, name = declared, "Using external type");
            let qualifier = self.import(namespace);
            return Ok(ResolvedName {
                spelling: format!("{qualifier}.{declared}"),
                class: NameClass::External,
            });
        }

        let canonical = canonical_name(namespace, declared);
        match self.declared.get(&canonical) {
            Some(&owner) if owner != id => {
                return Err(GeneratorError::NamingCollision {
                    name: canonical,
                    first: graph.get(owner).display_name(),
                    second: descriptor.display_name(),
                });
            }
            Some(_) => {}
            None => {
                tracing::debug!(name = %canonical, "Registering internal type");
                self.declared.insert(canonical.clone(), id);
                expand.push(id);
            }
        }

        Ok(ResolvedName {
            spelling: canonical,
            class: NameClass::Internal,
        })
    }

    /// Qualifier for `namespace`, unique within the run. A clash with an earlier import gets a
    /// numeric suffix: `models`, `models2`, ...
    fn import(&mut self, namespace: &str) -> String {
        let qualifier = match self.qualifiers.get(namespace) {
            Some(qualifier) => qualifier.clone(),
            None => {
                let base = package_qualifier(namespace);
                let mut qualifier = base.clone();
                let mut suffix = 2;
                while self.taken.contains(&qualifier) {
                    qualifier = format!("{base}{suffix}");
                    suffix += 1;
                }
                tracing::debug!(namespace, %qualifier, "Importing package");
                self.taken.insert(qualifier.clone());
                self.qualifiers.insert(namespace.to_string(), qualifier.clone());
                qualifier
            }
        };
        self.imports.insert(namespace.to_string(), qualifier.clone());
        qualifier
    }

    fn resolve_anonymous(
        &mut self,
        graph: &TypeGraph,
        id: TypeId,
        descriptor: &TypeDescriptor,
        expand: &mut Vec<TypeId>,
    ) -> GeneratorResult<ResolvedName> {
        if !self.in_progress.insert(id) {
            return Err(GeneratorError::UnsupportedType(format!(
                "anonymous {} type refers to itself",
                descriptor.kind.label()
            )));
        }
        let spelled = self.spell_anonymous(graph, descriptor, expand);
        self.in_progress.remove(&id);
        spelled
    }

    fn spell_anonymous(
        &mut self,
        graph: &TypeGraph,
        descriptor: &TypeDescriptor,
        expand: &mut Vec<TypeId>,
    ) -> GeneratorResult<ResolvedName> {
        match &descriptor.kind {
            TypeKind::Slice { elem } => {
                let elem = self.resolve(graph, *elem)?;
                expand.extend(elem.expand);
                Ok(ResolvedName::inline(format!("[]{}", elem.name.spelling)))
            }
            TypeKind::Map { key, value } => {
                let key = self.resolve_map_key(graph, *key)?;
                expand.extend(key.expand);
                let value = self.resolve(graph, *value)?;
                expand.extend(value.expand);
                Ok(ResolvedName::inline(format!(
                    "map[{}]{}",
                    key.name.spelling, value.name.spelling
                )))
            }
            TypeKind::Pointer { pointee } => {
                let pointee = self.resolve(graph, *pointee)?;
                expand.extend(pointee.expand);
                Ok(pointee.name)
            }
            TypeKind::Primitive(primitive) => Ok(ResolvedName::inline(primitive.as_str())),
            TypeKind::Interface => Ok(self.degrade("interface".to_string())),
            TypeKind::Struct { .. } => Ok(self.degrade("anonymous struct".to_string())),
            TypeKind::Unsupported { kind } => Err(GeneratorError::UnsupportedType(format!(
                "anonymous {kind} type cannot be generated"
            ))),
        }
    }
}

/// Canonical name of an internal type: title-cased package path joined with the type name.
///
/// `lazada_api/models` + `User` gives `Lazada_api_models_User`.
#[must_use]
pub fn canonical_name(namespace: &str, name: &str) -> String {
    let path = title_case(&namespace.replace('/', "_"));
    sanitize_identifier(&format!("{path}_{}", title_case(name)))
}

/// Upper-case the first letter of every word. Letters, digits and `_` continue a word.
fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut word_start = true;
    for c in s.chars() {
        if word_start {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        word_start = !(c.is_alphanumeric() || c == '_');
    }
    result
}

/// Replace every character that cannot appear in an identifier with `_`.
#[must_use]
pub fn sanitize_identifier(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Package name used to qualify an imported type: the last path segment, skipping a
/// trailing major version segment such as `v2`. Segments that are not usable as a Go
/// identifier get a `pkg` prefix.
#[must_use]
pub fn package_qualifier(namespace: &str) -> String {
    let mut segments = namespace.rsplit('/').filter(|s| !s.is_empty());
    let last = segments.next().unwrap_or(namespace);
    let is_major_version =
        last.len() > 1 && last.starts_with('v') && last[1..].chars().all(|c| c.is_ascii_digit());
    let segment = if is_major_version {
        segments.next().unwrap_or(last)
    } else {
        last
    };
    let qualifier = sanitize_identifier(segment);
    let usable = qualifier.chars().next().is_some_and(|c| !c.is_ascii_digit())
        && !GO_KEYWORDS.contains(&qualifier.as_str());
    if usable {
        qualifier
    } else {
        format!("pkg{qualifier}")
    }
}
