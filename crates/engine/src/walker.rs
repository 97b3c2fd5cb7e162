/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Type graph walker.
 *
 * Expands route types into declarations. Types to declare are kept on a FIFO worklist fed by
 * the resolver's first sightings, so each internal type is declared exactly once and in a
 * deterministic order: roots in the order they are expanded, then members in field order.
 */

use std::collections::{BTreeMap, VecDeque};

use crate::config::GeneratorConfig;
use crate::emitter::declarations::{emit_alias, emit_struct, FieldLine};
use crate::error::{GeneratorError, GeneratorResult};
use crate::resolver::{DegradedType, NameResolver};
use crate::types::{TypeGraph, TypeId, TypeKind};

/// One emitted declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub code: String,
}

/// Everything a walk produced.
#[derive(Debug, Clone, Default)]
pub struct WalkOutput {
    pub declarations: Vec<Declaration>,
    /// Namespace -> qualifier of every external package referenced.
    pub imports: BTreeMap<String, String>,
    pub degraded: Vec<DegradedType>,
}

pub struct GraphWalker<'g, 'c> {
    graph: &'g TypeGraph,
    config: &'c GeneratorConfig,
    resolver: NameResolver<'c>,
    queue: VecDeque<TypeId>,
    declarations: Vec<Declaration>,
}

impl<'g, 'c> GraphWalker<'g, 'c> {
    #[must_use]
    pub fn new(graph: &'g TypeGraph, config: &'c GeneratorConfig) -> Self {
        Self {
            graph,
            config,
            resolver: NameResolver::new(config),
            queue: VecDeque::new(),
            declarations: Vec::new(),
        }
    }

    /// Declare every internal type reachable from `root` that has not been declared yet.
    ///
    /// Returns the name `root` is spelled with in generated code.
    ///
    /// # Errors
    ///
    /// Any unsupported type or naming collision met on the way aborts the walk.
    pub fn expand(&mut self, root: TypeId) -> GeneratorResult<String> {
        self.resolver.set_context(None);
        let resolution = self.resolver.resolve(self.graph, root)?;
        self.queue.extend(resolution.expand);
        while let Some(id) = self.queue.pop_front() {
            self.declare(id)?;
        }
        Ok(resolution.name.spelling)
    }

    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    #[must_use]
    pub fn finish(self) -> WalkOutput {
        let (imports, degraded) = self.resolver.into_parts();
        WalkOutput {
            declarations: self.declarations,
            imports,
            degraded,
        }
    }

    fn declare(&mut self, id: TypeId) -> GeneratorResult<()> {
        let graph = self.graph;
        let descriptor = graph.get(id);
        let name = self.resolver.resolve(graph, id)?.name.spelling;

        let code = match &descriptor.kind {
            TypeKind::Struct { fields } => {
                let mut lines = Vec::with_capacity(fields.len());
                for field in fields {
                    self.resolver
                        .set_context(Some(format!("{name}.{}", field.name)));
                    let type_name = self.resolve_member(field.ty)?;
                    lines.push(if field.embedded {
                        FieldLine::embedded(type_name)
                    } else {
                        FieldLine::named(
                            field.name.clone(),
                            type_name,
                            field.tag(&self.config.tag_keys).map(str::to_string),
                        )
                    });
                }
                self.resolver.set_context(None);
                Some(emit_struct(&name, &lines))
            }
            TypeKind::Slice { elem } => {
                self.resolver.set_context(Some(name.clone()));
                let structural = format!("[]{}", self.resolve_member(*elem)?);
                alias_unless_structural(&name, &structural)
            }
            TypeKind::Map { key, value } => {
                self.resolver.set_context(Some(name.clone()));
                let key = self.resolver.resolve_map_key(graph, *key)?;
                self.queue.extend(key.expand);
                let value = self.resolve_member(*value)?;
                let structural = format!("map[{}]{value}", key.name.spelling);
                alias_unless_structural(&name, &structural)
            }
            TypeKind::Pointer { pointee } => {
                self.resolver.set_context(Some(name.clone()));
                let pointee = self.resolve_member(*pointee)?;
                alias_unless_structural(&name, &pointee)
            }
            TypeKind::Primitive(primitive) => alias_unless_structural(&name, primitive.as_str()),
            TypeKind::Interface => {
                self.resolver.set_context(Some(name.clone()));
                let any = self.resolver.degrade("named interface".to_string());
                Some(emit_alias(&name, &any.spelling))
            }
            TypeKind::Unsupported { kind } => {
                return Err(GeneratorError::UnsupportedType(format!(
                    "{} has kind '{kind}' which cannot be generated",
                    descriptor.display_name()
                )));
            }
        };
        self.resolver.set_context(None);

        if let Some(code) = code {
            tracing::debug!(%name, kind = descriptor.kind.label(), "Declared type");
            self.declarations.push(Declaration { name, code });
        }
        Ok(())
    }

    fn resolve_member(&mut self, id: TypeId) -> GeneratorResult<String> {
        let resolution = self.resolver.resolve(self.graph, id)?;
        self.queue.extend(resolution.expand);
        Ok(resolution.name.spelling)
    }
}

/// A named composite only needs a declaration when its name differs from its spelling.
fn alias_unless_structural(name: &str, structural: &str) -> Option<String> {
    if name == structural {
        None
    } else {
        Some(emit_alias(name, structural))
    }
}
