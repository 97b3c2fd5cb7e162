/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Type graph data model.
 *
 * Every type reachable from a handler lives in a `TypeGraph` arena and is addressed by a
 * `TypeId`. The id is the type's identity: two references to the same id are the same type,
 * which lets composites point back at their ancestors without owning them.
 */

use std::collections::BTreeMap;
use std::fmt;

/// Index of a type inside a `TypeGraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) usize);

impl TypeId {
    /// Raw arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Built-in scalar kinds of the target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
}

impl Primitive {
    pub const ALL: [Primitive; 17] = [
        Primitive::Bool,
        Primitive::Int,
        Primitive::Int8,
        Primitive::Int16,
        Primitive::Int32,
        Primitive::Int64,
        Primitive::Uint,
        Primitive::Uint8,
        Primitive::Uint16,
        Primitive::Uint32,
        Primitive::Uint64,
        Primitive::Uintptr,
        Primitive::Float32,
        Primitive::Float64,
        Primitive::Complex64,
        Primitive::Complex128,
        Primitive::String,
    ];

    /// Spelling of the primitive in generated code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Int => "int",
            Primitive::Int8 => "int8",
            Primitive::Int16 => "int16",
            Primitive::Int32 => "int32",
            Primitive::Int64 => "int64",
            Primitive::Uint => "uint",
            Primitive::Uint8 => "uint8",
            Primitive::Uint16 => "uint16",
            Primitive::Uint32 => "uint32",
            Primitive::Uint64 => "uint64",
            Primitive::Uintptr => "uintptr",
            Primitive::Float32 => "float32",
            Primitive::Float64 => "float64",
            Primitive::Complex64 => "complex64",
            Primitive::Complex128 => "complex128",
            Primitive::String => "string",
        }
    }

    /// Parse a primitive from its spelling. `byte` and `rune` are accepted as aliases.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "byte" => Some(Primitive::Uint8),
            "rune" => Some(Primitive::Int32),
            _ => Self::ALL.iter().copied().find(|p| p.as_str() == name),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: TypeId,
    /// Struct tag values keyed by tag key (`json`, `key`, ...).
    pub tags: BTreeMap<String, String>,
    /// Embedded (anonymous) field whose members are promoted.
    pub embedded: bool,
}

impl Field {
    /// Value of the first tag key in `keys` that is present on this field.
    #[must_use]
    pub fn tag<'a>(&'a self, keys: &[String]) -> Option<&'a str> {
        keys.iter()
            .find_map(|key| self.tags.get(key))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Shape of a type node.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Struct { fields: Vec<Field> },
    Slice { elem: TypeId },
    Map { key: TypeId, value: TypeId },
    Pointer { pointee: TypeId },
    Primitive(Primitive),
    Interface,
    /// Kinds the generator cannot express (channels, functions, ...).
    Unsupported { kind: String },
}

impl TypeKind {
    /// Short lowercase label used in logs and errors.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            TypeKind::Struct { .. } => "struct",
            TypeKind::Slice { .. } => "slice",
            TypeKind::Map { .. } => "map",
            TypeKind::Pointer { .. } => "pointer",
            TypeKind::Primitive(p) => p.as_str(),
            TypeKind::Interface => "interface",
            TypeKind::Unsupported { kind } => kind,
        }
    }
}

/// A normalized view of one type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// Declared name; `None` for anonymous composites.
    pub name: Option<String>,
    /// Originating package path; `None` for built-ins.
    pub namespace: Option<String>,
    pub kind: TypeKind,
}

impl TypeDescriptor {
    #[must_use]
    pub fn anonymous(kind: TypeKind) -> Self {
        Self {
            name: None,
            namespace: None,
            kind,
        }
    }

    #[must_use]
    pub fn named(name: impl Into<String>, namespace: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: Some(name.into()),
            namespace: Some(namespace.into()),
            kind,
        }
    }

    /// Built-in primitive, e.g. `int`.
    #[must_use]
    pub fn builtin(primitive: Primitive) -> Self {
        Self {
            name: Some(primitive.as_str().to_string()),
            namespace: None,
            kind: TypeKind::Primitive(primitive),
        }
    }

    /// `namespace.Name` for diagnostics, or the bare name for built-ins.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.namespace, &self.name) {
            (Some(ns), Some(name)) => format!("{ns}.{name}"),
            (None, Some(name)) => name.clone(),
            _ => format!("<anonymous {}>", self.kind.label()),
        }
    }

    /// Primitive node whose declared name is not the primitive spelling itself.
    #[must_use]
    pub fn is_named_primitive(&self) -> bool {
        match (&self.kind, &self.name) {
            (TypeKind::Primitive(p), Some(name)) => name != p.as_str() || self.namespace.is_some(),
            _ => false,
        }
    }
}

/// Arena holding every type of a registry.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    nodes: Vec<TypeDescriptor>,
    builtins: BTreeMap<&'static str, TypeId>,
    interface: Option<TypeId>,
}

impl TypeGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its id.
    pub fn add(&mut self, descriptor: TypeDescriptor) -> TypeId {
        let id = TypeId(self.nodes.len());
        self.nodes.push(descriptor);
        id
    }

    /// Reserve an id to be filled in later with `set`. Used for forward and cyclic references.
    pub fn reserve(&mut self) -> TypeId {
        self.add(TypeDescriptor::anonymous(TypeKind::Interface))
    }

    /// Replace the node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this graph.
    pub fn set(&mut self, id: TypeId, descriptor: TypeDescriptor) {
        self.nodes[id.0] = descriptor;
    }

    /// Shared node for a built-in primitive.
    pub fn builtin(&mut self, primitive: Primitive) -> TypeId {
        if let Some(&id) = self.builtins.get(primitive.as_str()) {
            return id;
        }
        let id = self.add(TypeDescriptor::builtin(primitive));
        self.builtins.insert(primitive.as_str(), id);
        id
    }

    /// Shared node for the empty interface.
    pub fn interface(&mut self) -> TypeId {
        if let Some(id) = self.interface {
            return id;
        }
        let id = self.add(TypeDescriptor::anonymous(TypeKind::Interface));
        self.interface = Some(id);
        id
    }

    pub fn slice_of(&mut self, elem: TypeId) -> TypeId {
        self.add(TypeDescriptor::anonymous(TypeKind::Slice { elem }))
    }

    pub fn map_of(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.add(TypeDescriptor::anonymous(TypeKind::Map { key, value }))
    }

    pub fn pointer_to(&mut self, pointee: TypeId) -> TypeId {
        self.add(TypeDescriptor::anonymous(TypeKind::Pointer { pointee }))
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this graph.
    #[must_use]
    pub fn get(&self, id: TypeId) -> &TypeDescriptor {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn try_get(&self, id: TypeId) -> Option<&TypeDescriptor> {
        self.nodes.get(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
