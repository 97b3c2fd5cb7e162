/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Serde model of a registry document.
 *
 * This is the on-disk shape only. `loader` turns it into a `TypeGraph` and route table.
 */

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryDocument {
    /// Display name of the service the routes belong to.
    #[serde(default)]
    pub service: Option<String>,
    pub routes: Vec<RouteDoc>,
    /// Named type definitions keyed by type id.
    #[serde(default)]
    pub types: BTreeMap<String, TypeDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDoc {
    pub path: String,
    pub versions: Vec<VersionDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionDoc {
    #[serde(deserialize_with = "string_or_number")]
    pub version: String,
    pub input: TypeRefDoc,
    pub output: TypeRefDoc,
    #[serde(default)]
    pub params: Vec<ParamDoc>,
    #[serde(default)]
    pub errors: Vec<ErrorDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDoc {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDoc {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A type reference: a type id / built-in name, or an inline anonymous definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeRefDoc {
    Name(String),
    Inline(Box<TypeDoc>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDoc {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    pub kind: String,
    #[serde(default)]
    pub fields: Vec<FieldDoc>,
    #[serde(default)]
    pub elem: Option<TypeRefDoc>,
    #[serde(default)]
    pub key: Option<TypeRefDoc>,
    #[serde(default)]
    pub value: Option<TypeRefDoc>,
    #[serde(default)]
    pub pointee: Option<TypeRefDoc>,
    /// Underlying primitive for `kind: primitive`.
    #[serde(default)]
    pub primitive: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRefDoc,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub embedded: bool,
}

/// YAML happily turns `version: 1` into a number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Version {
        Text(String),
        Integer(u64),
        Float(f64),
    }

    Ok(match Version::deserialize(deserializer)? {
        Version::Text(s) => s,
        Version::Integer(n) => n.to_string(),
        Version::Float(f) => f.to_string(),
    })
}
