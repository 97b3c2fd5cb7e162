/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};
use strsim::levenshtein;

use crate::types::Primitive;
use crate::validator::common::validate_with_schema;
use crate::validator::error::{ValidationError, ValidationResult};
use crate::validator::type_guards::{is_record, is_registry, string_member, version_string};

/// Validate a registry document against the registry schema.
pub fn validate_registry(schema: &Value, file_path: &str, data: &Value) -> ValidationResult {
    validate_with_schema(schema, file_path, data, validate_registry_rules)
}

/// Rules the JSON schema cannot express.
fn validate_registry_rules(file_path: &str, data: &Value) -> Vec<ValidationError> {
    if !is_registry(data) {
        return Vec::new();
    }

    let empty_routes = Vec::new();
    let routes = data
        .get("routes")
        .and_then(Value::as_array)
        .unwrap_or(&empty_routes);
    let empty_types = Map::new();
    let types = data
        .get("types")
        .and_then(Value::as_object)
        .unwrap_or(&empty_types);

    let mut errors = Vec::new();
    errors.extend(validate_duplicate_route_versions(file_path, routes));
    errors.extend(validate_duplicate_type_names(file_path, types));

    let mut references = ReferenceCheck {
        file_path,
        types,
        errors: Vec::new(),
    };
    for (route_index, route) in routes.iter().enumerate() {
        let versions = route.get("versions").and_then(Value::as_array);
        for (version_index, version) in versions.into_iter().flatten().enumerate() {
            let path = format!("/routes/{route_index}/versions/{version_index}");
            for side in ["input", "output"] {
                if let Some(reference) = version.get(side) {
                    references.check_reference(reference, &format!("{path}/{side}"));
                }
            }
        }
    }
    for (id, definition) in types {
        references.check_definition(definition, &format!("/types/{}", escape_pointer(id)));
    }
    errors.extend(references.errors);

    errors
}

/// A path may list several versions, and may even appear twice, but every
/// (path, version) pair must be unique.
fn validate_duplicate_route_versions(file_path: &str, routes: &[Value]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (route_index, route) in routes.iter().enumerate() {
        let Some(path) = string_member(route, "path") else {
            continue;
        };
        let versions = route.get("versions").and_then(Value::as_array);
        for (version_index, version) in versions.into_iter().flatten().enumerate() {
            let Some(number) = version.get("version").and_then(version_string) else {
                continue;
            };
            if !seen.insert((path.to_string(), number.clone())) {
                errors.push(
                    ValidationError::new(
                        file_path,
                        format!("Duplicate route version: '{path}' version '{number}'"),
                    )
                    .at(format!("/routes/{route_index}/versions/{version_index}/version"))
                    .suggest("Each path and version pair must be registered once."),
                );
            }
        }
    }

    errors
}

/// Two definitions naming the same (namespace, name) would claim the same generated name.
fn validate_duplicate_type_names(file_path: &str, types: &Map<String, Value>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut owners: HashMap<(&str, &str), &str> = HashMap::new();

    for (id, definition) in types {
        let Some(name) = string_member(definition, "name") else {
            continue;
        };
        let namespace = string_member(definition, "namespace").unwrap_or("");
        if let Some(first) = owners.insert((namespace, name), id) {
            let display = if namespace.is_empty() {
                name.to_string()
            } else {
                format!("{namespace}.{name}")
            };
            errors.push(
                ValidationError::new(
                    file_path,
                    format!("Type '{display}' is defined by both '{first}' and '{id}'"),
                )
                .at(format!("/types/{}/name", escape_pointer(id)))
                .suggest("Reference the existing definition instead of redefining it."),
            );
        }
    }

    errors
}

struct ReferenceCheck<'a> {
    file_path: &'a str,
    types: &'a Map<String, Value>,
    errors: Vec<ValidationError>,
}

impl ReferenceCheck<'_> {
    fn check_reference(&mut self, reference: &Value, path: &str) {
        match reference {
            Value::String(name) => self.check_name(name, path),
            Value::Object(_) => self.check_definition(reference, path),
            // Shape errors are reported by the schema.
            _ => {}
        }
    }

    fn check_name(&mut self, name: &str, path: &str) {
        if self.types.contains_key(name)
            || matches!(name, "interface{}" | "any")
            || Primitive::from_name(name).is_some()
        {
            return;
        }

        let mut error = ValidationError::new(self.file_path, format!("Unknown type reference '{name}'"))
            .at(path);
        let similar = find_similar_type_ids(self.types, name);
        if !similar.is_empty() {
            error = error.suggest(format!("Did you mean: {}?", similar.join(", ")));
        } else {
            error = error.suggest("Define the type under 'types' or use a built-in type.");
        }
        self.errors.push(error);
    }

    fn check_definition(&mut self, definition: &Value, path: &str) {
        if !is_record(definition) {
            return;
        }
        let kind = string_member(definition, "kind").unwrap_or("");

        if string_member(definition, "namespace").is_some()
            && string_member(definition, "name").is_none()
        {
            self.errors.push(
                ValidationError::new(self.file_path, "A type with a namespace must have a name")
                    .at(format!("{path}/name")),
            );
        }

        if let (Some(name), None) = (
            string_member(definition, "name"),
            string_member(definition, "namespace"),
        ) {
            if !matches!(kind, "primitive" | "interface") && Primitive::from_name(kind).is_none() {
                self.errors.push(
                    ValidationError::new(
                        self.file_path,
                        format!("Type '{name}' must have a namespace unless it is a primitive or interface"),
                    )
                    .at(format!("{path}/namespace")),
                );
            }
        }

        let required: &[&str] = match kind {
            "slice" | "array" => &["elem"],
            "map" => &["key", "value"],
            "pointer" | "ptr" => &["pointee"],
            "primitive" => &["primitive"],
            _ => &[],
        };
        for member in required {
            if definition.get(*member).is_none() {
                self.errors.push(
                    ValidationError::new(
                        self.file_path,
                        format!("A '{kind}' type requires a '{member}' member"),
                    )
                    .at(path.to_string()),
                );
            }
        }

        if kind == "primitive" {
            if let Some(spelling) = string_member(definition, "primitive") {
                if Primitive::from_name(spelling).is_none() {
                    self.errors.push(
                        ValidationError::new(
                            self.file_path,
                            format!("'{spelling}' is not a primitive type"),
                        )
                        .at(format!("{path}/primitive")),
                    );
                }
            }
        }

        if kind != "struct" && definition.get("fields").is_some() {
            self.errors.push(
                ValidationError::new(self.file_path, format!("Only struct types have fields, got '{kind}'"))
                    .at(format!("{path}/fields")),
            );
        }

        for member in ["elem", "key", "value", "pointee"] {
            if let Some(reference) = definition.get(member) {
                self.check_reference(reference, &format!("{path}/{member}"));
            }
        }
        let fields = definition.get("fields").and_then(Value::as_array);
        for (index, field) in fields.into_iter().flatten().enumerate() {
            if let Some(reference) = field.get("type") {
                self.check_reference(reference, &format!("{path}/fields/{index}/type"));
            }
        }
    }
}

fn find_similar_type_ids(types: &Map<String, Value>, name: &str) -> Vec<String> {
    let mut similar: Vec<(String, usize)> = types
        .keys()
        .filter_map(|id| {
            let distance = levenshtein(name, id);
            // If distance is small relative to name length, consider it similar
            (distance > 0 && distance <= name.len().max(id.len()) / 2).then(|| (id.clone(), distance))
        })
        .collect();
    similar.sort_by_key(|(_, d)| *d);
    similar.into_iter().take(3).map(|(id, _)| id).collect()
}

/// Escape a map key for use inside a JSON pointer.
fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}
