/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use crate::validator::error::ValidationError;
use crate::validator::Validator;
use serde_json::{json, Value};

fn users_registry() -> Value {
    json!({
        "routes": [
            {
                "path": "/users/get",
                "versions": [
                    {
                        "version": 1,
                        "input": "GetUserArgs",
                        "output": "User",
                        "params": [{"name": "user_id", "type": "int64", "required": true}],
                        "errors": [{"code": "USER_NOT_FOUND"}]
                    }
                ]
            }
        ],
        "types": {
            "GetUserArgs": {
                "name": "GetUserArgs",
                "namespace": "lazada_api/handlers/users",
                "kind": "struct",
                "fields": [{"name": "UserID", "type": "int64", "tags": {"key": "user_id"}}]
            },
            "User": {
                "name": "User",
                "namespace": "lazada_api/models",
                "kind": "struct",
                "fields": [
                    {"name": "ID", "type": "int", "tags": {"json": "id"}},
                    {"name": "Profile", "type": {"kind": "pointer", "pointee": "Profile"}}
                ]
            },
            "Profile": {
                "name": "Profile",
                "namespace": "lazada_api/models",
                "kind": "struct",
                "fields": [{"name": "Bio", "type": "string"}]
            }
        }
    })
}

#[test]
fn test_validate_valid_registry() {
    let validator = Validator::new().unwrap();
    let result = validator.validate_registry("registry.yaml", &users_registry());
    assert!(result.valid, "Unexpected errors: {:?}", result.errors);
    assert!(result.errors.is_empty());
}

#[test]
fn test_validate_missing_required_fields() {
    let validator = Validator::new().unwrap();
    let data = json!({
        "routes": [{"path": "/users/get", "versions": [{"version": "1", "input": "string"}]}]
    });
    let result = validator.validate_registry("registry.yaml", &data);
    assert!(!result.valid);
    assert!(result.errors.iter().any(|e| e.message.contains("output")));
}

#[test]
fn test_validate_unknown_field_is_rejected() {
    let validator = Validator::new().unwrap();
    let mut data = users_registry();
    data["types"]["User"]["colour"] = json!("blue");
    let result = validator.validate_registry("registry.yaml", &data);
    assert!(!result.valid);
}

#[test]
fn test_validate_duplicate_route_version() {
    let validator = Validator::new().unwrap();
    let data = json!({
        "routes": [
            {"path": "/ping", "versions": [{"version": 1, "input": "string", "output": "string"}]},
            {"path": "/ping", "versions": [{"version": "1", "input": "string", "output": "string"}]}
        ]
    });
    let result = validator.validate_registry("registry.yaml", &data);
    assert!(!result.valid);
    let error = result
        .errors
        .iter()
        .find(|e| e.message.contains("Duplicate route version"))
        .unwrap();
    assert_eq!(error.path.as_deref(), Some("/routes/1/versions/0/version"));
}

#[test]
fn test_validate_dangling_reference_with_suggestion() {
    let validator = Validator::new().unwrap();
    let mut data = users_registry();
    data["types"]["User"]["fields"][1]["type"]["pointee"] = json!("Profil");
    let result = validator.validate_registry("registry.yaml", &data);
    assert!(!result.valid);
    let error = result
        .errors
        .iter()
        .find(|e| e.message.contains("Unknown type reference 'Profil'"))
        .unwrap();
    assert_eq!(error.path.as_deref(), Some("/types/User/fields/1/type/pointee"));
    assert!(error.suggestion.as_deref().unwrap().contains("Profile"));
}

#[test]
fn test_validate_builtin_references_are_known() {
    let validator = Validator::new().unwrap();
    let data = json!({
        "routes": [
            {"path": "/echo", "versions": [{"version": "1", "input": "any", "output": "interface{}"}]},
            {"path": "/bytes", "versions": [{"version": "1", "input": "byte", "output": "float64"}]}
        ]
    });
    let result = validator.validate_registry("registry.yaml", &data);
    assert!(result.valid, "Unexpected errors: {:?}", result.errors);
}

#[test]
fn test_validate_duplicate_type_names() {
    let validator = Validator::new().unwrap();
    let mut data = users_registry();
    data["types"]["UserCopy"] = json!({
        "name": "User",
        "namespace": "lazada_api/models",
        "kind": "struct"
    });
    let result = validator.validate_registry("registry.yaml", &data);
    assert!(!result.valid);
    assert!(result
        .errors
        .iter()
        .any(|e| e.message.contains("lazada_api/models.User")));
}

#[test]
fn test_validate_kind_members() {
    let validator = Validator::new().unwrap();
    let data = json!({
        "routes": [],
        "types": {
            "Counters": {"name": "Counters", "namespace": "lazada_api/models", "kind": "map", "key": "string"},
            "UserID": {"name": "UserID", "namespace": "lazada_api/models", "kind": "primitive", "primitive": "integer"},
            "Tags": {"name": "Tags", "namespace": "lazada_api/models", "kind": "slice", "elem": "string",
                     "fields": [{"name": "A", "type": "string"}]}
        }
    });
    let result = validator.validate_registry("registry.yaml", &data);
    let messages: Vec<&str> = result.errors.iter().map(|e| e.message.as_str()).collect();
    assert!(messages.iter().any(|m| m.contains("'map' type requires a 'value'")));
    assert!(messages.iter().any(|m| m.contains("'integer' is not a primitive")));
    assert!(messages.iter().any(|m| m.contains("Only struct types have fields")));
}

#[test]
fn test_validate_namespace_without_name() {
    let validator = Validator::new().unwrap();
    let data = json!({
        "routes": [{"path": "/ping", "versions": [{"version": "1", "input": {"kind": "struct", "namespace": "lazada_api/x"}, "output": "string"}]}]
    });
    let result = validator.validate_registry("registry.yaml", &data);
    assert!(result
        .errors
        .iter()
        .any(|e| e.message.contains("must have a name")));
}

#[test]
fn test_validate_named_struct_without_namespace() {
    let validator = Validator::new().unwrap();
    let data = json!({
        "routes": [{"path": "/users/get", "versions": [{"version": "1", "input": "string", "output": "U"}]}],
        "types": {
            "U": {"name": "User", "kind": "struct"},
            "Count": {"name": "int", "kind": "primitive", "primitive": "int"},
            "Failure": {"name": "error", "kind": "interface"}
        }
    });
    let result = validator.validate_registry("registry.yaml", &data);
    assert!(!result.valid);
    let paths: Vec<&str> = result
        .errors
        .iter()
        .filter(|e| e.message.contains("must have a namespace"))
        .filter_map(|e| e.path.as_deref())
        .collect();
    assert_eq!(paths, vec!["/types/U/namespace"]);
}

#[test]
fn test_format_errors() {
    let validator = Validator::new().unwrap();
    let errors = vec![ValidationError::new("registry.yaml", "Unknown type reference 'Profil'")
        .at("/types/User/fields/1/type")
        .suggest("Did you mean: Profile?")];
    let formatted = validator.format_errors(&errors);
    assert!(formatted.contains("✗ Validation failed"));
    assert!(formatted.contains("registry.yaml"));
    assert!(formatted.contains("Path: /types/User/fields/1/type"));
    assert!(formatted.contains("Suggestion: Did you mean: Profile?"));
    assert!(validator.format_errors(&[]).is_empty());
}
