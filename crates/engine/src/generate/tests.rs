/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::generate::{generate, GeneratedCode};
use crate::registry::{load_registry, StaticRegistry};
use std::collections::HashSet;

fn registry(yaml: &str) -> StaticRegistry {
    load_registry(yaml, Some("registry.yaml")).unwrap()
}

fn users_registry(profile_namespace: &str) -> StaticRegistry {
    registry(&format!(
        r#"
routes:
  - path: /users/get
    versions:
      - version: 1
        input: int64
        output: User
types:
  User:
    name: User
    namespace: lazada_api/models
    kind: struct
    fields:
      - name: ID
        type: int
        tags: {{ json: id }}
      - name: Profile
        type: {{ kind: pointer, pointee: Profile }}
        tags: {{ json: profile }}
  Profile:
    name: Profile
    namespace: {profile_namespace}
    kind: struct
    fields:
      - name: Bio
        type: string
        tags: {{ json: bio }}
"#
    ))
}

fn names(code: &GeneratedCode) -> Vec<&str> {
    code.declarations.iter().map(|d| d.name.as_str()).collect()
}

#[test]
fn test_internal_user_and_profile() {
    let code = generate(&users_registry("lazada_api/models"), &GeneratorConfig::default()).unwrap();

    assert_eq!(
        code.declarations_code(),
        "type Lazada_api_models_User struct {\n\
         \tID int `json:\"id\"`\n\
         \tProfile Lazada_api_models_Profile `json:\"profile\"`\n\
         }\n\
         \n\
         type Lazada_api_models_Profile struct {\n\
         \tBio string `json:\"bio\"`\n\
         }\n\n"
    );
    assert_eq!(code.routes.len(), 1);
    assert_eq!(code.routes[0].route, "/users/get/v1");
    assert_eq!(code.routes[0].output_type, "Lazada_api_models_User");
    assert_eq!(code.routes[0].input_type, "int64");
    assert!(code.required_imports.is_empty());
    assert!(code.degraded.is_empty());
}

#[test]
fn test_external_profile_is_imported_not_declared() {
    let code = generate(
        &users_registry("github.com/acme/profiles"),
        &GeneratorConfig::default(),
    )
    .unwrap();

    assert_eq!(names(&code), vec!["Lazada_api_models_User"]);
    assert!(code.declarations[0]
        .code
        .contains("\tProfile profiles.Profile `json:\"profile\"`\n"));
    let imports: Vec<(&str, &str)> = code
        .required_imports
        .iter()
        .map(|(path, qualifier)| (path.as_str(), qualifier.as_str()))
        .collect();
    assert_eq!(imports, vec![("github.com/acme/profiles", "profiles")]);
}

#[test]
fn test_external_packages_sharing_a_name_are_qualified_apart() {
    let registry = registry(
        r#"
routes:
  - path: /orders/get
    versions:
      - { version: 1, input: string, output: Order }
types:
  Order:
    name: Order
    namespace: lazada_api/orders
    kind: struct
    fields:
      - { name: Buyer, type: Buyer }
      - { name: Seller, type: Seller }
  Buyer:
    name: User
    namespace: github.com/foo/models
    kind: struct
  Seller:
    name: User
    namespace: github.com/bar/models
    kind: struct
"#,
    );
    let code = generate(&registry, &GeneratorConfig::default()).unwrap();

    let order = &code.declarations[0].code;
    assert!(order.contains("\tBuyer models.User\n"));
    assert!(order.contains("\tSeller models2.User\n"));
    assert_eq!(code.required_imports["github.com/foo/models"], "models");
    assert_eq!(code.required_imports["github.com/bar/models"], "models2");
}

#[test]
fn test_generation_is_idempotent() {
    let registry = users_registry("lazada_api/models");
    let config = GeneratorConfig::default();
    let first = generate(&registry, &config).unwrap();
    let second = generate(&registry, &config).unwrap();

    assert_eq!(first.declarations, second.declarations);
    assert_eq!(first.methods, second.methods);
    assert_eq!(first.errors, second.errors);
    assert_eq!(first.required_imports, second.required_imports);
}

#[test]
fn test_runs_do_not_share_state() {
    let registry = users_registry("lazada_api/models");
    let internal = GeneratorConfig::default();
    let external = GeneratorConfig {
        internal_prefixes: vec!["mobapi".to_string()],
        ..GeneratorConfig::default()
    };

    let before = generate(&registry, &internal).unwrap();
    let other = generate(&registry, &external).unwrap();
    let after = generate(&registry, &internal).unwrap();

    assert!(other.declarations.is_empty());
    assert_eq!(other.routes[0].output_type, "models.User");
    assert_eq!(before.declarations, after.declarations);
}

#[test]
fn test_same_name_in_different_namespaces_gets_distinct_declarations() {
    let registry = registry(
        r#"
routes:
  - path: /orders/get
    versions:
      - version: 1
        input: string
        output: Order
types:
  Order:
    name: Order
    namespace: lazada_api/orders
    kind: struct
    fields:
      - { name: Buyer, type: BuyerUser }
      - { name: Seller, type: SellerUser }
  BuyerUser:
    name: User
    namespace: lazada_api/buyers
    kind: struct
  SellerUser:
    name: User
    namespace: lazada_api/sellers
    kind: struct
"#,
    );
    let code = generate(&registry, &GeneratorConfig::default()).unwrap();

    assert_eq!(
        names(&code),
        vec![
            "Lazada_api_orders_Order",
            "Lazada_api_buyers_User",
            "Lazada_api_sellers_User"
        ]
    );
    let unique: HashSet<&str> = names(&code).into_iter().collect();
    assert_eq!(unique.len(), code.declarations.len());
}

#[test]
fn test_shared_type_across_routes_is_declared_once() {
    let registry = registry(
        r#"
routes:
  - path: /users/get
    versions:
      - { version: 1, input: string, output: User }
      - { version: 2, input: string, output: Users }
  - path: /users/me
    versions:
      - { version: 1, input: string, output: User }
types:
  User:
    name: User
    namespace: lazada_api/models
    kind: struct
  Users:
    name: Users
    namespace: lazada_api/models
    kind: slice
    elem: { kind: pointer, pointee: User }
"#,
    );
    let code = generate(&registry, &GeneratorConfig::default()).unwrap();

    assert_eq!(names(&code), vec!["Lazada_api_models_User", "Lazada_api_models_Users"]);
    assert_eq!(
        code.declarations[1].code,
        "type Lazada_api_models_Users []Lazada_api_models_User\n\n"
    );
    let outputs: Vec<&str> = code.routes.iter().map(|r| r.output_type.as_str()).collect();
    assert_eq!(
        outputs,
        vec!["Lazada_api_models_User", "Lazada_api_models_Users", "Lazada_api_models_User"]
    );
}

#[test]
fn test_cyclic_types_terminate() {
    let registry = registry(
        r#"
routes:
  - path: /tree/get
    versions:
      - { version: 1, input: string, output: Node }
types:
  Node:
    name: Node
    namespace: lazada_api/tree
    kind: struct
    fields:
      - { name: Parent, type: { kind: pointer, pointee: Node } }
      - { name: Children, type: { kind: slice, elem: Node } }
      - { name: Index, type: { kind: map, key: string, value: Node } }
      - { name: Owner, type: Owner }
  Owner:
    name: Owner
    namespace: lazada_api/tree
    kind: struct
    fields:
      - { name: Root, type: Node }
"#,
    );
    let code = generate(&registry, &GeneratorConfig::default()).unwrap();

    assert_eq!(names(&code), vec!["Lazada_api_tree_Node", "Lazada_api_tree_Owner"]);
    let node = &code.declarations[0].code;
    assert!(node.contains("\tParent Lazada_api_tree_Node\n"));
    assert!(node.contains("\tChildren []Lazada_api_tree_Node\n"));
    assert!(node.contains("\tIndex map[string]Lazada_api_tree_Node\n"));
}

#[test]
fn test_pointer_is_transparent() {
    let registry = registry(
        r#"
routes:
  - path: /pair
    versions:
      - { version: 1, input: string, output: Pair }
types:
  Pair:
    name: Pair
    namespace: lazada_api/models
    kind: struct
    fields:
      - { name: Direct, type: Item }
      - { name: Indirect, type: { kind: pointer, pointee: Item } }
      - { name: Twice, type: { kind: pointer, pointee: { kind: pointer, pointee: Item } } }
  Item:
    name: Item
    namespace: lazada_api/models
    kind: struct
"#,
    );
    let code = generate(&registry, &GeneratorConfig::default()).unwrap();
    let pair = &code.declarations[0].code;

    assert!(pair.contains("\tDirect Lazada_api_models_Item\n"));
    assert!(pair.contains("\tIndirect Lazada_api_models_Item\n"));
    assert!(pair.contains("\tTwice Lazada_api_models_Item\n"));
    assert_eq!(code.declarations.len(), 2);
}

#[test]
fn test_unsupported_type_aborts_without_output() {
    let registry = registry(
        r#"
routes:
  - path: /events
    versions:
      - { version: 1, input: string, output: Event }
types:
  Event:
    name: Event
    namespace: lazada_api/events
    kind: struct
    fields:
      - { name: Done, type: { kind: chan, elem: bool } }
"#,
    );
    let err = generate(&registry, &GeneratorConfig::default()).unwrap_err();
    assert!(matches!(err, GeneratorError::UnsupportedType(ref msg) if msg.contains("chan")));
}

#[test]
fn test_degraded_fields_are_reported() {
    let registry = registry(
        r#"
routes:
  - path: /events
    versions:
      - { version: 1, input: string, output: Event }
types:
  Event:
    name: Event
    namespace: lazada_api/events
    kind: struct
    fields:
      - { name: Payload, type: any }
      - { name: Meta, type: { kind: struct, fields: [{ name: A, type: int }] } }
"#,
    );
    let code = generate(&registry, &GeneratorConfig::default()).unwrap();

    let event = &code.declarations[0].code;
    assert!(event.contains("\tPayload interface{}\n"));
    assert!(event.contains("\tMeta interface{}\n"));
    let locations: Vec<&str> = code.degraded.iter().map(|d| d.location.as_str()).collect();
    assert_eq!(
        locations,
        vec!["Lazada_api_events_Event.Payload", "Lazada_api_events_Event.Meta"]
    );
}

#[test]
fn test_methods_and_errors_are_rendered() {
    let registry = registry(
        r#"
routes:
  - path: /users/get
    versions:
      - version: 1
        input: int64
        output: string
        errors:
          - code: USER_NOT_FOUND
"#,
    );
    let config = GeneratorConfig {
        service_name: "UserService".to_string(),
        ..GeneratorConfig::default()
    };
    let code = generate(&registry, &config).unwrap();

    assert!(code.methods.contains(
        "func (api *UserService) UsersGetV1(ctx context.Context, options int64) (*string, error) {"
    ));
    assert!(code.methods.contains("api.call(ctx, \"/users/get/v1\", options, &result, UsersGetV1Errors)"));
    assert!(code.errors.contains("UsersGetV1ErrUserNotFound = errors.New(\"USER_NOT_FOUND\")"));
}

#[test]
fn test_empty_registry_generates_nothing() {
    let code = generate(&registry("routes: []"), &GeneratorConfig::default()).unwrap();
    assert!(code.declarations.is_empty());
    assert!(code.methods.is_empty());
    assert!(code.errors.is_empty());
    assert!(code.routes.is_empty());
}
