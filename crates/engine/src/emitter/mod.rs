/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Code emitters.
 *
 * `declarations` renders types. `methods` and `errors` render the client methods and error
 * tables from a shared per-route plan so both agree on method and variable names.
 */

pub mod declarations;
pub mod errors;
pub mod methods;

use std::collections::HashMap;

use serde::Serialize;
use tera::Tera;

use crate::collector::RouteMetadata;
use crate::error::{GeneratorError, GeneratorResult};
use crate::resolver::sanitize_identifier;

pub use errors::ErrorEmitter;
pub use methods::MethodEmitter;

/// Everything a template needs to know about one route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MethodPlan {
    pub name: String,
    pub route: String,
    pub input: String,
    pub output: String,
    pub params: Vec<ParamView>,
    pub errors: Vec<ErrorView>,
    /// Expression passed as the route's error table; `nil` when it declares no errors.
    pub error_table: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ParamView {
    pub name: String,
    pub type_name: Option<String>,
    pub required: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorView {
    pub variable: String,
    /// Go string literal of the code, quotes included.
    pub literal: String,
    pub description: Option<String>,
}

/// Name every route's method and error variables.
///
/// # Errors
///
/// Returns `NamingCollision` when two routes map to the same method name, or two distinct error
/// codes of one route map to the same variable.
pub fn plan_methods(routes: &[RouteMetadata]) -> GeneratorResult<Vec<MethodPlan>> {
    let mut owners: HashMap<String, &str> = HashMap::new();
    let mut plans = Vec::with_capacity(routes.len());

    for route in routes {
        let name = method_name(&route.path, &route.version);
        if let Some(first) = owners.insert(name.clone(), &route.route) {
            return Err(GeneratorError::NamingCollision {
                name,
                first: first.to_string(),
                second: route.route.clone(),
            });
        }

        // Variable -> code it was named after. A repeated code is declared once.
        let mut variables: HashMap<String, &str> = HashMap::new();
        let mut errors = Vec::with_capacity(route.errors.len());
        for error in &route.errors {
            let variable = format!("{name}Err{}", camel_case(&error.code));
            match variables.get(&variable) {
                Some(&code) if code == error.code => continue,
                Some(&code) => {
                    return Err(GeneratorError::NamingCollision {
                        name: variable,
                        first: format!("{} error {code}", route.route),
                        second: format!("{} error {}", route.route, error.code),
                    });
                }
                None => {}
            }
            variables.insert(variable.clone(), &error.code);
            errors.push(ErrorView {
                variable,
                literal: go_string_literal(&error.code),
                description: error.description.as_deref().map(single_line),
            });
        }
        let error_table = if errors.is_empty() {
            "nil".to_string()
        } else {
            format!("{name}Errors")
        };

        plans.push(MethodPlan {
            route: route.route.clone(),
            input: route.input_type.clone(),
            output: route.output_type.clone(),
            params: route
                .params
                .iter()
                .map(|p| ParamView {
                    name: p.name.clone(),
                    type_name: p.type_name.clone(),
                    required: p.required,
                    description: p.description.as_deref().map(single_line),
                })
                .collect(),
            errors,
            error_table,
            name,
        });
    }

    Ok(plans)
}

/// Method name of a route version: `/users/get` + `1` gives `UsersGetV1`.
#[must_use]
pub fn method_name(path: &str, version: &str) -> String {
    let version = if version.chars().all(|c| c.is_ascii_digit()) {
        format!("v{version}")
    } else {
        version.to_string()
    };
    let name = sanitize_identifier(&format!("{}{}", camel_case(path), camel_case(&version)));
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Route{name}")
    } else {
        name
    }
}

/// `USER_NOT_FOUND` gives `UserNotFound`, `/users/getById` gives `UsersGetById`.
///
/// Words that are entirely upper case are lowered after their first letter; mixed-case words
/// keep their inner capitals.
#[must_use]
pub fn camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for word in s.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        let shouting = !word.chars().any(char::is_lowercase);
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            if shouting {
                result.extend(chars.flat_map(char::to_lowercase));
            } else {
                result.push_str(chars.as_str());
            }
        }
    }
    result
}

fn go_string_literal(s: &str) -> String {
    let mut literal = String::with_capacity(s.len() + 2);
    literal.push('"');
    for c in s.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            _ => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tera instance holding one embedded template, with escaping off.
fn template_engine(name: &str, source: &str) -> GeneratorResult<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template(name, source)
        .map_err(|e| GeneratorError::Template(format!("Failed to load {name}: {e}")))?;
    // Auto-escape is disabled for Go code generation
    tera.autoescape_on(vec![]);
    Ok(tera)
}
