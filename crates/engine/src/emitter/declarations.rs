/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Type declaration rendering.
 *
 * Pure string building: names and field types arrive already resolved.
 */

/// One rendered struct member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLine {
    /// `None` for embedded fields.
    pub name: Option<String>,
    pub type_name: String,
    pub tag: Option<String>,
}

impl FieldLine {
    #[must_use]
    pub fn named(name: impl Into<String>, type_name: impl Into<String>, tag: Option<String>) -> Self {
        Self {
            name: Some(name.into()),
            type_name: type_name.into(),
            tag,
        }
    }

    #[must_use]
    pub fn embedded(type_name: impl Into<String>) -> Self {
        Self {
            name: None,
            type_name: type_name.into(),
            tag: None,
        }
    }
}

/// Render a struct declaration followed by a blank line.
#[must_use]
pub fn emit_struct(name: &str, fields: &[FieldLine]) -> String {
    let mut code = format!("type {name} struct {{\n");
    for field in fields {
        code.push('\t');
        match &field.name {
            // Embedded: bare type, members are promoted.
            None => code.push_str(&field.type_name),
            Some(field_name) => {
                code.push_str(field_name);
                code.push(' ');
                code.push_str(&field.type_name);
                if let Some(tag) = &field.tag {
                    code.push_str(&format!(" `json:\"{}\"`", escape_tag(tag)));
                }
            }
        }
        code.push('\n');
    }
    code.push_str("}\n\n");
    code
}

/// Render `type <name> <underlying>` followed by a blank line.
#[must_use]
pub fn emit_alias(name: &str, underlying: &str) -> String {
    format!("type {name} {underlying}\n\n")
}

fn escape_tag(tag: &str) -> String {
    tag.replace('\\', "\\\\").replace('"', "\\\"").replace('`', "")
}
