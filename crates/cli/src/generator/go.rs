//! Go package generator
//!
//! Wraps the engine output in a package with its imports, the client type and
//! the shared `call` helper every generated method goes through.

use crate::error::{CliError, CliResult};
use crate::generator::Generator;
use adaptergen_engine::resolver::{sanitize_identifier, CLIENT_IMPORTS};
use adaptergen_engine::{GeneratedCode, GeneratorConfig};
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "package.go.tera";

/// An import line beyond the client's own.
#[derive(Debug, Serialize)]
struct ImportView<'a> {
    path: &'a str,
    qualifier: &'a str,
}

/// Go package generator
pub struct GoGenerator {
    tera: Tera,
}

impl GoGenerator {
    pub fn new() -> CliResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, include_str!("templates/package.go.tera"))
            .map_err(|e| CliError::Message(format!("Failed to load package template: {e}")))?;

        // Auto-escape is disabled for Go code generation
        tera.autoescape_on(vec![]);

        Ok(Self { tera })
    }
}

impl Generator for GoGenerator {
    fn assemble(&self, code: &GeneratedCode, config: &GeneratorConfig) -> CliResult<String> {
        let package = sanitize_identifier(&config.package_name);
        if package.is_empty() {
            return Err(CliError::Message("Package name must not be empty".to_string()));
        }

        let service = sanitize_identifier(&config.service_name);
        if service.is_empty() {
            return Err(CliError::Message("Service name must not be empty".to_string()));
        }

        // The client's own imports are always present; an external type from one of them
        // only needs the `errors` line switched on.
        let is_client_import = |path: &str| CLIENT_IMPORTS.iter().any(|(client, _)| *client == path);
        let imports: Vec<ImportView<'_>> = code
            .required_imports
            .iter()
            .filter(|(path, _)| !is_client_import(path.as_str()))
            .map(|(path, qualifier)| ImportView {
                path: path.as_str(),
                qualifier: qualifier.as_str(),
            })
            .collect();
        let has_errors = !code.errors.is_empty() || code.required_imports.contains_key("errors");

        let mut context = Context::new();
        context.insert("package", &package);
        context.insert("service", &service);
        context.insert("imports", &imports);
        context.insert("has_errors", &has_errors);
        context.insert("errors", &code.errors);
        context.insert("methods", &code.methods);
        context.insert("declarations", &code.declarations_code());

        let source = self
            .tera
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| CliError::Message(format!("Failed to render package: {e}")))?;

        tracing::debug!(package = %package, bytes = source.len(), "Assembled package");
        Ok(source)
    }
}
