//! Registry loading and package rendering

use crate::error::{CliError, CliResult};
use crate::generator::assemble_package;
use adaptergen_engine::validator::Validator;
use adaptergen_engine::{generate, load_registry, parse_registry, GeneratorConfig, StaticRegistry};
use std::fs;
use std::path::Path;

/// Read, validate and load a registry document.
///
/// Validation problems are printed to stderr in full before the error is returned.
pub fn read_registry(path: &Path) -> CliResult<StaticRegistry> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::Message(format!("Failed to read {}: {e}", path.display())))?;
    let file = path.display().to_string();

    let document = parse_registry(&content)?;
    let validator = Validator::new().map_err(adaptergen_engine::GeneratorError::from)?;
    let result = validator.validate_registry(&file, &document);
    if !result.valid {
        eprintln!("{}", validator.format_errors(&result.errors));
        return Err(CliError::Message(format!(
            "{file} has {} validation error{}",
            result.errors.len(),
            if result.errors.len() == 1 { "" } else { "s" }
        )));
    }

    let registry = load_registry(&content, Some(&file))?;
    tracing::info!(file = %file, routes = registry.route_count(), "Loaded registry");
    Ok(registry)
}

/// Generate and assemble the Go package for one configuration.
///
/// Nothing is returned on failure, so callers never see partial output.
pub fn render_package(registry: &StaticRegistry, config: &GeneratorConfig) -> CliResult<String> {
    let code = generate(registry, config)?;
    assemble_package(&code, config)
}
