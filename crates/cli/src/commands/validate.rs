//! Validate command implementation

use crate::error::{CliError, CliResult};
use crate::utils::config::{read_config, resolve_registry_path};
use adaptergen_engine::validator::Validator;
use adaptergen_engine::{parse_registry, GeneratorError};
use std::fs;

pub struct Options {
    pub registry: Option<String>,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(path) => {
            println!("✓ Validation passed ({path})");
            0
        }
        Err(e) => {
            eprintln!("✗ Validation failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<String> {
    let file_config = read_config()?;
    let path = resolve_registry_path(options.registry.as_deref(), file_config.as_ref());

    let content = fs::read_to_string(&path)
        .map_err(|e| CliError::Message(format!("Failed to read {path}: {e}")))?;
    let document = parse_registry(&content)?;

    let validator = Validator::new().map_err(GeneratorError::from)?;
    let result = validator.validate_registry(&path, &document);
    if !result.valid {
        eprintln!("{}", validator.format_errors(&result.errors));
        return Err(CliError::Message(format!(
            "{} error{} found",
            result.errors.len(),
            if result.errors.len() == 1 { "" } else { "s" }
        )));
    }

    Ok(path)
}
