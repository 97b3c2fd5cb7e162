//! Generate command implementation

use crate::error::CliResult;
use crate::ops::registry::{read_registry, render_package};
use crate::utils::config::{read_config, resolve_generator_config, resolve_registry_path, Overrides};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct Options {
    pub registry: Option<String>,
    pub package: Option<String>,
    pub service_name: Option<String>,
    pub internal_pkg: Vec<String>,
    /// Write to this file instead of stdout
    pub output: Option<String>,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(Some(path)) => {
            println!("✓ Generated client package: {}", path.display());
            0
        }
        Ok(None) => 0,
        Err(e) => {
            eprintln!("✗ Generation failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<Option<PathBuf>> {
    let file_config = read_config()?;
    let registry_path = resolve_registry_path(options.registry.as_deref(), file_config.as_ref());
    let overrides = Overrides {
        package: options.package.clone(),
        service_name: options.service_name.clone(),
        internal_pkg: options.internal_pkg.clone(),
    };
    let registry = read_registry(Path::new(&registry_path))?;
    let config = resolve_generator_config(&overrides, file_config.as_ref(), registry.service());

    let source = render_package(&registry, &config)?;

    match &options.output {
        Some(output) => {
            let output_path = PathBuf::from(output);
            if let Some(parent) = output_path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(&output_path, source)?;
            Ok(Some(output_path))
        }
        None => {
            io::stdout().write_all(source.as_bytes())?;
            Ok(None)
        }
    }
}
