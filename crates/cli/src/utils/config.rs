//! Config file reading and generator settings resolution
//!
//! Every setting is resolved with the same priority: CLI flag / query parameter >
//! `adaptergen.yaml` > built-in default. The service name may also come from the
//! registry document, between the config file and the default.

use crate::error::{CliError, CliResult};
use adaptergen_engine::GeneratorConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "adaptergen.yaml";

/// Registry document used when neither the CLI nor the config file name one.
pub const DEFAULT_REGISTRY: &str = "registry.yaml";

pub const DEFAULT_PORT: u16 = 8080;

/// Full config file structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigFile {
    pub registry: Option<String>,
    pub package: Option<String>,
    pub service_name: Option<String>,
    #[serde(default, alias = "internal_pkgs", alias = "internal_prefixes")]
    pub internal_pkg: Option<Vec<String>>,
    pub tag_keys: Option<Vec<String>>,
    pub port: Option<u16>,
}

/// Values given explicitly on the command line or in a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub package: Option<String>,
    pub service_name: Option<String>,
    /// Empty means "not given".
    pub internal_pkg: Vec<String>,
}

/// Read a config file. A missing file is not an error.
pub fn read_config_file(config_path: &Path) -> CliResult<Option<ConfigFile>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let config_content = fs::read_to_string(config_path)
        .map_err(|e| CliError::Message(format!("Failed to read config file: {e}")))?;

    // An empty file deserializes to null
    if config_content.trim().is_empty() {
        return Ok(Some(ConfigFile::default()));
    }

    let config: ConfigFile = serde_yaml::from_str(&config_content)
        .map_err(|e| CliError::Message(format!("Failed to parse config file: {e}")))?;

    Ok(Some(config))
}

/// Read `adaptergen.yaml` from the working directory.
pub fn read_config() -> CliResult<Option<ConfigFile>> {
    read_config_file(Path::new(CONFIG_FILE))
}

/// Build the generator configuration for one run.
///
/// `document_service` is the `service` the registry document declares, if any.
pub fn resolve_generator_config(
    overrides: &Overrides,
    file: Option<&ConfigFile>,
    document_service: Option<&str>,
) -> GeneratorConfig {
    let defaults = GeneratorConfig::default();
    let file = file.cloned().unwrap_or_default();

    GeneratorConfig {
        package_name: overrides
            .package
            .clone()
            .or(file.package)
            .unwrap_or(defaults.package_name),
        service_name: overrides
            .service_name
            .clone()
            .or(file.service_name)
            .or_else(|| document_service.map(str::to_string))
            .unwrap_or(defaults.service_name),
        internal_prefixes: if overrides.internal_pkg.is_empty() {
            file.internal_pkg.unwrap_or(defaults.internal_prefixes)
        } else {
            overrides.internal_pkg.clone()
        },
        tag_keys: file.tag_keys.unwrap_or(defaults.tag_keys),
    }
}

/// Registry path: CLI flag > config file > `registry.yaml`.
pub fn resolve_registry_path(cli_registry: Option<&str>, file: Option<&ConfigFile>) -> String {
    cli_registry
        .map(str::to_string)
        .or_else(|| file.and_then(|f| f.registry.clone()))
        .unwrap_or_else(|| DEFAULT_REGISTRY.to_string())
}
