//! Client package assembly
//!
//! Turns the pieces produced by the engine into one source file.

pub mod go;


use crate::error::CliResult;
use adaptergen_engine::{GeneratedCode, GeneratorConfig};

/// Trait for package assemblers
pub trait Generator {
    /// Assemble a complete source file from generated code
    fn assemble(&self, code: &GeneratedCode, config: &GeneratorConfig) -> CliResult<String>;
}

/// Assemble the Go client package
pub fn assemble_package(code: &GeneratedCode, config: &GeneratorConfig) -> CliResult<String> {
    let generator = go::GoGenerator::new()?;
    generator.assemble(code, config)
}
