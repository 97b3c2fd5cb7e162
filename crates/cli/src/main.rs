//! Adaptergen CLI
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.

mod commands;
mod error;
mod generator;
mod logging;
mod ops;
mod test_helpers;
mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use commands::{completion, generate, serve, validate};

/// Adaptergen CLI - Generate Go HTTP/JSON client packages from handler registries
#[derive(Parser)]
#[command(name = "adaptergen")]
#[command(about = "Adaptergen CLI - Generate Go HTTP/JSON client packages from handler registries", long_about = None)]
#[command(version = env!("ADAPTERGEN_VERSION"))]
struct Cli {
    /// Enable debug logging (overrides ADAPTERGEN_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the client package
    Generate {
        /// Path to the registry document (default: registry.yaml)
        #[arg(long)]
        registry: Option<String>,
        /// Package name for generated code
        #[arg(long)]
        package: Option<String>,
        /// Name of the generated client type
        #[arg(long)]
        service_name: Option<String>,
        /// Package prefix whose types are copied into the generated code (repeatable)
        #[arg(long = "internal-pkg")]
        internal_pkg: Vec<String>,
        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<String>,
    },
    /// Validate a registry document
    Validate {
        /// Path to the registry document (default: registry.yaml)
        #[arg(long)]
        registry: Option<String>,
    },
    /// Serve the client package over HTTP
    Serve {
        /// Path to the registry document (default: registry.yaml)
        #[arg(long)]
        registry: Option<String>,
        /// Port for web server (default: 8080)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Generate a shell completion script
    Completion {
        /// Shell: bash, zsh or fish
        shell: String,
    },
}

/// CLI command structure, used for shell completion
pub fn get_cli_command() -> clap::Command {
    Cli::command()
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let exit_code = match cli.command {
        Commands::Generate {
            registry,
            package,
            service_name,
            internal_pkg,
            output,
        } => {
            let opts = generate::Options {
                registry,
                package,
                service_name,
                internal_pkg,
                output,
            };
            generate::run(&opts)
        }
        Commands::Validate { registry } => validate::run(&validate::Options { registry }),
        Commands::Serve { registry, port } => serve::run(&serve::Options { registry, port }),
        Commands::Completion { shell } => completion::run(&completion::Options { shell }),
    };

    std::process::exit(exit_code);
}
