//! Logging setup
//!
//! Logs go to stderr so generated code written to stdout stays clean.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `adaptergen_engine=debug`.
pub const LOG_ENV: &str = "ADAPTERGEN_LOG";

const DEFAULT_FILTER: &str = "adaptergen=info,adaptergen_engine=info";

pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("adaptergen=debug,adaptergen_engine=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}
