//! Serve command implementation
//!
//! Serves the generated client package over HTTP so consumers can fetch it
//! with their own settings:
//!
//! ```text
//! GET /?package=shop&internal_pkg=lazada_api&internal_pkg=mobapi&service_name=ShopAPI
//! ```
//!
//! The registry is loaded once at startup and shared read-only. Every request
//! resolves its own configuration from the query string, so requests never
//! affect each other.
//!
//! # Security Notes
//! - Binds to `127.0.0.1` (localhost only)
//! - CORS is permissive for local development only

use crate::error::{CliError, CliResult};
use crate::ops::registry::{read_registry, render_package};
use crate::utils::config::{
    read_config, resolve_generator_config, resolve_registry_path, ConfigFile, Overrides,
    DEFAULT_PORT,
};
use adaptergen_engine::{GeneratorConfig, StaticRegistry};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Command options for the server
pub struct Options {
    pub registry: Option<String>,
    /// Port for web server (default: 8080)
    pub port: Option<u16>,
}

/// Shared server state
struct AppState {
    registry: StaticRegistry,
    file_config: Option<ConfigFile>,
}

/// Settings taken from one request's query string.
#[derive(Debug, Default, PartialEq)]
struct RequestParams {
    help: bool,
    overrides: Overrides,
}

impl RequestParams {
    /// Empty values count as absent. `internal_pkg` may repeat.
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "help" => params.help = true,
                "package" => params.overrides.package = Some(value.clone()),
                "service_name" => params.overrides.service_name = Some(value.clone()),
                "internal_pkg" => params.overrides.internal_pkg.push(value.clone()),
                _ => {}
            }
        }
        params
    }
}

fn usage(defaults: &GeneratorConfig) -> String {
    format!(
        "\nPossible get params:\n    \
         package - package name for generated code ('{}' is default)\n    \
         internal_pkg - package names prefix that will be copied into generated code to avoid big imports\n                   \
         For example: 'internal_pkg=lazada_api&internal_pkg=mobapi'\n    \
         service_name - name of service ('{}' is default)\n",
        defaults.package_name, defaults.service_name
    )
}

fn plain_text(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}

async fn generate_package(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params = RequestParams::from_pairs(&pairs);
    let document_service = state.registry.service();
    let defaults = resolve_generator_config(
        &Overrides::default(),
        state.file_config.as_ref(),
        document_service,
    );
    if params.help {
        return plain_text(StatusCode::OK, usage(&defaults));
    }

    let config = resolve_generator_config(
        &params.overrides,
        state.file_config.as_ref(),
        document_service,
    );
    match render_package(&state.registry, &config) {
        Ok(source) => plain_text(StatusCode::OK, source),
        Err(e) => {
            tracing::error!(error = %e, package = %config.package_name, "Generation failed");
            plain_text(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Create the router
fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(generate_package))
        // CORS is permissive for local development only
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server
///
/// The server runs until interrupted (Ctrl+C) and handles graceful shutdown.
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ Server failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    let file_config = read_config()?;
    let registry_path = resolve_registry_path(options.registry.as_deref(), file_config.as_ref());
    let registry = read_registry(Path::new(&registry_path))?;

    println!("✓ Loaded registry from: {registry_path}");
    println!("  Routes: {}", registry.route_count());

    let port = options
        .port
        .or_else(|| file_config.as_ref().and_then(|c| c.port))
        .unwrap_or(DEFAULT_PORT);

    let state = Arc::new(AppState {
        registry,
        file_config,
    });
    let router = create_router(state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Message(format!("Failed to create runtime: {e}")))?;

    rt.block_on(async {
        // Bind to localhost only (127.0.0.1)
        let addr = format!("127.0.0.1:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| CliError::Message(format!("Failed to bind to {addr}: {e}")))?;

        println!();
        println!("✓ Serving client package at http://localhost:{port}/");
        println!("  Usage: http://localhost:{port}/?help=1");
        println!("  Press Ctrl+C to stop");
        println!();

        let server = axum::serve(listener, router);
        let graceful = server.with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
            println!("\nShutting down gracefully...");
        });

        graceful
            .await
            .map_err(|e| CliError::Message(format!("Server error: {e}")))?;

        Ok::<(), CliError>(())
    })
}
