//! # fonemad
//!
//! Pronunciation analyzer server binary — wires configuration, the
//! Gemini client, and the HTTP server.

#![deny(unsafe_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use fonema_llm::gemini::{GeminiClient, GeminiConfig};
use fonema_server::config::{ServerConfig, UpstreamConfig};
use fonema_server::routes::AppState;
use fonema_server::server::AnalyzerServer;

/// Pronunciation analyzer server.
#[derive(Parser, Debug)]
#[command(name = "fonemad", about = "Pronunciation analyzer server")]
struct Cli {
    /// Host to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind (0 for auto-assign).
    #[arg(long, default_value = "8787")]
    port: u16,

    /// Candidate model, in priority order (repeat to override the default list).
    #[arg(long = "model")]
    models: Vec<String>,

    /// Return the generic failure message instead of upstream error details.
    #[arg(long)]
    generic_errors: bool,

    /// Log filter (overridden by `RUST_LOG`).
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Initialize the global tracing subscriber with stderr output.
///
/// Call once at application startup. Subsequent calls are no-ops.
fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = subscriber.try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_subscriber(&args.log_level);

    let mut upstream = UpstreamConfig::from_env()
        .context("upstream configuration (set GEMINI_API_KEY)")?;
    if !args.models.is_empty() {
        upstream.models = args.models.clone();
    }

    let provider = Arc::new(GeminiClient::new(GeminiConfig {
        api_key: upstream.api_key.clone(),
        base_url: upstream.base_url.clone(),
        generation: None,
    }));

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        expose_upstream_errors: !args.generic_errors,
    };
    let state = AppState::new(provider, upstream.models.clone(), &config);

    let server = AnalyzerServer::new(config, state);
    let (addr, handle) = server.listen().await.context("Failed to bind server")?;

    tracing::info!(
        models = upstream.models.len(),
        "fonema listening on http://{addr}"
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    tracing::info!("Shutting down...");
    server.shutdown().shutdown();
    let _ = handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
