//! sdash-ai - sentiment dashboard backend
//!
//! Serves the lexicon classifier, file extraction, exports and the response
//! assistant over a loopback-only HTTP API.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sdash_common::config::TomlConfig;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sdash_ai::AppState;

/// Command-line arguments for sdash-ai
#[derive(Parser, Debug)]
#[command(name = "sdash-ai")]
#[command(about = "Sentiment analysis dashboard backend")]
#[command(version)]
struct Args {
    /// Config file (overrides SDASH_CONFIG and the user config file)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "SDASH_PORT")]
    port: Option<u16>,

    /// Log level when RUST_LOG is not set (overrides the config file)
    #[arg(long, env = "SDASH_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config =
        TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    let default_filter = format!(
        "sdash_ai={0},sdash_common={0},tower_http=info",
        config.logging.level
    );
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting sdash-ai (Sentiment Dashboard) v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Limits: max file size {} bytes, {} fragments per file, {} history entries",
        config.limits.max_file_size_bytes, config.limits.max_fragments, config.limits.history_limit
    );
    info!("Classifier jitter: {:?}", config.classifier.jitter);

    let port = config.port;
    let state = AppState::new(config);
    let app = sdash_ai::build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
