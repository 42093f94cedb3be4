//! Quotes API — Entry Point
//!
//! Wiring sequence:
//! 1. Load config.toml (optional) + PORT override + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Open the quote store from the JSON file
//! 4. Build the router (API + /live + /ready + /metrics)
//! 5. Serve until SIGINT, then flush the store and exit

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{info, warn};

use quotes_api::adapters::http::{AppState, router};
use quotes_api::adapters::metrics::MetricsRegistry;
use quotes_api::adapters::persistence::JsonFileRepository;
use quotes_api::config;
use quotes_api::ports::QuoteRepository;
use quotes_api::usecases::QuoteStore;

/// Environment variable naming the config file.
const CONFIG_ENV: &str = "QUOTES_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config_path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| "config.toml".to_string());
    let config = config::loader::load_config(&config_path)
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .json()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.server.port,
        data_file = %config.persistence.data_file.display(),
        "Starting quotes API"
    );

    // ── 3. Open the quote store ─────────────────────────────
    let mut repository = JsonFileRepository::new(&config.persistence.data_file)
        .await
        .context("Failed to prepare quote file")?;
    if let Some(seed) = &config.persistence.seed_file {
        repository = repository.with_seed(seed);
    }
    let repository: Arc<dyn QuoteRepository> = Arc::new(repository);
    let store = Arc::new(
        QuoteStore::open(repository)
            .await
            .context("Failed to open quote store")?,
    );

    // ── 4. Build the router ─────────────────────────────────
    let metrics = Arc::new(MetricsRegistry::new().context("Failed to register metrics")?);
    let app = router(AppState::new(Arc::clone(&store), metrics));

    // ── 5. Serve until SIGINT ───────────────────────────────
    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!(address = %address, "Quotes API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for SIGINT");
                std::future::pending::<()>().await;
            }
            info!("SIGINT received, initiating graceful shutdown");
        })
        .await
        .context("HTTP server failed")?;

    store.flush().await.context("Failed to flush quote store")?;
    info!("Shutdown complete");
    Ok(())
}
