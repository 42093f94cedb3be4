//! HTTP Adapter - Quotes REST API
//!
//! Canonical routes live under `/api/`; `/api/quotes` is accepted as an
//! alias for list, create and replace. Health and metrics routes share
//! the same listener.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::adapters::metrics::{MetricsRegistry, health, prometheus};
use crate::ports::QuoteRepository;
use crate::usecases::QuoteStore;

pub use error::{ApiError, ApiResult};

/// Shared router state.
#[derive(Clone)]
pub struct AppState {
    /// Quote store behind every API route.
    pub store: Arc<QuoteStore<dyn QuoteRepository>>,
    /// Request and store metrics.
    pub metrics: Arc<MetricsRegistry>,
}

impl AppState {
    pub fn new(store: Arc<QuoteStore<dyn QuoteRepository>>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let collection = get(handlers::list_quotes)
        .post(handlers::create_quote)
        .put(handlers::replace_quotes);

    Router::new()
        .route("/api/", collection.clone())
        .route("/api/quotes", collection)
        .route("/api/quotes/random", get(handlers::random_quote))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .route("/metrics", get(prometheus::metrics_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            prometheus::track_requests,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
