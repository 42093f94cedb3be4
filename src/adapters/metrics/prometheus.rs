//! Prometheus Metrics Registry - HTTP and Store Observability
//!
//! Registers the service metrics and renders them in the Prometheus
//! text format for the `/metrics` route. All metrics follow the naming
//! convention `quotes_api_*`.

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

use crate::adapters::http::{ApiError, AppState};

/// Centralized Prometheus metrics for the quotes service.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Requests served, by method, matched route and status.
    pub requests_total: IntCounterVec,
    /// Records currently in the collection.
    pub quotes_stored: IntGauge,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("quotes_api_requests_total", "Total HTTP requests served"),
            &["method", "route", "status"],
        )?;

        let quotes_stored = IntGauge::new(
            "quotes_api_quotes_stored",
            "Number of quotes in the collection",
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(quotes_stored.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            quotes_stored,
        })
    }

    /// Encode every registered metric in the text exposition format.
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// Count each routed request once its response is ready.
pub async fn track_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let route = request.extensions().get::<MatchedPath>().map_or_else(
        || request.uri().path().to_string(),
        |path| path.as_str().to_string(),
    );

    let response = next.run(request).await;

    state
        .metrics
        .requests_total
        .with_label_values(&[method.as_str(), route.as_str(), response.status().as_str()])
        .inc();

    response
}

/// `GET /metrics`: refresh the store gauge and render.
pub async fn metrics_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let stored = i64::try_from(state.store.len().await).unwrap_or(i64::MAX);
    state.metrics.quotes_stored.set(stored);

    let body = state
        .metrics
        .render()
        .map_err(|e| ApiError::Internal(format!("failed to encode metrics: {e}")))?;
    Ok(body.into_response())
}
