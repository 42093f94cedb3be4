//! Health Check Handlers - Liveness and Readiness Probes
//!
//! `/live` answers whenever the process is serving. `/ready` also
//! requires the quote file's directory to be writable.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::AppState;

/// Liveness probe: always returns 200 if the process is running.
pub async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness probe: returns 200 only if the repository is healthy.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if state.store.is_healthy().await {
        (StatusCode::OK, "READY")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
    }
}
