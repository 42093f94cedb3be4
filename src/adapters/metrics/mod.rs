//! Metrics and Monitoring Adapters
//!
//! Prometheus metrics export on `/metrics` and health check
//! endpoints (`/live`, `/ready`), mounted on the API router.

pub mod health;
pub mod prometheus;

pub use self::prometheus::MetricsRegistry;
