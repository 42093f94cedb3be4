//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP server, file I/O, metrics export).
//!
//! Adapter categories:
//! - `http`: axum router and quote handlers
//! - `metrics`: Prometheus metrics export and health checks
//! - `persistence`: atomic JSON file storage

pub mod http;
pub mod metrics;
pub mod persistence;
