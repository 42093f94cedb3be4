//! Shared test harness.
//!
//! Builds the full router over a quote file in a temporary directory
//! and drives it in-process with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use quotes_api::adapters::http::{AppState, router};
use quotes_api::adapters::metrics::MetricsRegistry;
use quotes_api::adapters::persistence::JsonFileRepository;
use quotes_api::domain::Quote;
use quotes_api::ports::QuoteRepository;
use quotes_api::usecases::QuoteStore;

/// Seed collection: five quotes with ids 1..=5.
pub const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/quotes.json");

pub fn fixture_quotes() -> Vec<Quote> {
    let json = std::fs::read_to_string(FIXTURE).expect("fixture readable");
    serde_json::from_str(&json).expect("fixture parses")
}

pub struct TestApp {
    pub app: Router,
    pub store: Arc<QuoteStore<dyn QuoteRepository>>,
    /// Keeps the quote file alive for the test's duration.
    pub dir: Option<TempDir>,
}

impl TestApp {
    /// Router over a fresh quote file seeded from the fixture.
    pub async fn seeded() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("quotes.json"))
            .await
            .unwrap()
            .with_seed(FIXTURE);
        Self::with_repository(Arc::new(repo), Some(dir)).await
    }

    /// Router over an empty quote file.
    pub async fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("quotes.json"))
            .await
            .unwrap();
        Self::with_repository(Arc::new(repo), Some(dir)).await
    }

    pub async fn with_repository(repo: Arc<dyn QuoteRepository>, dir: Option<TempDir>) -> Self {
        let store = Arc::new(QuoteStore::open(repo).await.unwrap());
        let metrics = Arc::new(MetricsRegistry::new().unwrap());
        let app = router(AppState::new(Arc::clone(&store), metrics));
        Self { app, store, dir }
    }

    pub fn data_file(&self) -> std::path::PathBuf {
        self.dir
            .as_ref()
            .expect("file-backed app")
            .path()
            .join("quotes.json")
    }

    /// Send one request; the body is parsed as JSON when possible.
    pub async fn request(&self, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    /// The collection as served by `GET /api/`.
    pub async fn listed(&self) -> Vec<Value> {
        let (status, body) = self.get("/api/").await;
        assert_eq!(status, StatusCode::OK);
        body.as_array().expect("list is an array").clone()
    }
}
