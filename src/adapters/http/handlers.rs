//! Quote route handlers.
//!
//! Bodies are taken as raw bytes and parsed here so malformed JSON is
//! answered with the same JSON error body as validation failures.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use super::AppState;
use super::error::{ApiError, ApiResult};
use crate::domain::{NewQuote, Quote, ReplacementQuote};

/// Query string of the list route.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Exact author match.
    pub author: Option<String>,
}

/// `GET /api/`: the whole collection, optionally filtered by author.
#[instrument(skip(state))]
pub async fn list_quotes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Quote>> {
    let quotes = match params.author.as_deref() {
        Some(author) => state.store.list_by_author(strip_quotes(author)).await,
        None => state.store.list_all().await,
    };
    debug!(count = quotes.len(), "Listing quotes");
    Json(quotes)
}

/// `GET /api/quotes/random`.
pub async fn random_quote(State(state): State<AppState>) -> ApiResult<Json<Quote>> {
    Ok(Json(state.store.pick_random().await?))
}

/// `POST /api/`: append one quote; 201 with the stored record.
#[instrument(skip(state, body), fields(bytes = body.len()))]
pub async fn create_quote(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Quote>)> {
    let value = parse_json(&body)?;
    if !value.is_object() {
        return Err(ApiError::BadRequest(
            "expected a JSON object with a \"text\" field".to_string(),
        ));
    }
    let candidate: NewQuote = from_value(value)?;

    let quote = state.store.append(candidate).await?;
    Ok((StatusCode::CREATED, Json(quote)))
}

/// `PUT /api/`: replace the collection; an empty body clears it.
#[instrument(skip(state, body), fields(bytes = body.len()))]
pub async fn replace_quotes(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<Vec<Quote>>> {
    let candidates: Vec<ReplacementQuote> = if body.iter().all(u8::is_ascii_whitespace) {
        Vec::new()
    } else {
        let value = parse_json(&body)?;
        if !value.is_array() {
            return Err(ApiError::BadRequest(
                "expected a JSON array of quotes".to_string(),
            ));
        }
        from_value(value)?
    };

    Ok(Json(state.store.replace_all(candidates).await?))
}

fn parse_json(body: &[u8]) -> ApiResult<Value> {
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("malformed JSON: {e}")))
}

fn from_value<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::BadRequest(format!("invalid payload: {e}")))
}

/// `?author=''` and `?author=""` name the empty author.
fn strip_quotes(value: &str) -> &str {
    ['\'', '"']
        .iter()
        .find_map(|q| value.strip_prefix(*q).and_then(|v| v.strip_suffix(*q)))
        .unwrap_or(value)
}
