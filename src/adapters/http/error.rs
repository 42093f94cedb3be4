//! HTTP error mapping.
//!
//! | Error | Status |
//! |---|---|
//! | `QuoteError::Validation` | 400 |
//! | `QuoteError::EmptyCollection` | 404 |
//! | `QuoteError::Persistence` | 500 |
//! | `BadRequest` (malformed JSON) | 400 |
//! | `Internal` | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::domain::QuoteError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Quote(#[from] QuoteError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Quote(QuoteError::Validation(_)) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Quote(QuoteError::EmptyCollection) => StatusCode::NOT_FOUND,
            Self::Quote(QuoteError::Persistence(_)) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
