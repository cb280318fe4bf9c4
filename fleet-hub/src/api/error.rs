//! API Error Handling
//!
//! Maps ingestion failures onto HTTP responses for the feed.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::service::IngestError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// Persistence failed; the feed should redeliver the batch
    Unavailable(IngestError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unavailable(err) => {
                tracing::error!("Batch failed: {:?}", err);
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        if err.is_retryable() {
            ApiError::Unavailable(err)
        } else {
            ApiError::BadRequest(err.to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
