//! API Module
//!
//! HTTP surface of the hub. The position feed delivers batches here.

pub mod error;
pub mod health;
pub mod position;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::service::IngestionHandler;

/// Create the main API router with all endpoints
pub fn create_router(handler: IngestionHandler) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/positions/batch", post(position::ingest_batch))
        .with_state(handler)
        .layer(TraceLayer::new_for_http())
}
