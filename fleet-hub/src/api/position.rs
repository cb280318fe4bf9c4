//! Position API Handlers
//!
//! Inbound endpoint for position batches.

use axum::{Json, extract::State, http::StatusCode};
use fleet_core::dto::position::PositionBatch;
use serde::Serialize;

use crate::api::error::ApiResult;
use crate::service::IngestionHandler;

/// POST /positions/batch
/// Log a batch of position reports and refresh the vehicle summary
pub async fn ingest_batch(
    State(handler): State<IngestionHandler>,
    Json(batch): Json<PositionBatch>,
) -> ApiResult<(StatusCode, Json<IngestBatchResponse>)> {
    let outcome = handler.handle(batch).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(IngestBatchResponse {
            logged: outcome.logged,
            summary: outcome.summary.as_str(),
        }),
    ))
}

// =============================================================================
// Request/Response Types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct IngestBatchResponse {
    pub logged: u64,
    pub summary: &'static str,
}
