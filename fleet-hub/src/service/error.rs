//! Ingestion error types

use thiserror::Error;

use crate::repository::StoreError;

pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors that fail a position batch
///
/// A vehicle without a summary record is not an error; see
/// [`SummaryUpdate::VehicleNotRegistered`](super::SummaryUpdate).
#[derive(Debug, Error)]
pub enum IngestError {
    /// The batch was rejected before anything was persisted
    #[error("Invalid batch: {0}")]
    InvalidBatch(String),

    /// The position log write failed; nothing from the batch was stored
    #[error("Failed to write position log for vehicle {vehicle_id}: {source}")]
    LogWrite {
        vehicle_id: String,
        #[source]
        source: StoreError,
    },

    /// Looking up the vehicle summary failed after the log was written
    #[error("Failed to look up vehicle {vehicle_id}: {source}")]
    SummaryLookup {
        vehicle_id: String,
        #[source]
        source: StoreError,
    },

    /// Saving the vehicle summary failed after the log was written
    #[error("Failed to save vehicle {vehicle_id}: {source}")]
    SummaryWrite {
        vehicle_id: String,
        #[source]
        source: StoreError,
    },
}

impl IngestError {
    /// Whether redelivering the same batch could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::InvalidBatch(_) => false,
            Self::LogWrite { source, .. }
            | Self::SummaryLookup { source, .. }
            | Self::SummaryWrite { source, .. } => source.is_retryable(),
        }
    }
}
