//! Service Module
//!
//! Business logic layer for the hub.
//! Services orchestrate between repositories and contain domain logic.

pub mod error;
pub mod ingestion;
pub mod vehicle_lock;
pub mod vehicle_state;

// Re-export for convenience
pub use error::IngestError;
pub use ingestion::{IngestOutcome, IngestionHandler};
pub use vehicle_lock::VehicleLocks;
pub use vehicle_state::{SummaryUpdate, VehicleStateUpdater};
