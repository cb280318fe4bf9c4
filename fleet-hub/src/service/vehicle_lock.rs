//! Per-vehicle locks
//!
//! Serializes batch processing for one vehicle inside this process while
//! batches for other vehicles keep running concurrently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = Mutex<HashMap<String, Arc<AsyncMutex<()>>>>;

/// Keyed async locks, one per vehicle identifier
///
/// Entries are dropped once nobody holds or waits on them, so the map only
/// grows with the number of vehicles in flight.
#[derive(Clone, Default)]
pub struct VehicleLocks {
    locks: Arc<LockMap>,
}

impl VehicleLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other batch for `vehicle_id` is being processed
    pub async fn lock(&self, vehicle_id: &str) -> VehicleGuard {
        let mutex = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            // a waiter cancelled before it acquired leaves its entry behind
            locks.retain(|_, mutex| Arc::strong_count(mutex) > 1);
            locks
                .entry(vehicle_id.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        let guard = mutex.lock_owned().await;

        VehicleGuard {
            vehicle_id: vehicle_id.to_string(),
            locks: Arc::clone(&self.locks),
            guard: Some(guard),
        }
    }

    /// Number of vehicles currently holding or waiting on a lock
    pub fn in_flight(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|mutex| Arc::strong_count(mutex) > 1)
            .count()
    }
}

/// Held while a batch for one vehicle is processed
pub struct VehicleGuard {
    vehicle_id: String,
    locks: Arc<LockMap>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for VehicleGuard {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        self.guard.take();

        // only the map left once nobody waits
        let idle = locks
            .get(&self.vehicle_id)
            .is_some_and(|mutex| Arc::strong_count(mutex) == 1);
        if idle {
            locks.remove(&self.vehicle_id);
        }
    }
}
