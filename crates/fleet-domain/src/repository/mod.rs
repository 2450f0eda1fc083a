//! Repository trait definitions for fleet persistence

use serde::Serialize;

use crate::model::Vehicle;
use fleet_types::Result;

/// A stored record that could not be turned back into a vehicle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordFailure {
    /// 1-based line number in the source
    pub line: u64,
    /// Vehicle id, when the record got that far
    pub id: Option<String>,
    pub reason: String,
}

impl std::fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.id {
            Some(id) => write!(f, "line {} (vehicle {}): {}", self.line, id, self.reason),
            None => write!(f, "line {}: {}", self.line, self.reason),
        }
    }
}

/// Vehicles read back from storage, plus the records that were skipped
#[derive(Debug, Default)]
pub struct LoadedFleet {
    pub vehicles: Vec<Vehicle>,
    pub failures: Vec<RecordFailure>,
}

/// Whole-fleet storage
///
/// I/O failures abort the call; malformed individual records are reported
/// in [`LoadedFleet::failures`] without aborting the load.
pub trait FleetRepository {
    /// Replace the stored fleet with `vehicles`, in order
    fn save_all(&self, vehicles: &[Vehicle]) -> Result<()>;

    /// Read every stored vehicle, in stored order
    fn load_all(&self) -> Result<LoadedFleet>;
}
