//! Fleet use cases

mod fleet_manager;
mod vehicle_action;

pub use fleet_manager::{BatchOutcome, FleetManager, FuelUsage, LoadSummary, VehicleFailure};
pub use vehicle_action::{ActionOutcome, VehicleAction};
