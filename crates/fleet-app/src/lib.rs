//! Application service layer - fleet manager, vehicle actions, config

pub mod app;
pub mod config;
pub mod demo;
pub mod repository;

pub use app::{
    ActionOutcome, BatchOutcome, FleetManager, FuelUsage, LoadSummary, VehicleAction,
    VehicleFailure,
};
