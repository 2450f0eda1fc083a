//! Fleet domain layer
//!
//! Vehicles are a single composed struct: a kind descriptor for the type
//! constants, a category for the travel medium, and optional capability
//! components that fleet code reaches through trait objects.

pub mod model;
pub mod repository;
pub mod service;

pub use model::{
    CargoCarrier, CargoHold, Category, CategoryKind, FuelConsumable, FuelTank, KindProfile,
    Maintainable, PassengerCabin, PassengerCarrier, Vehicle, VehicleKind,
    MAINTENANCE_THRESHOLD_KM,
};
