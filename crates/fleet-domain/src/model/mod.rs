//! Domain model types

pub mod capability;
pub mod category;
pub mod kind;
pub mod vehicle;

pub use capability::{
    CargoCarrier, CargoHold, FuelConsumable, FuelTank, Maintainable, PassengerCabin,
    PassengerCarrier,
};
pub use category::{Category, CategoryKind};
pub use kind::{KindProfile, VehicleKind};
pub use vehicle::{Vehicle, MAINTENANCE_THRESHOLD_KM};
