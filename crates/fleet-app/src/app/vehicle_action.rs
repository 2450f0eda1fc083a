//! Cargo, passenger, fuel and service actions on a single vehicle

use std::fmt;

use fleet_domain::{Maintainable, Vehicle};
use fleet_types::{Error, Result};
use serde::Serialize;

/// One capability operation requested for a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "action", content = "amount", rename_all = "snake_case")]
pub enum VehicleAction {
    /// kg
    LoadCargo(f64),
    /// kg
    UnloadCargo(f64),
    CargoStatus,
    BoardPassengers(u32),
    DisembarkPassengers(u32),
    PassengerStatus,
    /// liters
    Refuel(f64),
    ScheduleMaintenance,
    PerformMaintenance,
}

/// State of the touched capability after an action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "capability", rename_all = "snake_case")]
pub enum ActionOutcome {
    Cargo { current: f64, capacity: f64 },
    Passengers { current: u32, capacity: u32 },
    Fuel { level: f64 },
    Maintenance { needs_maintenance: bool },
}

impl VehicleAction {
    /// Run the action against `vehicle`
    ///
    /// Fails with [`Error::InvalidOperation`] when the vehicle lacks the
    /// capability; capability errors pass through unchanged.
    pub fn apply_to(self, vehicle: &mut Vehicle) -> Result<ActionOutcome> {
        match self {
            VehicleAction::LoadCargo(_) | VehicleAction::UnloadCargo(_) | VehicleAction::CargoStatus => {
                let hold = vehicle
                    .cargo_mut()
                    .ok_or_else(|| Error::invalid("This vehicle cannot carry cargo."))?;
                match self {
                    VehicleAction::LoadCargo(weight) => hold.load_cargo(weight)?,
                    VehicleAction::UnloadCargo(weight) => hold.unload_cargo(weight)?,
                    _ => {}
                }
                Ok(ActionOutcome::Cargo {
                    current: hold.current_cargo(),
                    capacity: hold.cargo_capacity(),
                })
            }
            VehicleAction::BoardPassengers(_)
            | VehicleAction::DisembarkPassengers(_)
            | VehicleAction::PassengerStatus => {
                let cabin = vehicle
                    .passengers_mut()
                    .ok_or_else(|| Error::invalid("This vehicle cannot carry passengers."))?;
                match self {
                    VehicleAction::BoardPassengers(count) => cabin.board_passengers(count)?,
                    VehicleAction::DisembarkPassengers(count) => cabin.disembark_passengers(count)?,
                    _ => {}
                }
                Ok(ActionOutcome::Passengers {
                    current: cabin.current_passengers(),
                    capacity: cabin.passenger_capacity(),
                })
            }
            VehicleAction::Refuel(amount) => {
                let tank = vehicle
                    .fuel_mut()
                    .ok_or_else(|| Error::invalid("This vehicle does not use fuel."))?;
                tank.refuel(amount)?;
                Ok(ActionOutcome::Fuel {
                    level: tank.fuel_level(),
                })
            }
            VehicleAction::ScheduleMaintenance | VehicleAction::PerformMaintenance => {
                if self == VehicleAction::ScheduleMaintenance {
                    vehicle.schedule_maintenance();
                } else {
                    vehicle.perform_maintenance();
                }
                Ok(ActionOutcome::Maintenance {
                    needs_maintenance: vehicle.needs_maintenance(),
                })
            }
        }
    }
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOutcome::Cargo { current, capacity } => {
                write!(f, "Current cargo: {} kg (capacity {} kg)", current, capacity)
            }
            ActionOutcome::Passengers { current, capacity } => {
                write!(f, "Current passengers: {} (capacity {})", current, capacity)
            }
            ActionOutcome::Fuel { level } => write!(f, "Current fuel: {} liters", level),
            ActionOutcome::Maintenance { needs_maintenance } => {
                write!(f, "Needs maintenance: {}", needs_maintenance)
            }
        }
    }
}
