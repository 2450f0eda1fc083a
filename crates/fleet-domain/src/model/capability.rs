//! Capability contracts a vehicle type may support in any combination
//!
//! Each contract is a trait. The fuel, cargo and passenger contracts are
//! implemented by small state components that a [`Vehicle`](super::Vehicle)
//! holds optionally; fleet code asks the vehicle for `Option<&mut dyn Trait>`
//! instead of branching on the concrete type.

use fleet_types::{Error, Result};
use serde::Serialize;

/// Vehicles that burn fuel to travel
pub trait FuelConsumable {
    /// Add fuel to the tank. Fails on non-positive amounts.
    fn refuel(&mut self, amount: f64) -> Result<()>;

    /// Burn the fuel needed for `distance` km and return the liters used.
    ///
    /// Fails with [`Error::InsufficientFuel`] and leaves the level untouched
    /// when the tank cannot cover the distance.
    fn consume_fuel(&mut self, distance: f64) -> Result<f64>;

    fn fuel_level(&self) -> f64;

    /// Kilometers per liter
    fn efficiency(&self) -> f64;
}

/// Vehicles that haul cargo, measured in kg
pub trait CargoCarrier {
    fn load_cargo(&mut self, weight: f64) -> Result<()>;
    fn unload_cargo(&mut self, weight: f64) -> Result<()>;
    fn cargo_capacity(&self) -> f64;
    fn current_cargo(&self) -> f64;
}

/// Vehicles that carry passengers
pub trait PassengerCarrier {
    fn board_passengers(&mut self, count: u32) -> Result<()>;
    fn disembark_passengers(&mut self, count: u32) -> Result<()>;
    fn passenger_capacity(&self) -> u32;
    fn current_passengers(&self) -> u32;
}

/// Vehicles with mileage-driven service intervals
pub trait Maintainable {
    /// Flag the vehicle for service regardless of mileage
    fn schedule_maintenance(&mut self);

    /// True when service was scheduled or the distance since the last
    /// service exceeds the threshold
    fn needs_maintenance(&self) -> bool;

    /// Clear the flag and reset the distance since the last service
    fn perform_maintenance(&mut self);
}

/// Fuel state for fuel-consuming vehicles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelTank {
    level: f64,
    efficiency: f64,
}

impl FuelTank {
    /// Empty tank burning one liter per `efficiency` km
    pub fn new(efficiency: f64) -> Self {
        Self {
            level: 0.0,
            efficiency,
        }
    }

    /// Liters needed to cover `distance` km
    pub fn required_for(&self, distance: f64) -> f64 {
        distance / self.efficiency
    }
}

impl FuelConsumable for FuelTank {
    fn refuel(&mut self, amount: f64) -> Result<()> {
        if amount <= 0.0 || !amount.is_finite() {
            return Err(Error::invalid("Refuel amount must be positive."));
        }
        self.level += amount;
        log::debug!("Refueled {} liters. Current fuel: {} liters", amount, self.level);
        Ok(())
    }

    fn consume_fuel(&mut self, distance: f64) -> Result<f64> {
        if distance < 0.0 || !distance.is_finite() {
            return Err(Error::invalid("Distance cannot be negative."));
        }
        let required = self.required_for(distance);
        if self.level < required {
            return Err(Error::InsufficientFuel {
                required,
                available: self.level,
            });
        }
        self.level -= required;
        Ok(required)
    }

    fn fuel_level(&self) -> f64 {
        self.level
    }

    fn efficiency(&self) -> f64 {
        self.efficiency
    }
}

/// Cargo state, bounded by a fixed capacity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CargoHold {
    capacity: f64,
    current: f64,
}

impl CargoHold {
    pub fn new(capacity: f64) -> Self {
        Self {
            capacity,
            current: 0.0,
        }
    }
}

impl CargoCarrier for CargoHold {
    fn load_cargo(&mut self, weight: f64) -> Result<()> {
        if weight < 0.0 || !weight.is_finite() {
            return Err(Error::invalid("Cargo weight cannot be negative."));
        }
        if self.current + weight > self.capacity {
            return Err(Error::overload("Cannot load cargo. Exceeds capacity."));
        }
        self.current += weight;
        log::debug!("{} kg loaded. Current cargo: {} kg", weight, self.current);
        Ok(())
    }

    fn unload_cargo(&mut self, weight: f64) -> Result<()> {
        if weight < 0.0 || !weight.is_finite() {
            return Err(Error::invalid("Cargo weight cannot be negative."));
        }
        if weight > self.current {
            return Err(Error::invalid("Cannot unload more than current cargo."));
        }
        self.current -= weight;
        log::debug!("{} kg unloaded. Current cargo: {} kg", weight, self.current);
        Ok(())
    }

    fn cargo_capacity(&self) -> f64 {
        self.capacity
    }

    fn current_cargo(&self) -> f64 {
        self.current
    }
}

/// Passenger state, bounded by a fixed seat count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassengerCabin {
    capacity: u32,
    current: u32,
}

impl PassengerCabin {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            current: 0,
        }
    }
}

impl PassengerCarrier for PassengerCabin {
    fn board_passengers(&mut self, count: u32) -> Result<()> {
        // current never exceeds capacity, so the subtraction cannot underflow
        if count > self.capacity - self.current {
            return Err(Error::overload("Cannot board passengers. Exceeds capacity."));
        }
        self.current += count;
        log::debug!(
            "{} passengers boarded. Current passengers: {}",
            count,
            self.current
        );
        Ok(())
    }

    fn disembark_passengers(&mut self, count: u32) -> Result<()> {
        if count > self.current {
            return Err(Error::invalid(
                "Cannot disembark more passengers than current.",
            ));
        }
        self.current -= count;
        log::debug!(
            "{} passengers disembarked. Current passengers: {}",
            count,
            self.current
        );
        Ok(())
    }

    fn passenger_capacity(&self) -> u32 {
        self.capacity
    }

    fn current_passengers(&self) -> u32 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refuel_rejects_non_positive() {
        let mut tank = FuelTank::new(10.0);
        assert!(matches!(tank.refuel(0.0), Err(Error::InvalidOperation(_))));
        assert!(matches!(tank.refuel(-5.0), Err(Error::InvalidOperation(_))));
        assert!(matches!(tank.refuel(f64::NAN), Err(Error::InvalidOperation(_))));
        assert_eq!(tank.fuel_level(), 0.0);
    }

    #[test]
    fn test_consume_fuel_uses_efficiency() {
        let mut tank = FuelTank::new(5.0);
        tank.refuel(50.0).unwrap();
        let used = tank.consume_fuel(100.0).unwrap();
        assert!((used - 20.0).abs() < 1e-9);
        assert!((tank.fuel_level() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_consume_fuel_shortage_leaves_level() {
        let mut tank = FuelTank::new(10.0);
        tank.refuel(5.0).unwrap();
        let err = tank.consume_fuel(100.0).unwrap_err();
        match err {
            Error::InsufficientFuel {
                required,
                available,
            } => {
                assert!((required - 10.0).abs() < 1e-9);
                assert!((available - 5.0).abs() < 1e-9);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!((tank.fuel_level() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_consume_exact_level_drains_to_zero() {
        let mut tank = FuelTank::new(4.0);
        tank.refuel(25.0).unwrap();
        tank.consume_fuel(100.0).unwrap();
        assert_eq!(tank.fuel_level(), 0.0);
    }

    #[test]
    fn test_cargo_capacity_bound() {
        let mut hold = CargoHold::new(500.0);
        hold.load_cargo(500.0).unwrap();
        assert!(matches!(hold.load_cargo(0.5), Err(Error::Overload(_))));
        assert_eq!(hold.current_cargo(), 500.0);
    }

    #[test]
    fn test_unload_more_than_current() {
        let mut hold = CargoHold::new(500.0);
        hold.load_cargo(100.0).unwrap();
        assert!(matches!(
            hold.unload_cargo(100.5),
            Err(Error::InvalidOperation(_))
        ));
        hold.unload_cargo(100.0).unwrap();
        assert_eq!(hold.current_cargo(), 0.0);
    }

    #[test]
    fn test_negative_cargo_rejected() {
        let mut hold = CargoHold::new(500.0);
        hold.load_cargo(100.0).unwrap();
        assert!(hold.load_cargo(-50.0).is_err());
        assert!(hold.unload_cargo(-50.0).is_err());
        assert_eq!(hold.current_cargo(), 100.0);
    }

    #[test]
    fn test_passenger_bounds() {
        let mut cabin = PassengerCabin::new(5);
        assert!(matches!(cabin.board_passengers(6), Err(Error::Overload(_))));
        cabin.board_passengers(5).unwrap();
        assert!(matches!(cabin.board_passengers(1), Err(Error::Overload(_))));
        assert!(matches!(
            cabin.disembark_passengers(6),
            Err(Error::InvalidOperation(_))
        ));
        cabin.disembark_passengers(5).unwrap();
        assert_eq!(cabin.current_passengers(), 0);
    }

    #[test]
    fn test_board_huge_count_does_not_overflow() {
        let mut cabin = PassengerCabin::new(50);
        cabin.board_passengers(10).unwrap();
        assert!(cabin.board_passengers(u32::MAX).is_err());
        assert_eq!(cabin.current_passengers(), 10);
    }
}
