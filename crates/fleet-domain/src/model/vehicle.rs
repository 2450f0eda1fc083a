//! Vehicle entity

use std::cmp::Ordering;
use std::fmt;

use fleet_types::{Error, Result};
use serde::Serialize;

use super::capability::{
    CargoCarrier, CargoHold, FuelConsumable, FuelTank, Maintainable, PassengerCabin,
    PassengerCarrier,
};
use super::category::Category;
use super::kind::VehicleKind;

/// Distance since the last service above which a vehicle needs maintenance (km)
pub const MAINTENANCE_THRESHOLD_KM: f64 = 10_000.0;

/// A fleet vehicle: identity, odometer, medium, and optional capabilities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    id: String,
    kind: VehicleKind,
    model: String,
    /// km/h
    max_speed: f64,
    /// km
    current_mileage: f64,
    /// km since the last service
    maintenance_accumulator: f64,
    maintenance_scheduled: bool,
    category: Category,
    fuel: Option<FuelTank>,
    cargo: Option<CargoHold>,
    passengers: Option<PassengerCabin>,
}

impl Vehicle {
    /// Build a vehicle of `kind` travelling through `category`
    ///
    /// Validates the id, max speed and medium attribute, and wires the
    /// capabilities the kind declares. A sail-driven water vehicle gets no
    /// fuel tank.
    pub fn new(
        kind: VehicleKind,
        id: impl Into<String>,
        model: impl Into<String>,
        max_speed: f64,
        category: Category,
    ) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::invalid("Vehicle ID cannot be empty."));
        }
        if max_speed <= 0.0 || !max_speed.is_finite() {
            return Err(Error::invalid("Max speed must be positive."));
        }
        if category.kind() != kind.category() {
            return Err(Error::invalid(format!(
                "{} is a {} vehicle, not {}",
                kind,
                kind.category(),
                category.kind()
            )));
        }
        category.validate()?;

        let profile = kind.profile();
        let fuel = profile
            .fuel_efficiency
            .filter(|_| !category.has_sail())
            .map(FuelTank::new);

        Ok(Self {
            id,
            kind,
            model: model.into(),
            max_speed,
            current_mileage: 0.0,
            maintenance_accumulator: 0.0,
            maintenance_scheduled: false,
            category,
            fuel,
            cargo: profile.cargo_capacity.map(CargoHold::new),
            passengers: profile.passenger_capacity.map(PassengerCabin::new),
        })
    }

    pub fn car(id: impl Into<String>, model: impl Into<String>, max_speed: f64, wheels: u32) -> Result<Self> {
        Self::new(VehicleKind::Car, id, model, max_speed, Category::Land { wheels })
    }

    pub fn truck(id: impl Into<String>, model: impl Into<String>, max_speed: f64, wheels: u32) -> Result<Self> {
        Self::new(VehicleKind::Truck, id, model, max_speed, Category::Land { wheels })
    }

    pub fn bus(id: impl Into<String>, model: impl Into<String>, max_speed: f64, wheels: u32) -> Result<Self> {
        Self::new(VehicleKind::Bus, id, model, max_speed, Category::Land { wheels })
    }

    pub fn airplane(
        id: impl Into<String>,
        model: impl Into<String>,
        max_speed: f64,
        max_altitude: f64,
    ) -> Result<Self> {
        Self::new(VehicleKind::Airplane, id, model, max_speed, Category::Air { max_altitude })
    }

    pub fn cargo_ship(
        id: impl Into<String>,
        model: impl Into<String>,
        max_speed: f64,
        has_sail: bool,
    ) -> Result<Self> {
        Self::new(VehicleKind::CargoShip, id, model, max_speed, Category::Water { has_sail })
    }

    /// Restore odometer readings, e.g. when reloading a saved fleet
    pub fn with_odometer(mut self, mileage: f64, maintenance_accumulator: f64) -> Result<Self> {
        if mileage < 0.0 || !mileage.is_finite() {
            return Err(Error::invalid("Mileage cannot be negative."));
        }
        if maintenance_accumulator < 0.0 || !maintenance_accumulator.is_finite() {
            return Err(Error::invalid("Maintenance distance cannot be negative."));
        }
        self.current_mileage = mileage;
        self.maintenance_accumulator = maintenance_accumulator;
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Case-insensitive id comparison used for fleet lookups
    pub fn matches_id(&self, id: &str) -> bool {
        self.id == id || self.id.to_lowercase() == id.to_lowercase()
    }

    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn current_mileage(&self) -> f64 {
        self.current_mileage
    }

    pub fn maintenance_accumulator(&self) -> f64 {
        self.maintenance_accumulator
    }

    pub fn maintenance_scheduled(&self) -> bool {
        self.maintenance_scheduled
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Travel `distance` km, burning fuel first when the vehicle has a tank
    ///
    /// A fuel shortage surfaces as [`Error::InvalidOperation`]. Nothing is
    /// mutated when the move fails.
    pub fn move_by(&mut self, distance: f64) -> Result<()> {
        if distance < 0.0 || !distance.is_finite() {
            return Err(Error::invalid("Distance cannot be negative."));
        }
        let out_of_fuel = self.kind.profile().out_of_fuel;
        if let Some(tank) = self.fuel.as_mut() {
            tank.consume_fuel(distance).map_err(|err| match err {
                Error::InsufficientFuel { .. } => Error::invalid(out_of_fuel),
                other => other,
            })?;
        }
        self.current_mileage += distance;
        self.maintenance_accumulator += distance;

        match self.category {
            Category::Air { max_altitude } => log::debug!(
                "{} {}: {} at altitude {} meters for {} km",
                self.kind,
                self.id,
                self.kind.profile().travel_phrase,
                max_altitude,
                distance
            ),
            _ => log::debug!(
                "{} {}: {} for {} km",
                self.kind,
                self.id,
                self.kind.profile().travel_phrase,
                distance
            ),
        }
        Ok(())
    }

    /// km per liter; 0 for vehicles without a fuel tank
    pub fn calculate_fuel_efficiency(&self) -> f64 {
        self.fuel.as_ref().map_or(0.0, |tank| tank.efficiency())
    }

    /// Hours to cover `distance`, adjusted for the travel medium
    pub fn estimate_journey_time(&self, distance: f64) -> f64 {
        distance / self.max_speed * self.category.kind().journey_multiplier()
    }

    /// Natural fleet ordering: ascending fuel efficiency
    pub fn cmp_by_efficiency(&self, other: &Self) -> Ordering {
        self.calculate_fuel_efficiency()
            .total_cmp(&other.calculate_fuel_efficiency())
    }

    /// Multi-line human readable description
    pub fn display_info(&self) -> String {
        self.to_string()
    }

    pub fn fuel(&self) -> Option<&dyn FuelConsumable> {
        self.fuel.as_ref().map(|tank| tank as &dyn FuelConsumable)
    }

    pub fn fuel_mut(&mut self) -> Option<&mut dyn FuelConsumable> {
        self.fuel.as_mut().map(|tank| tank as &mut dyn FuelConsumable)
    }

    pub fn cargo(&self) -> Option<&dyn CargoCarrier> {
        self.cargo.as_ref().map(|hold| hold as &dyn CargoCarrier)
    }

    pub fn cargo_mut(&mut self) -> Option<&mut dyn CargoCarrier> {
        self.cargo.as_mut().map(|hold| hold as &mut dyn CargoCarrier)
    }

    pub fn passengers(&self) -> Option<&dyn PassengerCarrier> {
        self.passengers
            .as_ref()
            .map(|cabin| cabin as &dyn PassengerCarrier)
    }

    pub fn passengers_mut(&mut self) -> Option<&mut dyn PassengerCarrier> {
        self.passengers
            .as_mut()
            .map(|cabin| cabin as &mut dyn PassengerCarrier)
    }

    /// True when the vehicle is currently due for service
    pub fn is_due_for_maintenance(&self) -> bool {
        self.needs_maintenance()
    }
}

impl Maintainable for Vehicle {
    fn schedule_maintenance(&mut self) {
        self.maintenance_scheduled = true;
        log::debug!("Maintenance scheduled for {} ID: {}", self.kind, self.id);
    }

    fn needs_maintenance(&self) -> bool {
        self.maintenance_scheduled || self.maintenance_accumulator > MAINTENANCE_THRESHOLD_KM
    }

    fn perform_maintenance(&mut self) {
        self.maintenance_scheduled = false;
        self.maintenance_accumulator = 0.0;
        log::debug!("Maintenance performed for {} ID: {}", self.kind, self.id);
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vehicle Info:")?;
        writeln!(f, "Type: {}", self.kind)?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Model: {}", self.model)?;
        writeln!(f, "Max Speed: {} km/h", self.max_speed)?;
        writeln!(f, "Mileage: {} km", self.current_mileage)?;
        writeln!(f, "{}", self.category)?;

        if let Some(cabin) = self.passengers() {
            writeln!(f, "Passenger Capacity: {}", cabin.passenger_capacity())?;
            writeln!(f, "Current Passengers: {}", cabin.current_passengers())?;
        }
        if let Some(hold) = self.cargo() {
            writeln!(f, "Cargo Capacity: {} kg", hold.cargo_capacity())?;
            writeln!(f, "Current Cargo: {} kg", hold.current_cargo())?;
        }
        if let Some(tank) = self.fuel() {
            writeln!(f, "Fuel Level: {} liters", tank.fuel_level())?;
        }
        write!(f, "Needs Maintenance: {}", self.needs_maintenance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fueled_car(liters: f64) -> Vehicle {
        let mut car = Vehicle::car("C001", "Toyota", 120.0, 4).unwrap();
        car.fuel_mut().unwrap().refuel(liters).unwrap();
        car
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(matches!(
            Vehicle::car("  ", "Toyota", 120.0, 4),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_constructor_validation() {
        assert!(Vehicle::car("C1", "Toyota", 0.0, 4).is_err());
        assert!(Vehicle::truck("T1", "Volvo", 100.0, 0).is_err());
        assert!(Vehicle::airplane("A1", "Boeing", 800.0, -1.0).is_err());
        assert!(Vehicle::new(
            VehicleKind::Bus,
            "B1",
            "Mercedes",
            80.0,
            Category::Water { has_sail: false }
        )
        .is_err());
    }

    #[test]
    fn test_move_accumulates_exact_distance() {
        let mut car = fueled_car(100.0);
        car.move_by(150.0).unwrap();
        car.move_by(0.0).unwrap();
        assert_eq!(car.current_mileage(), 150.0);
        assert_eq!(car.maintenance_accumulator(), 150.0);
        assert!((car.fuel().unwrap().fuel_level() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_move_leaves_state() {
        let mut car = fueled_car(10.0);
        let before = car.clone();
        assert!(matches!(car.move_by(-1.0), Err(Error::InvalidOperation(_))));
        assert_eq!(car, before);
    }

    #[test]
    fn test_airplane_fuel_scenario() {
        let mut plane = Vehicle::airplane("A001", "Boeing", 800.0, 10_000.0).unwrap();
        let err = plane.move_by(100.0).unwrap_err();
        match err {
            Error::InvalidOperation(msg) => assert_eq!(msg, "Not enough fuel to fly the airplane."),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(plane.current_mileage(), 0.0);

        plane.fuel_mut().unwrap().refuel(50.0).unwrap();
        plane.move_by(100.0).unwrap();
        assert!((plane.fuel().unwrap().fuel_level() - 30.0).abs() < 1e-9);
        assert_eq!(plane.current_mileage(), 100.0);
    }

    #[test]
    fn test_bus_passenger_scenario() {
        let mut bus = Vehicle::bus("B001", "Mercedes", 80.0, 6).unwrap();
        let cabin = bus.passengers_mut().unwrap();
        assert!(matches!(cabin.board_passengers(51), Err(Error::Overload(_))));
        cabin.board_passengers(50).unwrap();
        assert!(matches!(cabin.board_passengers(1), Err(Error::Overload(_))));
        assert!(matches!(
            cabin.disembark_passengers(60),
            Err(Error::InvalidOperation(_))
        ));
        assert_eq!(cabin.current_passengers(), 50);
    }

    #[test]
    fn test_sail_ship_has_no_fuel_capability() {
        let mut ship = Vehicle::cargo_ship("S001", "Titanic", 50.0, true).unwrap();
        assert!(ship.fuel().is_none());
        assert_eq!(ship.calculate_fuel_efficiency(), 0.0);
        ship.move_by(500.0).unwrap();
        assert_eq!(ship.current_mileage(), 500.0);

        let motor = Vehicle::cargo_ship("S002", "Maersk", 40.0, false).unwrap();
        assert_eq!(motor.calculate_fuel_efficiency(), 4.0);
    }

    #[test]
    fn test_capability_composition() {
        let car = Vehicle::car("C1", "Toyota", 120.0, 4).unwrap();
        assert!(car.fuel().is_some() && car.passengers().is_some() && car.cargo().is_none());

        let truck = Vehicle::truck("T1", "Volvo", 100.0, 6).unwrap();
        assert!(truck.cargo().is_some() && truck.passengers().is_none());
        assert_eq!(truck.calculate_fuel_efficiency(), 8.0);

        let plane = Vehicle::airplane("A1", "Boeing", 800.0, 10_000.0).unwrap();
        assert!(plane.cargo().is_some() && plane.passengers().is_some());
    }

    #[test]
    fn test_journey_time_multipliers() {
        let car = Vehicle::car("C1", "Toyota", 100.0, 4).unwrap();
        assert!((car.estimate_journey_time(100.0) - 1.10).abs() < 1e-9);

        let plane = Vehicle::airplane("A1", "Boeing", 800.0, 10_000.0).unwrap();
        assert!((plane.estimate_journey_time(800.0) - 0.95).abs() < 1e-9);

        let ship = Vehicle::cargo_ship("S1", "Titanic", 50.0, true).unwrap();
        assert!((ship.estimate_journey_time(50.0) - 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_maintenance_threshold() {
        let mut ship = Vehicle::cargo_ship("S1", "Titanic", 50.0, true).unwrap();
        ship.move_by(MAINTENANCE_THRESHOLD_KM).unwrap();
        assert!(!ship.is_due_for_maintenance());
        ship.move_by(0.5).unwrap();
        assert!(ship.is_due_for_maintenance());

        ship.perform_maintenance();
        assert!(!ship.needs_maintenance());
        assert_eq!(ship.maintenance_accumulator(), 0.0);
        assert_eq!(ship.current_mileage(), MAINTENANCE_THRESHOLD_KM + 0.5);
    }

    #[test]
    fn test_scheduled_maintenance_flag() {
        let mut car = Vehicle::car("C1", "Toyota", 120.0, 4).unwrap();
        car.schedule_maintenance();
        assert!(car.needs_maintenance());
        car.perform_maintenance();
        assert!(!car.needs_maintenance());
        assert!(!car.maintenance_scheduled());
    }

    #[test]
    fn test_every_kind_takes_maintenance() {
        let mut fleet = vec![
            Vehicle::car("C1", "Toyota", 120.0, 4).unwrap(),
            Vehicle::truck("T1", "Volvo", 100.0, 6).unwrap(),
            Vehicle::bus("B1", "Mercedes", 80.0, 6).unwrap(),
            Vehicle::airplane("A1", "Boeing", 800.0, 10_000.0).unwrap(),
            Vehicle::cargo_ship("S1", "Titanic", 50.0, false).unwrap(),
        ];
        for vehicle in &mut fleet {
            vehicle.schedule_maintenance();
            assert!(vehicle.is_due_for_maintenance(), "{}", vehicle.id());
            assert!(vehicle.display_info().ends_with("Needs Maintenance: true"));
            vehicle.perform_maintenance();
            assert!(!vehicle.is_due_for_maintenance(), "{}", vehicle.id());
        }
    }

    #[test]
    fn test_matches_id_ignores_case() {
        let car = Vehicle::car("C001", "Toyota", 120.0, 4).unwrap();
        assert!(car.matches_id("c001"));
        assert!(!car.matches_id("C002"));
    }

    #[test]
    fn test_with_odometer_rejects_negative() {
        let car = Vehicle::car("C1", "Toyota", 120.0, 4).unwrap();
        assert!(car.clone().with_odometer(-1.0, 0.0).is_err());
        assert!(car.clone().with_odometer(0.0, -1.0).is_err());
        let restored = car.with_odometer(1200.0, 300.0).unwrap();
        assert_eq!(restored.current_mileage(), 1200.0);
        assert_eq!(restored.maintenance_accumulator(), 300.0);
    }

    #[test]
    fn test_display_info_layers() {
        let info = fueled_car(12.5).display_info();
        assert!(info.starts_with("Vehicle Info:"));
        assert!(info.contains("ID: C001"));
        assert!(info.contains("Number of Wheels: 4"));
        assert!(info.contains("Passenger Capacity: 5"));
        assert!(info.contains("Fuel Level: 12.5 liters"));
        assert!(!info.contains("Cargo Capacity"));
        assert!(info.ends_with("Needs Maintenance: false"));
    }

    #[test]
    fn test_serializes_capabilities() {
        let car = fueled_car(10.0);
        let json = serde_json::to_value(&car).unwrap();
        assert_eq!(json["kind"], "Car");
        assert_eq!(json["category"]["medium"], "land");
        assert_eq!(json["fuel"]["level"], 10.0);
        assert!(json["cargo"].is_null());
    }
}
