//! Fleet Manager - owns the fleet and runs fleet-wide use cases
//!
//! Single-vehicle operations fail fast. Batch operations visit every vehicle
//! in fleet order, isolate per-vehicle failures, and hand them back in the
//! outcome alongside a `warn!` log line.

use std::path::Path;

use fleet_domain::repository::{FleetRepository, RecordFailure};
use fleet_domain::service::{
    build_fleet_report, generate_fleet_report, plan_route, FleetReport, RouteEstimate,
};
use fleet_domain::{CategoryKind, Maintainable, Vehicle, VehicleKind};
use fleet_infra::persistence::CsvFleetRepository;
use fleet_types::{Error, Result};
use serde::Serialize;

use super::vehicle_action::{ActionOutcome, VehicleAction};

/// A vehicle a batch operation could not process
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleFailure {
    pub id: String,
    pub reason: String,
}

/// Result of a batch operation over the fleet
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchOutcome {
    /// Vehicles the operation applied to
    pub succeeded: usize,
    /// Vehicles the operation did not apply to (not capable of it)
    pub skipped: usize,
    pub failures: Vec<VehicleFailure>,
}

impl BatchOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, vehicle: &Vehicle, operation: &str, result: Result<()>) {
        match result {
            Ok(()) => self.succeeded += 1,
            Err(err) => {
                log::warn!("{} failed for {} {}: {}", operation, vehicle.kind(), vehicle.id(), err);
                self.failures.push(VehicleFailure {
                    id: vehicle.id().to_string(),
                    reason: err.to_string(),
                });
            }
        }
    }
}

/// Fuel burned by a fleet-wide consumption run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FuelUsage {
    /// Liters, excluding vehicles that failed
    pub total_liters: f64,
    pub failures: Vec<VehicleFailure>,
}

/// Result of loading a saved fleet
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadSummary {
    pub loaded: usize,
    pub failures: Vec<RecordFailure>,
}

/// The fleet: an ordered collection of vehicles with unique ids
#[derive(Debug, Default)]
pub struct FleetManager {
    vehicles: Vec<Vehicle>,
}

impl FleetManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fleet from `vehicles`, rejecting duplicate ids
    pub fn with_vehicles(vehicles: impl IntoIterator<Item = Vehicle>) -> Result<Self> {
        let mut fleet = Self::new();
        for vehicle in vehicles {
            fleet.add_vehicle(vehicle)?;
        }
        Ok(fleet)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Append a vehicle. Ids are compared ignoring case.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<()> {
        if self.vehicles.iter().any(|v| v.matches_id(vehicle.id())) {
            return Err(Error::DuplicateId(vehicle.id().to_string()));
        }
        log::info!("Added {} {}", vehicle.kind(), vehicle.id());
        self.vehicles.push(vehicle);
        Ok(())
    }

    /// Remove and return the vehicle whose id matches exactly
    ///
    /// Unlike every other lookup this one is case-sensitive.
    pub fn remove_vehicle(&mut self, id: &str) -> Result<Vehicle> {
        let index = self
            .vehicles
            .iter()
            .position(|v| v.id() == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let vehicle = self.vehicles.remove(index);
        log::info!("Removed {} {}", vehicle.kind(), vehicle.id());
        Ok(vehicle)
    }

    pub fn get(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.matches_id(id))
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|v| v.matches_id(id))
    }

    fn require_mut(&mut self, id: &str) -> Result<&mut Vehicle> {
        self.get_mut(id).ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Move every vehicle `distance` km
    pub fn start_all_journeys(&mut self, distance: f64) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for vehicle in &mut self.vehicles {
            let result = vehicle.move_by(distance);
            outcome.record(vehicle, "Journey", result);
        }
        log::info!(
            "Journey of {} km: {} moved, {} failed",
            distance,
            outcome.succeeded,
            outcome.failures.len()
        );
        outcome
    }

    /// Add `amount` liters to every fuel-consuming vehicle
    pub fn refuel_all(&mut self, amount: f64) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for vehicle in &mut self.vehicles {
            let result = match vehicle.fuel_mut() {
                Some(tank) => tank.refuel(amount),
                None => {
                    outcome.skipped += 1;
                    continue;
                }
            };
            outcome.record(vehicle, "Refuel", result);
        }
        outcome
    }

    /// Burn the fuel each fuel-consuming vehicle needs for `distance` km
    ///
    /// Only the tanks change; odometers are left alone. Vehicles that cannot
    /// cover the distance are reported and left out of the total.
    pub fn total_fuel_consumption(&mut self, distance: f64) -> FuelUsage {
        let mut usage = FuelUsage::default();
        for vehicle in &mut self.vehicles {
            let Some(tank) = vehicle.fuel_mut() else {
                continue;
            };
            match tank.consume_fuel(distance) {
                Ok(liters) => usage.total_liters += liters,
                Err(err) => {
                    log::warn!(
                        "Fuel consumption failed for {} {}: {}",
                        vehicle.kind(),
                        vehicle.id(),
                        err
                    );
                    usage.failures.push(VehicleFailure {
                        id: vehicle.id().to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        usage
    }

    /// Service every vehicle that is due; returns how many were serviced
    pub fn maintain_all(&mut self) -> usize {
        let mut serviced = 0;
        for vehicle in &mut self.vehicles {
            if vehicle.needs_maintenance() {
                vehicle.perform_maintenance();
                serviced += 1;
            }
        }
        log::info!("Maintenance performed on {} vehicles", serviced);
        serviced
    }

    /// Service one vehicle if it is due; returns whether it was serviced
    pub fn maintain_by_id(&mut self, id: &str) -> Result<bool> {
        let vehicle = self.require_mut(id)?;
        if vehicle.needs_maintenance() {
            vehicle.perform_maintenance();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn vehicles_needing_maintenance(&self) -> Vec<&Vehicle> {
        self.search(Vehicle::is_due_for_maintenance)
    }

    pub fn search_by_type(&self, kind: VehicleKind) -> Vec<&Vehicle> {
        self.search(|v| v.kind() == kind)
    }

    /// Type lookup by name, ignoring case
    pub fn search_by_type_name(&self, name: &str) -> Result<Vec<&Vehicle>> {
        let kind: VehicleKind = name.parse()?;
        Ok(self.search_by_type(kind))
    }

    pub fn search_by_category(&self, category: CategoryKind) -> Vec<&Vehicle> {
        self.search(|v| v.category().kind() == category)
    }

    /// Vehicles matching `predicate`, in fleet order
    pub fn search<P>(&self, predicate: P) -> Vec<&Vehicle>
    where
        P: Fn(&Vehicle) -> bool,
    {
        self.vehicles.iter().filter(|v| predicate(v)).collect()
    }

    /// Stable sort, ascending fuel efficiency
    pub fn sort_by_efficiency(&mut self) {
        self.vehicles.sort_by(Vehicle::cmp_by_efficiency);
    }

    pub fn build_report(&self) -> FleetReport {
        build_fleet_report(&self.vehicles)
    }

    pub fn generate_report(&self) -> String {
        generate_fleet_report(&self.build_report())
    }

    /// Time and fuel estimates for every vehicle, without moving any
    pub fn plan_route(&self, distance: f64) -> Result<Vec<RouteEstimate>> {
        plan_route(&self.vehicles, distance)
    }

    /// Move one vehicle; returns its remaining fuel, if it has a tank
    pub fn start_journey(&mut self, id: &str, distance: f64) -> Result<Option<f64>> {
        let vehicle = self.require_mut(id)?;
        vehicle.move_by(distance)?;
        log::info!("{} {} travelled {} km", vehicle.kind(), vehicle.id(), distance);
        Ok(vehicle.fuel().map(|tank| tank.fuel_level()))
    }

    pub fn apply_action(&mut self, id: &str, action: VehicleAction) -> Result<ActionOutcome> {
        let vehicle = self.require_mut(id)?;
        action.apply_to(vehicle)
    }

    pub fn save_to(&self, repo: &dyn FleetRepository) -> Result<()> {
        repo.save_all(&self.vehicles)
    }

    /// Replace the fleet with the stored one
    ///
    /// The current fleet is cleared first, so a store that cannot be read
    /// leaves the fleet empty.
    pub fn load_from(&mut self, repo: &dyn FleetRepository) -> Result<LoadSummary> {
        self.vehicles.clear();
        let loaded = repo.load_all()?;
        self.vehicles = loaded.vehicles;
        Ok(LoadSummary {
            loaded: self.vehicles.len(),
            failures: loaded.failures,
        })
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.save_to(&CsvFleetRepository::new(path))
    }

    pub fn load_from_file(&mut self, path: &Path) -> Result<LoadSummary> {
        self.load_from(&CsvFleetRepository::new(path))
    }
}
