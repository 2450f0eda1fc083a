//! Journey estimates for every vehicle over one distance

use serde::Serialize;

use crate::model::{Vehicle, VehicleKind};
use fleet_types::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEstimate {
    pub kind: VehicleKind,
    pub id: String,
    pub journey_hours: f64,
    /// Liters the journey would burn; 0 for vehicles without a tank
    pub fuel_needed: f64,
    /// `None` for vehicles that do not run on fuel
    pub current_fuel: Option<f64>,
    pub can_complete: bool,
}

/// Estimate time and fuel for each vehicle without moving any of them
pub fn plan_route(vehicles: &[Vehicle], distance: f64) -> Result<Vec<RouteEstimate>> {
    if distance < 0.0 || !distance.is_finite() {
        return Err(Error::invalid("Distance cannot be negative."));
    }

    Ok(vehicles
        .iter()
        .map(|v| {
            let (fuel_needed, current_fuel) = match v.fuel() {
                Some(tank) => (distance / tank.efficiency(), Some(tank.fuel_level())),
                None => (0.0, None),
            };
            RouteEstimate {
                kind: v.kind(),
                id: v.id().to_string(),
                journey_hours: v.estimate_journey_time(distance),
                fuel_needed,
                current_fuel,
                can_complete: current_fuel.map_or(true, |level| level >= fuel_needed),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_distance() {
        assert!(matches!(plan_route(&[], -5.0), Err(Error::InvalidOperation(_))));
    }

    #[test]
    fn test_estimates() {
        let mut car = Vehicle::car("C001", "Toyota", 120.0, 4).unwrap();
        car.fuel_mut().unwrap().refuel(5.0).unwrap();
        let ship = Vehicle::cargo_ship("S001", "Titanic", 50.0, true).unwrap();

        let plan = plan_route(&[car.clone(), ship], 150.0).unwrap();
        assert_eq!(plan.len(), 2);

        let car_plan = &plan[0];
        assert!((car_plan.journey_hours - 150.0 / 120.0 * 1.10).abs() < 1e-9);
        assert!((car_plan.fuel_needed - 10.0).abs() < 1e-9);
        assert_eq!(car_plan.current_fuel, Some(5.0));
        assert!(!car_plan.can_complete);

        let ship_plan = &plan[1];
        assert_eq!(ship_plan.fuel_needed, 0.0);
        assert_eq!(ship_plan.current_fuel, None);
        assert!(ship_plan.can_complete);

        // planning never mutates
        assert_eq!(car.current_mileage(), 0.0);
    }
}
