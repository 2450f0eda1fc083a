//! Fleet summary reporting

use serde::Serialize;

use crate::model::{Vehicle, VehicleKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeCount {
    pub kind: VehicleKind,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceDue {
    pub kind: VehicleKind,
    pub id: String,
    pub maintenance_accumulator: f64,
}

/// Fleet-wide figures behind the text report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetReport {
    pub total_vehicles: usize,
    /// Only kinds present in the fleet, in [`VehicleKind::ALL`] order
    pub counts_by_type: Vec<TypeCount>,
    /// km/l averaged over every vehicle, 0 for an empty fleet
    pub average_efficiency: f64,
    pub total_mileage: f64,
    pub needing_maintenance: Vec<MaintenanceDue>,
}

pub fn build_fleet_report(vehicles: &[Vehicle]) -> FleetReport {
    let counts_by_type = VehicleKind::ALL
        .into_iter()
        .map(|kind| TypeCount {
            kind,
            count: vehicles.iter().filter(|v| v.kind() == kind).count(),
        })
        .filter(|entry| entry.count > 0)
        .collect();

    let total_efficiency: f64 = vehicles.iter().map(Vehicle::calculate_fuel_efficiency).sum();
    let average_efficiency = if vehicles.is_empty() {
        0.0
    } else {
        total_efficiency / vehicles.len() as f64
    };

    let needing_maintenance = vehicles
        .iter()
        .filter(|v| v.is_due_for_maintenance())
        .map(|v| MaintenanceDue {
            kind: v.kind(),
            id: v.id().to_string(),
            maintenance_accumulator: v.maintenance_accumulator(),
        })
        .collect();

    FleetReport {
        total_vehicles: vehicles.len(),
        counts_by_type,
        average_efficiency,
        total_mileage: vehicles.iter().map(Vehicle::current_mileage).sum(),
        needing_maintenance,
    }
}

pub fn generate_fleet_report(report: &FleetReport) -> String {
    let mut out = String::new();
    out.push_str("==================================================\n");
    out.push_str("                   Fleet Report                   \n");
    out.push_str("==================================================\n\n");
    out.push_str(&format!("  Total Vehicles:      {}\n", report.total_vehicles));
    out.push_str(&format!(
        "  Average Efficiency:  {:.2} km/l\n",
        report.average_efficiency
    ));
    out.push_str(&format!("  Total Mileage:       {:.2} km\n\n", report.total_mileage));

    out.push_str("Count by Type:\n");
    if report.counts_by_type.is_empty() {
        out.push_str("  (no vehicles)\n");
    }
    for entry in &report.counts_by_type {
        out.push_str(&format!("  - {:<10} {}\n", format!("{}:", entry.kind), entry.count));
    }
    out.push('\n');

    out.push_str("Vehicles Needing Maintenance:\n");
    if report.needing_maintenance.is_empty() {
        out.push_str("  (none)\n");
    }
    for due in &report.needing_maintenance {
        out.push_str(&format!(
            "  - {} (ID: {}) {:.1} km since service\n",
            due.kind, due.id, due.maintenance_accumulator
        ));
    }
    out.push_str("==================================================\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Maintainable;

    fn sample_fleet() -> Vec<Vehicle> {
        let mut car = Vehicle::car("C001", "Toyota", 120.0, 4).unwrap();
        car.fuel_mut().unwrap().refuel(100.0).unwrap();
        car.move_by(300.0).unwrap();

        let mut bus = Vehicle::bus("B001", "Mercedes", 80.0, 6).unwrap();
        bus.schedule_maintenance();

        let ship = Vehicle::cargo_ship("S001", "Titanic", 50.0, true)
            .unwrap()
            .with_odometer(12_000.0, 10_500.0)
            .unwrap();

        vec![car, bus, ship]
    }

    #[test]
    fn test_empty_fleet() {
        let report = build_fleet_report(&[]);
        assert_eq!(report.total_vehicles, 0);
        assert_eq!(report.average_efficiency, 0.0);
        assert!(report.counts_by_type.is_empty());
        assert!(generate_fleet_report(&report).contains("(no vehicles)"));
    }

    #[test]
    fn test_counts_and_totals() {
        let report = build_fleet_report(&sample_fleet());
        assert_eq!(report.total_vehicles, 3);
        assert_eq!(
            report.counts_by_type,
            vec![
                TypeCount { kind: VehicleKind::Car, count: 1 },
                TypeCount { kind: VehicleKind::Bus, count: 1 },
                TypeCount { kind: VehicleKind::CargoShip, count: 1 },
            ]
        );
        // (15 + 10 + 0) / 3
        assert!((report.average_efficiency - 25.0 / 3.0).abs() < 1e-9);
        assert!((report.total_mileage - 12_300.0).abs() < 1e-9);
    }

    #[test]
    fn test_maintenance_listing() {
        let report = build_fleet_report(&sample_fleet());
        let ids: Vec<_> = report.needing_maintenance.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["B001", "S001"]);

        let text = generate_fleet_report(&report);
        assert!(text.contains("Fleet Report"));
        assert!(text.contains("Bus (ID: B001)"));
        assert!(text.contains("CargoShip (ID: S001)"));
        assert!(text.contains("8.33 km/l"));
    }
}
