//! Demo fleet used to seed an empty installation

use fleet_domain::Vehicle;
use fleet_infra::fleet_manifest::load_manifest_from_str;
use fleet_types::Result;

/// One vehicle of each type, as a fleet manifest
pub const DEMO_MANIFEST: &str = r#"
[[vehicles]]
type = "Car"
id = "C001"
model = "Toyota"
max_speed = 120.0
wheels = 4

[[vehicles]]
type = "Truck"
id = "T001"
model = "Volvo"
max_speed = 100.0
wheels = 6

[[vehicles]]
type = "Bus"
id = "B001"
model = "Mercedes"
max_speed = 80.0
wheels = 6

[[vehicles]]
type = "Airplane"
id = "A001"
model = "Boeing"
max_speed = 800.0
max_altitude = 10000.0

[[vehicles]]
type = "CargoShip"
id = "S001"
model = "Titanic"
max_speed = 50.0
has_sail = true
"#;

pub fn demo_fleet() -> Result<Vec<Vehicle>> {
    load_manifest_from_str(DEMO_MANIFEST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_domain::VehicleKind;

    #[test]
    fn test_demo_fleet_has_every_type() {
        let fleet = demo_fleet().unwrap();
        let kinds: Vec<_> = fleet.iter().map(|v| v.kind()).collect();
        assert_eq!(kinds, VehicleKind::ALL.to_vec());
        assert!(fleet.iter().all(|v| v.current_mileage() == 0.0));
        assert!(fleet[4].fuel().is_none());
    }
}
