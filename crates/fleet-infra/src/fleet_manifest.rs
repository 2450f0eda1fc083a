//! Fleet manifest loader from TOML
//!
//! A manifest describes vehicles to create, one `[[vehicles]]` table each:
//!
//! ```toml
//! [[vehicles]]
//! type = "Airplane"
//! id = "A001"
//! model = "Boeing"
//! max_speed = 800.0
//! max_altitude = 10000.0
//! fuel = 50.0
//! ```
//!
//! Unlike the flat-file fleet, a manifest is all or nothing: the first bad
//! entry fails the whole load.

use std::fs;
use std::path::Path;

use fleet_domain::{Category, Vehicle, VehicleKind};
use fleet_types::{ConfigError, Error, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct FleetManifest {
    #[serde(default)]
    vehicles: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    #[serde(rename = "type")]
    kind: String,
    id: String,
    model: String,
    max_speed: f64,
    /// Land vehicles; defaults to 4 for cars and 6 for trucks and buses
    wheels: Option<u32>,
    /// Required for airplanes
    max_altitude: Option<f64>,
    #[serde(default)]
    has_sail: bool,
    #[serde(default)]
    fuel: f64,
    #[serde(default)]
    passengers: u32,
    #[serde(default)]
    cargo: f64,
}

impl ManifestEntry {
    fn category(&self, kind: VehicleKind) -> Result<Category> {
        Ok(match kind {
            VehicleKind::Car => Category::Land {
                wheels: self.wheels.unwrap_or(4),
            },
            VehicleKind::Truck | VehicleKind::Bus => Category::Land {
                wheels: self.wheels.unwrap_or(6),
            },
            VehicleKind::Airplane => Category::Air {
                max_altitude: self
                    .max_altitude
                    .ok_or_else(|| Error::invalid("Airplanes need a max_altitude."))?,
            },
            VehicleKind::CargoShip => Category::Water {
                has_sail: self.has_sail,
            },
        })
    }

    fn build(&self) -> Result<Vehicle> {
        let kind: VehicleKind = self.kind.parse()?;
        let mut vehicle = Vehicle::new(
            kind,
            self.id.as_str(),
            self.model.as_str(),
            self.max_speed,
            self.category(kind)?,
        )?;

        if self.fuel > 0.0 {
            vehicle
                .fuel_mut()
                .ok_or_else(|| Error::invalid(format!("{} does not take fuel.", self.id)))?
                .refuel(self.fuel)?;
        }
        if self.passengers > 0 {
            vehicle
                .passengers_mut()
                .ok_or_else(|| Error::invalid(format!("{} does not carry passengers.", self.id)))?
                .board_passengers(self.passengers)?;
        }
        if self.cargo > 0.0 {
            vehicle
                .cargo_mut()
                .ok_or_else(|| Error::invalid(format!("{} does not carry cargo.", self.id)))?
                .load_cargo(self.cargo)?;
        }
        Ok(vehicle)
    }
}

/// Load vehicles from a manifest file
pub fn load_manifest_from_file(path: &Path) -> Result<Vec<Vehicle>> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Config(ConfigError::ParseError(format!(
            "Failed to read fleet manifest {}: {}",
            path.display(),
            e
        )))
    })?;
    load_manifest_from_str(&content)
}

/// Load vehicles from manifest TOML text
///
/// Entries are built in order. A bad entry is reported as
/// [`Error::MalformedRecord`] with its 1-based position in the manifest.
pub fn load_manifest_from_str(toml_content: &str) -> Result<Vec<Vehicle>> {
    let manifest: FleetManifest = toml::from_str(toml_content).map_err(|e| {
        Error::Config(ConfigError::ParseError(format!(
            "Failed to parse fleet manifest TOML: {}",
            e
        )))
    })?;

    manifest
        .vehicles
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry.build().map_err(|e| Error::MalformedRecord {
                line: index as u64 + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const TEST_TOML: &str = r#"
[[vehicles]]
type = "Car"
id = "C001"
model = "Toyota"
max_speed = 120.0
fuel = 40.0
passengers = 2

[[vehicles]]
type = "bus"
id = "B001"
model = "Mercedes"
max_speed = 80.0
cargo = 100.0

[[vehicles]]
type = "CargoShip"
id = "S001"
model = "Titanic"
max_speed = 50.0
has_sail = true
"#;

    #[test]
    fn test_load_from_str() {
        let vehicles = load_manifest_from_str(TEST_TOML).unwrap();
        assert_eq!(vehicles.len(), 3);

        let car = &vehicles[0];
        assert_eq!(car.category(), Category::Land { wheels: 4 });
        assert_eq!(car.fuel().unwrap().fuel_level(), 40.0);
        assert_eq!(car.passengers().unwrap().current_passengers(), 2);

        assert_eq!(vehicles[1].kind(), VehicleKind::Bus);
        assert_eq!(vehicles[1].category().wheels(), Some(6));
        assert!(vehicles[2].fuel().is_none());
    }

    #[test]
    fn test_empty_manifest() {
        assert!(load_manifest_from_str("").unwrap().is_empty());
    }

    #[test]
    fn test_bad_entry_reports_position() {
        let toml = r#"
[[vehicles]]
type = "Car"
id = "C001"
model = "Toyota"
max_speed = 120.0

[[vehicles]]
type = "Airplane"
id = "A001"
model = "Boeing"
max_speed = 800.0
"#;
        match load_manifest_from_str(toml) {
            Err(Error::MalformedRecord { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("max_altitude"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_fuel_on_sail_ship_rejected() {
        let toml = r#"
[[vehicles]]
type = "CargoShip"
id = "S001"
model = "Titanic"
max_speed = 50.0
has_sail = true
fuel = 10.0
"#;
        assert!(matches!(
            load_manifest_from_str(toml),
            Err(Error::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            load_manifest_from_str("[[vehicles]\n"),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), TEST_TOML).unwrap();
        assert_eq!(load_manifest_from_file(file.path()).unwrap().len(), 3);

        let missing = file.path().with_extension("missing");
        assert!(load_manifest_from_file(&missing).is_err());
    }
}
