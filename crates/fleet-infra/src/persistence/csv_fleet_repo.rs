//! Flat-file implementation of FleetRepository

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use fleet_domain::repository::{FleetRepository, LoadedFleet};
use fleet_domain::Vehicle;
use fleet_types::Result;

use crate::fleet_csv;

/// Fleet stored as one comma-separated record per vehicle
pub struct CsvFleetRepository {
    path: PathBuf,
}

impl CsvFleetRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl FleetRepository for CsvFleetRepository {
    fn save_all(&self, vehicles: &[Vehicle]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(&self.path)?);
        fleet_csv::write_fleet(writer, vehicles)?;
        log::info!("Saved {} vehicles to {}", vehicles.len(), self.path.display());
        Ok(())
    }

    fn load_all(&self) -> Result<LoadedFleet> {
        let reader = BufReader::new(File::open(&self.path)?);
        let loaded = fleet_csv::read_fleet(reader)?;
        log::info!(
            "Loaded {} vehicles from {} ({} skipped)",
            loaded.vehicles.len(),
            self.path.display(),
            loaded.failures.len()
        );
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_types::Error;
    use tempfile::TempDir;

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let repo = CsvFleetRepository::new(dir.path().join("nested/fleet.csv"));
        assert!(!repo.exists());

        let car = Vehicle::car("C001", "Toyota", 120.0, 4).unwrap();
        repo.save_all(&[car.clone()]).unwrap();
        assert!(repo.exists());

        let loaded = repo.load_all().unwrap();
        assert_eq!(loaded.vehicles, vec![car]);
    }

    #[test]
    fn test_save_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let repo = CsvFleetRepository::new(dir.path().join("fleet.csv"));

        let car = Vehicle::car("C001", "Toyota", 120.0, 4).unwrap();
        let truck = Vehicle::truck("T001", "Volvo", 100.0, 6).unwrap();
        repo.save_all(&[car, truck.clone()]).unwrap();
        repo.save_all(&[truck.clone()]).unwrap();

        assert_eq!(repo.load_all().unwrap().vehicles, vec![truck]);
    }

    #[test]
    fn test_empty_fleet_writes_empty_file() {
        let dir = TempDir::new().unwrap();
        let repo = CsvFleetRepository::new(dir.path().join("fleet.csv"));
        repo.save_all(&[]).unwrap();
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), "");
        assert!(repo.load_all().unwrap().vehicles.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let repo = CsvFleetRepository::new(dir.path().join("absent.csv"));
        assert!(matches!(repo.load_all(), Err(Error::Io(_))));
    }
}
