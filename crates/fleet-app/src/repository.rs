//! Repository adapters for persistence layer

use std::path::PathBuf;

use fleet_infra::persistence::CsvFleetRepository;
use fleet_types::Result;

use crate::config::Config;

/// Open the fleet file named by the config
pub fn open_fleet_repo(config: &Config) -> Result<CsvFleetRepository> {
    Ok(CsvFleetRepository::new(config.fleet_file()?))
}

/// Open a fleet file at a custom path
pub fn open_fleet_repo_at(path: PathBuf) -> CsvFleetRepository {
    CsvFleetRepository::new(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_follows_config() {
        let config = Config {
            fleet_file: Some(PathBuf::from("/tmp/fleet-test/fleet.csv")),
            ..Config::default()
        };
        let repo = open_fleet_repo(&config).unwrap();
        assert_eq!(repo.path(), std::path::Path::new("/tmp/fleet-test/fleet.csv"));
    }
}
