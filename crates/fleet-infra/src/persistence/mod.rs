//! Persistence implementations
//!
//! File-based implementations of the repository traits.

mod csv_fleet_repo;

pub use csv_fleet_repo::CsvFleetRepository;
