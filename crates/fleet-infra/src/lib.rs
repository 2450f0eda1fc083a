//! Infrastructure layer
//!
//! Concrete implementations of domain interfaces: the flat-file fleet
//! format and the TOML fleet manifest.

pub mod fleet_csv;
pub mod fleet_manifest;
pub mod persistence;
