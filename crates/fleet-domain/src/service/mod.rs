//! Domain services

pub mod fleet_report;
pub mod route_planner;

pub use fleet_report::{build_fleet_report, generate_fleet_report, FleetReport};
pub use route_planner::{plan_route, RouteEstimate};
