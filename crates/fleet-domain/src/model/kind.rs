//! Concrete vehicle types and their fixed constants

use std::fmt;
use std::str::FromStr;

use fleet_types::Error;
use serde::Serialize;

use super::category::CategoryKind;

/// Concrete vehicle type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum VehicleKind {
    Car,
    Truck,
    Bus,
    Airplane,
    CargoShip,
}

/// Capability composition and constants of one vehicle type
#[derive(Debug)]
pub struct KindProfile {
    /// Type tag used in the flat file and in reports
    pub tag: &'static str,
    pub category: CategoryKind,
    /// km per liter; `None` for vehicles that never burn fuel
    pub fuel_efficiency: Option<f64>,
    /// kg
    pub cargo_capacity: Option<f64>,
    pub passenger_capacity: Option<u32>,
    /// Log phrase for a completed move
    pub travel_phrase: &'static str,
    /// Message when the tank cannot cover a move
    pub out_of_fuel: &'static str,
}

static CAR: KindProfile = KindProfile {
    tag: "Car",
    category: CategoryKind::Land,
    fuel_efficiency: Some(15.0),
    cargo_capacity: None,
    passenger_capacity: Some(5),
    travel_phrase: "Driving on road",
    out_of_fuel: "Not enough fuel to drive the distance.",
};

static TRUCK: KindProfile = KindProfile {
    tag: "Truck",
    category: CategoryKind::Land,
    fuel_efficiency: Some(8.0),
    cargo_capacity: Some(20_000.0),
    passenger_capacity: None,
    travel_phrase: "Hauling cargo on road",
    out_of_fuel: "Not enough fuel to haul the cargo.",
};

static BUS: KindProfile = KindProfile {
    tag: "Bus",
    category: CategoryKind::Land,
    fuel_efficiency: Some(10.0),
    cargo_capacity: Some(500.0),
    passenger_capacity: Some(50),
    travel_phrase: "Transporting passengers and cargo",
    out_of_fuel: "Not enough fuel to transport passengers and cargo.",
};

static AIRPLANE: KindProfile = KindProfile {
    tag: "Airplane",
    category: CategoryKind::Air,
    fuel_efficiency: Some(5.0),
    cargo_capacity: Some(10_000.0),
    passenger_capacity: Some(200),
    travel_phrase: "Flying",
    out_of_fuel: "Not enough fuel to fly the airplane.",
};

// Sail-driven ships drop the fuel capability at construction.
static CARGO_SHIP: KindProfile = KindProfile {
    tag: "CargoShip",
    category: CategoryKind::Water,
    fuel_efficiency: Some(4.0),
    cargo_capacity: Some(50_000.0),
    passenger_capacity: None,
    travel_phrase: "Sailing with cargo",
    out_of_fuel: "Not enough fuel to sail the cargo ship.",
};

impl VehicleKind {
    /// Every kind, in report order
    pub const ALL: [VehicleKind; 5] = [
        VehicleKind::Car,
        VehicleKind::Truck,
        VehicleKind::Bus,
        VehicleKind::Airplane,
        VehicleKind::CargoShip,
    ];

    pub fn profile(&self) -> &'static KindProfile {
        match self {
            VehicleKind::Car => &CAR,
            VehicleKind::Truck => &TRUCK,
            VehicleKind::Bus => &BUS,
            VehicleKind::Airplane => &AIRPLANE,
            VehicleKind::CargoShip => &CARGO_SHIP,
        }
    }

    pub fn tag(&self) -> &'static str {
        self.profile().tag
    }

    pub fn category(&self) -> CategoryKind {
        self.profile().category
    }

    /// Exact, case-sensitive tag match as written in the flat file
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

/// Case-insensitive lookup for user-typed names
impl FromStr for VehicleKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::invalid(format!("Unknown vehicle type: {}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_is_exact() {
        assert_eq!(VehicleKind::from_tag("CargoShip"), Some(VehicleKind::CargoShip));
        assert_eq!(VehicleKind::from_tag("cargoship"), None);
        assert_eq!(VehicleKind::from_tag(""), None);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("airplane".parse::<VehicleKind>().unwrap(), VehicleKind::Airplane);
        assert_eq!(" BUS ".parse::<VehicleKind>().unwrap(), VehicleKind::Bus);
        assert!(matches!(
            "Bicycle".parse::<VehicleKind>(),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_capability_table() {
        assert_eq!(VehicleKind::Car.profile().passenger_capacity, Some(5));
        assert_eq!(VehicleKind::Car.profile().cargo_capacity, None);
        assert_eq!(VehicleKind::Truck.profile().passenger_capacity, None);
        assert_eq!(VehicleKind::Bus.profile().cargo_capacity, Some(500.0));
        assert_eq!(VehicleKind::Bus.profile().passenger_capacity, Some(50));
        assert_eq!(VehicleKind::Airplane.profile().cargo_capacity, Some(10_000.0));
        assert_eq!(VehicleKind::Airplane.profile().passenger_capacity, Some(200));
        assert_eq!(VehicleKind::CargoShip.profile().cargo_capacity, Some(50_000.0));
        assert_eq!(VehicleKind::CargoShip.category(), CategoryKind::Water);
    }
}
