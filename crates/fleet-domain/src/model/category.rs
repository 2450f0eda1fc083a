//! Travel medium of a vehicle

use std::fmt;
use std::str::FromStr;

use fleet_types::Error;
use serde::Serialize;

/// Medium a vehicle travels through, without its per-medium attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CategoryKind {
    Land,
    Water,
    Air,
}

impl CategoryKind {
    /// Factor applied to `distance / max_speed`
    ///
    /// Land adds 10% for traffic, water 15% for currents, air saves 5% on
    /// more direct routes.
    pub fn journey_multiplier(&self) -> f64 {
        match self {
            CategoryKind::Land => 1.10,
            CategoryKind::Water => 1.15,
            CategoryKind::Air => 0.95,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryKind::Land => "Land",
            CategoryKind::Water => "Water",
            CategoryKind::Air => "Air",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for CategoryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "land" => Ok(CategoryKind::Land),
            "water" => Ok(CategoryKind::Water),
            "air" => Ok(CategoryKind::Air),
            other => Err(Error::invalid(format!("Unknown vehicle category: {}", other))),
        }
    }
}

/// Medium plus the attribute every vehicle of that medium carries
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "medium", rename_all = "lowercase")]
pub enum Category {
    Land { wheels: u32 },
    Water { has_sail: bool },
    Air { max_altitude: f64 },
}

impl Category {
    pub fn kind(&self) -> CategoryKind {
        match self {
            Category::Land { .. } => CategoryKind::Land,
            Category::Water { .. } => CategoryKind::Water,
            Category::Air { .. } => CategoryKind::Air,
        }
    }

    /// Reject attribute values no real vehicle of this medium can have
    pub fn validate(&self) -> fleet_types::Result<()> {
        match *self {
            Category::Land { wheels } if wheels == 0 => {
                Err(Error::invalid("Number of wheels must be positive."))
            }
            Category::Air { max_altitude } if max_altitude <= 0.0 || !max_altitude.is_finite() => {
                Err(Error::invalid("Max altitude must be positive."))
            }
            _ => Ok(()),
        }
    }

    pub fn wheels(&self) -> Option<u32> {
        match *self {
            Category::Land { wheels } => Some(wheels),
            _ => None,
        }
    }

    pub fn has_sail(&self) -> bool {
        matches!(self, Category::Water { has_sail: true })
    }

    pub fn max_altitude(&self) -> Option<f64> {
        match *self {
            Category::Air { max_altitude } => Some(max_altitude),
            _ => None,
        }
    }
}

/// The info line this medium adds to a vehicle description
impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Land { wheels } => write!(f, "Number of Wheels: {}", wheels),
            Category::Water { has_sail } => write!(f, "Has Sail: {}", has_sail),
            Category::Air { max_altitude } => write!(f, "Max Altitude: {} meters", max_altitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipliers() {
        assert!((CategoryKind::Land.journey_multiplier() - 1.10).abs() < 1e-12);
        assert!((CategoryKind::Water.journey_multiplier() - 1.15).abs() < 1e-12);
        assert!((CategoryKind::Air.journey_multiplier() - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(Category::Land { wheels: 0 }.validate().is_err());
        assert!(Category::Land { wheels: 4 }.validate().is_ok());
        assert!(Category::Air { max_altitude: 0.0 }.validate().is_err());
        assert!(Category::Air { max_altitude: f64::NAN }.validate().is_err());
        assert!(Category::Water { has_sail: false }.validate().is_ok());
    }

    #[test]
    fn test_parse_category_kind() {
        assert_eq!("WATER".parse::<CategoryKind>().unwrap(), CategoryKind::Water);
        assert!("space".parse::<CategoryKind>().is_err());
    }
}
