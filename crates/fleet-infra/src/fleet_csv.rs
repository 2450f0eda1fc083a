//! Flat-file fleet format
//!
//! One vehicle per line, comma separated, no header and no quoting. The first
//! field is the type tag; the remaining columns are positional and differ per
//! type, as listed in [`SCHEMAS`]:
//!
//! ```text
//! Car,C001,Toyota,120,0,4,40,5,0,2
//! Bus,B001,Mercedes,80,150,6,35,50,12,500,150,80
//! ```
//!
//! Commas inside a field are not escaped. A model name containing a comma
//! is written as-is and the record then fails its arity check on load.
//! Text fields are read back byte for byte; only the tag, numeric and flag
//! columns tolerate surrounding whitespace.

use std::io::{Read, Write};

use fleet_domain::repository::{LoadedFleet, RecordFailure};
use fleet_domain::{Vehicle, VehicleKind};
use fleet_types::{Error, Result};

/// One positional field of a stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Tag,
    Id,
    Model,
    MaxSpeed,
    Mileage,
    Wheels,
    HasSail,
    MaxAltitude,
    Fuel,
    PassengerCapacity,
    CurrentPassengers,
    CargoCapacity,
    CurrentCargo,
    Maintenance,
}

/// Column layout and constructor for one vehicle type
pub struct RecordSchema {
    pub kind: VehicleKind,
    pub columns: &'static [Column],
    /// Columns every record must carry; the rest are optional trailing ones
    pub required: usize,
    build: fn(&RecordFields) -> Result<Vehicle>,
}

use Column::*;

pub static SCHEMAS: [RecordSchema; 5] = [
    RecordSchema {
        kind: VehicleKind::Car,
        columns: &[
            Tag, Id, Model, MaxSpeed, Mileage, Wheels, Fuel, PassengerCapacity, Maintenance,
            CurrentPassengers,
        ],
        required: 10,
        build: |f| Vehicle::car(f.id.as_str(), f.model.as_str(), f.max_speed, f.wheels),
    },
    RecordSchema {
        kind: VehicleKind::Truck,
        columns: &[
            Tag, Id, Model, MaxSpeed, Mileage, Wheels, Fuel, CargoCapacity, Maintenance,
            CurrentCargo,
        ],
        required: 10,
        build: |f| Vehicle::truck(f.id.as_str(), f.model.as_str(), f.max_speed, f.wheels),
    },
    RecordSchema {
        kind: VehicleKind::Bus,
        columns: &[
            Tag, Id, Model, MaxSpeed, Mileage, Wheels, Fuel, PassengerCapacity,
            CurrentPassengers, CargoCapacity, Maintenance, CurrentCargo,
        ],
        required: 12,
        build: |f| Vehicle::bus(f.id.as_str(), f.model.as_str(), f.max_speed, f.wheels),
    },
    // The cargo columns came later; ten-column airplane records still load.
    RecordSchema {
        kind: VehicleKind::Airplane,
        columns: &[
            Tag, Id, Model, MaxSpeed, Mileage, MaxAltitude, Fuel, PassengerCapacity,
            Maintenance, CurrentPassengers, CargoCapacity, CurrentCargo,
        ],
        required: 10,
        build: |f| Vehicle::airplane(f.id.as_str(), f.model.as_str(), f.max_speed, f.max_altitude),
    },
    RecordSchema {
        kind: VehicleKind::CargoShip,
        columns: &[
            Tag, Id, Model, MaxSpeed, Mileage, HasSail, Fuel, CargoCapacity, Maintenance,
            CurrentCargo,
        ],
        required: 10,
        build: |f| Vehicle::cargo_ship(f.id.as_str(), f.model.as_str(), f.max_speed, f.has_sail),
    },
];

pub fn schema_for(kind: VehicleKind) -> &'static RecordSchema {
    match kind {
        VehicleKind::Car => &SCHEMAS[0],
        VehicleKind::Truck => &SCHEMAS[1],
        VehicleKind::Bus => &SCHEMAS[2],
        VehicleKind::Airplane => &SCHEMAS[3],
        VehicleKind::CargoShip => &SCHEMAS[4],
    }
}

/// Values parsed out of a record before the vehicle is built
#[derive(Debug, Default)]
pub struct RecordFields {
    id: String,
    model: String,
    max_speed: f64,
    mileage: f64,
    wheels: u32,
    has_sail: bool,
    max_altitude: f64,
    fuel: f64,
    current_passengers: u32,
    current_cargo: f64,
    maintenance: f64,
}

/// Encode one vehicle as the fields of its record
pub fn encode_vehicle(vehicle: &Vehicle) -> Vec<String> {
    let category = vehicle.category();
    schema_for(vehicle.kind())
        .columns
        .iter()
        .map(|column| match column {
            Tag => vehicle.kind().tag().to_string(),
            Id => vehicle.id().to_string(),
            Model => vehicle.model().to_string(),
            MaxSpeed => vehicle.max_speed().to_string(),
            Mileage => vehicle.current_mileage().to_string(),
            Wheels => category.wheels().unwrap_or_default().to_string(),
            HasSail => category.has_sail().to_string(),
            MaxAltitude => category.max_altitude().unwrap_or_default().to_string(),
            Fuel => vehicle.fuel().map_or(0.0, |t| t.fuel_level()).to_string(),
            PassengerCapacity => vehicle
                .passengers()
                .map_or(0, |p| p.passenger_capacity())
                .to_string(),
            CurrentPassengers => vehicle
                .passengers()
                .map_or(0, |p| p.current_passengers())
                .to_string(),
            CargoCapacity => vehicle.cargo().map_or(0.0, |c| c.cargo_capacity()).to_string(),
            CurrentCargo => vehicle.cargo().map_or(0.0, |c| c.current_cargo()).to_string(),
            Maintenance => vehicle.maintenance_accumulator().to_string(),
        })
        .collect()
}

/// Rebuild a vehicle from the fields of one record
///
/// Dispatches on the type tag, builds the vehicle through its constructor,
/// then replays odometer, fuel, cargo and passenger state. Zero values are
/// parsed but cause no state change.
pub fn decode_record<S: AsRef<str>>(fields: &[S]) -> Result<Vehicle> {
    let tag = fields.first().map(|f| f.as_ref().trim()).unwrap_or_default();
    let kind = VehicleKind::from_tag(tag)
        .ok_or_else(|| Error::invalid(format!("Unknown vehicle type: {}", tag)))?;
    let schema = schema_for(kind);

    if fields.len() < schema.required || fields.len() > schema.columns.len() {
        return Err(Error::invalid(format!(
            "{} record expects {} fields, found {}",
            kind,
            expected_arity(schema),
            fields.len()
        )));
    }

    let mut parsed = RecordFields::default();
    for (column, raw) in schema.columns.iter().zip(fields.iter()) {
        let raw = raw.as_ref();
        match column {
            Tag => {}
            Id => parsed.id = raw.to_string(),
            Model => parsed.model = raw.to_string(),
            MaxSpeed => parsed.max_speed = parse_number(raw, "max speed")?,
            Mileage => parsed.mileage = parse_number(raw, "mileage")?,
            Wheels => parsed.wheels = parse_count(raw, "wheel count")?,
            HasSail => parsed.has_sail = parse_flag(raw, "sail flag")?,
            MaxAltitude => parsed.max_altitude = parse_number(raw, "max altitude")?,
            Fuel => parsed.fuel = parse_number(raw, "fuel level")?,
            CurrentPassengers => parsed.current_passengers = parse_count(raw, "passenger count")?,
            CurrentCargo => parsed.current_cargo = parse_number(raw, "cargo weight")?,
            Maintenance => parsed.maintenance = parse_number(raw, "maintenance distance")?,
            // Capacities are fixed per type; the stored value is only checked for shape
            PassengerCapacity => {
                parse_count(raw, "passenger capacity")?;
            }
            CargoCapacity => {
                parse_number(raw, "cargo capacity")?;
            }
        }
    }

    let mut vehicle = (schema.build)(&parsed)?.with_odometer(parsed.mileage, parsed.maintenance)?;

    if parsed.fuel < 0.0 {
        return Err(Error::invalid("Fuel level cannot be negative."));
    }
    if parsed.fuel > 0.0 {
        vehicle
            .fuel_mut()
            .ok_or_else(|| Error::invalid("This ship uses sails, refueling not applicable."))?
            .refuel(parsed.fuel)?;
    }
    if parsed.current_passengers > 0 {
        if let Some(cabin) = vehicle.passengers_mut() {
            cabin.board_passengers(parsed.current_passengers)?;
        }
    }
    if parsed.current_cargo > 0.0 {
        if let Some(hold) = vehicle.cargo_mut() {
            hold.load_cargo(parsed.current_cargo)?;
        }
    } else if parsed.current_cargo < 0.0 {
        return Err(Error::invalid("Cargo weight cannot be negative."));
    }

    Ok(vehicle)
}

fn expected_arity(schema: &RecordSchema) -> String {
    if schema.required == schema.columns.len() {
        schema.required.to_string()
    } else {
        format!("{} to {}", schema.required, schema.columns.len())
    }
}

fn parse_number(raw: &str, what: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| Error::invalid(format!("Invalid {}: '{}'", what, raw)))
}

fn parse_count(raw: &str, what: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| Error::invalid(format!("Invalid {}: '{}'", what, raw)))
}

fn parse_flag(raw: &str, what: &str) -> Result<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(Error::invalid(format!("Invalid {}: '{}'", what, raw)))
    }
}

/// Write every vehicle as one newline-terminated record
pub fn write_fleet<W: Write>(writer: W, vehicles: &[Vehicle]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for vehicle in vehicles {
        if vehicle.model().contains([',', '\n', '\r']) || vehicle.id().contains([',', '\n', '\r']) {
            log::warn!(
                "Vehicle {} has a comma or line break in its id or model; its record will not reload",
                vehicle.id()
            );
        }
        writer.write_record(encode_vehicle(vehicle))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a fleet, isolating malformed records
///
/// Only I/O failures abort; any other problem is recorded against its line
/// and the remaining records are still read. A record whose id repeats an
/// earlier one (ignoring case) is rejected as a duplicate.
pub fn read_fleet<R: Read>(reader: R) -> Result<LoadedFleet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut loaded = LoadedFleet::default();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                let line = err.position().map_or(0, |p| p.line());
                log::warn!("Skipping unreadable record on line {}: {}", line, err);
                loaded.failures.push(RecordFailure {
                    line,
                    id: None,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let line = record.position().map_or(0, |p| p.line());
        let fields: Vec<&str> = record.iter().collect();
        let decoded = decode_record(&fields).and_then(|vehicle| {
            if loaded.vehicles.iter().any(|v| v.matches_id(vehicle.id())) {
                Err(Error::DuplicateId(vehicle.id().to_string()))
            } else {
                Ok(vehicle)
            }
        });
        match decoded {
            Ok(vehicle) => loaded.vehicles.push(vehicle),
            Err(err) => {
                let id = fields.get(1).filter(|id| !id.is_empty()).map(|id| id.to_string());
                log::warn!(
                    "Error loading vehicle {} on line {}: {}",
                    id.as_deref().unwrap_or("?"),
                    line,
                    err
                );
                loaded.failures.push(RecordFailure {
                    line,
                    id,
                    reason: err.to_string(),
                });
            }
        }
    }
    Ok(loaded)
}
