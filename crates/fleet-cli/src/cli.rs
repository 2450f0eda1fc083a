//! CLI definition using clap

use clap::{Parser, Subcommand, ValueEnum};
use fleet_domain::{CategoryKind, VehicleKind};
use fleet_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fleet-manager")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Register, move, service and report on a mixed vehicle fleet")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Fleet file to work on. Uses config value if not specified.
    #[arg(long, global = true)]
    pub fleet_file: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new vehicle
    Add {
        /// Vehicle type (car, truck, bus, airplane, cargoship)
        kind: VehicleKind,

        /// Unique vehicle ID (compared ignoring case)
        id: String,

        /// Model name
        model: String,

        /// Top speed in km/h
        #[arg(long)]
        max_speed: f64,

        /// Number of wheels (land vehicles). Defaults to 4 for cars, 6 otherwise.
        #[arg(long)]
        wheels: Option<u32>,

        /// Maximum altitude in meters (airplanes)
        #[arg(long)]
        max_altitude: Option<f64>,

        /// Sail-driven ship (cargo ships); such ships take no fuel
        #[arg(long)]
        sail: bool,
    },

    /// Remove a vehicle (ID must match exactly)
    Remove {
        id: String,
    },

    /// List every vehicle in fleet order
    List,

    /// Show full details of one vehicle
    Show {
        id: String,
    },

    /// Move every vehicle the same distance
    MoveAll {
        /// Distance in km
        #[arg(allow_negative_numbers = true)]
        distance: f64,
    },

    /// Refuel every fuel-consuming vehicle
    RefuelAll {
        /// Liters per vehicle
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Burn the fuel each vehicle needs for a distance and print the total
    FuelUsage {
        /// Distance in km
        #[arg(allow_negative_numbers = true)]
        distance: f64,
    },

    /// Service vehicles that are due (all of them, or one by ID)
    Maintain {
        id: Option<String>,
    },

    /// List vehicles that are due for maintenance
    NeedsMaintenance,

    /// Print the fleet report
    Report,

    /// Search vehicles by type or travel medium
    Search {
        /// Vehicle type (car, truck, bus, airplane, cargoship)
        #[arg(long = "type", short = 't', conflicts_with = "category")]
        kind: Option<String>,

        /// Travel medium (land, water, air)
        #[arg(long, short = 'c')]
        category: Option<CategoryKind>,
    },

    /// Sort the fleet by ascending fuel efficiency
    Sort,

    /// Estimate time and fuel for a trip, optionally sending one vehicle
    PlanRoute {
        /// Distance in km
        #[arg(allow_negative_numbers = true)]
        distance: f64,

        /// Start the journey with this vehicle
        #[arg(long)]
        go: Option<String>,
    },

    /// Manage cargo, passengers, fuel or service of one vehicle
    Manage {
        id: String,

        action: ActionArg,

        /// kg for cargo, a head count for passengers, liters for refuel
        #[arg(allow_negative_numbers = true)]
        amount: Option<f64>,
    },

    /// Write the fleet to a file
    Save {
        /// Destination. Defaults to the fleet file.
        path: Option<PathBuf>,
    },

    /// Replace the fleet with the contents of a file
    Load {
        path: PathBuf,
    },

    /// Add the demo fleet, or the vehicles of a TOML manifest
    Seed {
        /// Fleet manifest with [[vehicles]] tables
        #[arg(long, short = 'm')]
        manifest: Option<PathBuf>,

        /// Clear the fleet first
        #[arg(long)]
        replace: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set fleet file path
        #[arg(long)]
        set_fleet_file: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Enable/disable saving after every change
        #[arg(long)]
        set_autosave: Option<bool>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Single-vehicle actions for `manage`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ActionArg {
    LoadCargo,
    UnloadCargo,
    CargoStatus,
    Board,
    Disembark,
    PassengerStatus,
    Refuel,
    ScheduleMaintenance,
    PerformMaintenance,
}
