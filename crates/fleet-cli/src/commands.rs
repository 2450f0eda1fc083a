//! Command implementations

use std::path::{Path, PathBuf};

use fleet_app::config::Config;
use fleet_app::demo::demo_fleet;
use fleet_app::repository::{open_fleet_repo, open_fleet_repo_at};
use fleet_app::{FleetManager, VehicleAction};
use fleet_domain::{Category, CategoryKind, Vehicle, VehicleKind};
use fleet_infra::fleet_manifest::load_manifest_from_file;
use fleet_infra::persistence::CsvFleetRepository;
use fleet_types::{Error, OutputFormat, Result};

use crate::cli::{ActionArg, Cli, Commands};
use crate::output::{
    output_action, output_batch, output_fuel_usage, output_load_summary, output_report,
    output_route_plan, output_vehicle, output_vehicles, print_record_failures,
};

/// The fleet file for one invocation
struct Session {
    fleet: FleetManager,
    repo: CsvFleetRepository,
    autosave: bool,
    /// Records of the fleet file that failed to load
    skipped_records: usize,
}

impl Session {
    /// Load the fleet file if there is one; a missing file is an empty fleet
    fn open(config: &Config) -> Result<Self> {
        let repo = open_fleet_repo(config)?;
        let mut fleet = FleetManager::new();
        let mut skipped_records = 0;
        if repo.exists() {
            let summary = fleet.load_from(&repo)?;
            print_record_failures(&summary.failures);
            skipped_records = summary.failures.len();
        } else {
            log::info!("No fleet file at {}, starting empty", repo.path().display());
        }
        Ok(Self {
            fleet,
            repo,
            autosave: config.autosave,
            skipped_records,
        })
    }

    /// Persist changes when autosave is on
    ///
    /// A fleet file with unreadable records is left alone so they are not
    /// silently dropped; `save` rewrites it explicitly.
    fn commit(&self) -> Result<()> {
        if !self.autosave {
            log::info!("Autosave is off; changes were not written");
        } else if self.skipped_records > 0 {
            eprintln!(
                "Warning: {} has {} unreadable record(s); changes were not written. \
                 Fix the file, or run `save` to rewrite it without them.",
                self.repo.path().display(),
                self.skipped_records
            );
        } else {
            self.fleet.save_to(&self.repo)?;
        }
        Ok(())
    }
}

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if cli.fleet_file.is_some() {
        config.fleet_file = cli.fleet_file.clone();
    }
    let format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Add {
            kind,
            id,
            model,
            max_speed,
            wheels,
            max_altitude,
            sail,
        } => cmd_add(&config, *kind, id, model, *max_speed, *wheels, *max_altitude, *sail),
        Commands::Remove { id } => cmd_remove(&config, id),
        Commands::List => {
            let session = Session::open(&config)?;
            let all: Vec<&Vehicle> = session.fleet.vehicles().iter().collect();
            output_vehicles(format, &all)
        }
        Commands::Show { id } => {
            let session = Session::open(&config)?;
            let vehicle = session
                .fleet
                .get(id)
                .ok_or_else(|| Error::NotFound(id.clone()))?;
            output_vehicle(format, vehicle)
        }
        Commands::MoveAll { distance } => {
            let mut session = Session::open(&config)?;
            let outcome = session.fleet.start_all_journeys(*distance);
            session.commit()?;
            output_batch(format, "Journey", &outcome)
        }
        Commands::RefuelAll { amount } => {
            let mut session = Session::open(&config)?;
            let outcome = session.fleet.refuel_all(*amount);
            session.commit()?;
            output_batch(format, "Refuel", &outcome)
        }
        Commands::FuelUsage { distance } => {
            let mut session = Session::open(&config)?;
            let usage = session.fleet.total_fuel_consumption(*distance);
            session.commit()?;
            output_fuel_usage(format, *distance, &usage)
        }
        Commands::Maintain { id } => cmd_maintain(&config, id.as_deref()),
        Commands::NeedsMaintenance => {
            let session = Session::open(&config)?;
            output_vehicles(format, &session.fleet.vehicles_needing_maintenance())
        }
        Commands::Report => {
            let session = Session::open(&config)?;
            let report = session.fleet.build_report();
            output_report(format, &report, &session.fleet.generate_report())
        }
        Commands::Search { kind, category } => {
            cmd_search(&config, format, kind.as_deref(), *category)
        }
        Commands::Sort => {
            let mut session = Session::open(&config)?;
            session.fleet.sort_by_efficiency();
            session.commit()?;
            let all: Vec<&Vehicle> = session.fleet.vehicles().iter().collect();
            output_vehicles(format, &all)
        }
        Commands::PlanRoute { distance, go } => {
            cmd_plan_route(&config, format, *distance, go.as_deref())
        }
        Commands::Manage { id, action, amount } => {
            cmd_manage(&config, format, id, *action, *amount)
        }
        Commands::Save { path } => cmd_save(&config, path.clone()),
        Commands::Load { path } => cmd_load(&config, format, path),
        Commands::Seed { manifest, replace } => cmd_seed(&config, manifest.as_deref(), *replace),
        Commands::Config {
            show,
            set_fleet_file,
            set_output,
            set_autosave,
            reset,
        } => cmd_config(
            *show,
            set_fleet_file.clone(),
            *set_output,
            *set_autosave,
            *reset,
        ),
    }
}

/// Category for a new vehicle from the per-medium flags
fn category_for(
    kind: VehicleKind,
    wheels: Option<u32>,
    max_altitude: Option<f64>,
    sail: bool,
) -> Result<Category> {
    match kind.category() {
        CategoryKind::Land => {
            let default_wheels = if kind == VehicleKind::Car { 4 } else { 6 };
            Ok(Category::Land {
                wheels: wheels.unwrap_or(default_wheels),
            })
        }
        CategoryKind::Air => max_altitude
            .map(|max_altitude| Category::Air { max_altitude })
            .ok_or_else(|| Error::invalid("Airplanes need --max-altitude.")),
        CategoryKind::Water => Ok(Category::Water { has_sail: sail }),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_add(
    config: &Config,
    kind: VehicleKind,
    id: &str,
    model: &str,
    max_speed: f64,
    wheels: Option<u32>,
    max_altitude: Option<f64>,
    sail: bool,
) -> Result<()> {
    let category = category_for(kind, wheels, max_altitude, sail)?;
    let vehicle = Vehicle::new(kind, id, model, max_speed, category)?;

    let mut session = Session::open(config)?;
    session.fleet.add_vehicle(vehicle)?;
    session.commit()?;
    println!("Added {} {}", kind, id);
    Ok(())
}

fn cmd_remove(config: &Config, id: &str) -> Result<()> {
    let mut session = Session::open(config)?;
    let removed = session.fleet.remove_vehicle(id)?;
    session.commit()?;
    println!("Removed {} {}", removed.kind(), removed.id());
    Ok(())
}

fn cmd_maintain(config: &Config, id: Option<&str>) -> Result<()> {
    let mut session = Session::open(config)?;
    match id {
        Some(id) => {
            if session.fleet.maintain_by_id(id)? {
                println!("Maintenance performed on {}", id);
            } else {
                println!("{} does not need maintenance", id);
            }
        }
        None => {
            let serviced = session.fleet.maintain_all();
            println!("Maintenance performed on {} vehicle(s)", serviced);
        }
    }
    session.commit()
}

fn cmd_search(
    config: &Config,
    format: OutputFormat,
    kind: Option<&str>,
    category: Option<CategoryKind>,
) -> Result<()> {
    let session = Session::open(config)?;
    let found = match (kind, category) {
        (Some(name), _) => session.fleet.search_by_type_name(name)?,
        (None, Some(category)) => session.fleet.search_by_category(category),
        (None, None) => {
            return Err(Error::invalid("Give --type or --category to search."));
        }
    };
    output_vehicles(format, &found)
}

fn cmd_plan_route(
    config: &Config,
    format: OutputFormat,
    distance: f64,
    go: Option<&str>,
) -> Result<()> {
    let mut session = Session::open(config)?;
    let plan = session.fleet.plan_route(distance)?;
    output_route_plan(format, distance, &plan)?;

    if let Some(id) = go {
        let remaining = session.fleet.start_journey(id, distance)?;
        session.commit()?;
        match remaining {
            Some(level) => println!("{} travelled {} km. Remaining fuel: {:.2} liters", id, distance, level),
            None => println!("{} travelled {} km", id, distance),
        }
    }
    Ok(())
}

/// Build the action, checking that the amount is present and well-formed
fn to_action(action: ActionArg, amount: Option<f64>) -> Result<VehicleAction> {
    let need_amount = || amount.ok_or_else(|| Error::invalid("This action needs an amount."));
    let need_count = || -> Result<u32> {
        let value = need_amount()?;
        if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
            return Err(Error::invalid("Passenger count must be a whole, non-negative number."));
        }
        Ok(value as u32)
    };

    Ok(match action {
        ActionArg::LoadCargo => VehicleAction::LoadCargo(need_amount()?),
        ActionArg::UnloadCargo => VehicleAction::UnloadCargo(need_amount()?),
        ActionArg::CargoStatus => VehicleAction::CargoStatus,
        ActionArg::Board => VehicleAction::BoardPassengers(need_count()?),
        ActionArg::Disembark => VehicleAction::DisembarkPassengers(need_count()?),
        ActionArg::PassengerStatus => VehicleAction::PassengerStatus,
        ActionArg::Refuel => VehicleAction::Refuel(need_amount()?),
        ActionArg::ScheduleMaintenance => VehicleAction::ScheduleMaintenance,
        ActionArg::PerformMaintenance => VehicleAction::PerformMaintenance,
    })
}

fn cmd_manage(
    config: &Config,
    format: OutputFormat,
    id: &str,
    action: ActionArg,
    amount: Option<f64>,
) -> Result<()> {
    let action = to_action(action, amount)?;
    let mut session = Session::open(config)?;
    let outcome = session.fleet.apply_action(id, action)?;
    session.commit()?;
    output_action(format, id, &outcome)
}

fn cmd_save(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let session = Session::open(config)?;
    let repo = match path {
        Some(path) => open_fleet_repo_at(path),
        None => open_fleet_repo(config)?,
    };
    session.fleet.save_to(&repo)?;
    println!(
        "Saved {} vehicle(s) to {}",
        session.fleet.len(),
        repo.path().display()
    );
    Ok(())
}

fn cmd_load(config: &Config, format: OutputFormat, path: &Path) -> Result<()> {
    let mut session = Session::open(config)?;
    let summary = session.fleet.load_from_file(path)?;
    session.skipped_records = 0;
    session.commit()?;
    output_load_summary(format, &summary)
}

fn cmd_seed(config: &Config, manifest: Option<&Path>, replace: bool) -> Result<()> {
    let vehicles = match manifest {
        Some(path) => load_manifest_from_file(path)?,
        None => demo_fleet()?,
    };

    let mut session = Session::open(config)?;
    if replace {
        session.fleet = FleetManager::new();
        session.skipped_records = 0;
    }

    let mut added = 0;
    for vehicle in vehicles {
        let id = vehicle.id().to_string();
        match session.fleet.add_vehicle(vehicle) {
            Ok(()) => added += 1,
            Err(e) => eprintln!("Warning: skipped {}: {}", id, e),
        }
    }
    session.commit()?;
    println!("Seeded {} vehicle(s)", added);
    Ok(())
}

fn cmd_config(
    show: bool,
    set_fleet_file: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_autosave: Option<bool>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(path) = set_fleet_file {
        config.fleet_file = Some(path);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(autosave) = set_autosave {
        config.autosave = autosave;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
