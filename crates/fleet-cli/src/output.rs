//! Output formatting module

use fleet_app::{ActionOutcome, BatchOutcome, FuelUsage, LoadSummary};
use fleet_domain::repository::RecordFailure;
use fleet_domain::service::{FleetReport, RouteEstimate};
use fleet_domain::Vehicle;
use fleet_types::{OutputFormat, Result};
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

pub fn output_vehicles(output_format: OutputFormat, vehicles: &[&Vehicle]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(vehicles);
    }

    if vehicles.is_empty() {
        println!("No vehicles found.");
        return Ok(());
    }

    println!(
        "{:<10} {:<10} {:<16} {:>10} {:>12} {:>10} {:<5}",
        "ID", "Type", "Model", "Speed", "Mileage", "Fuel", "Due"
    );
    println!("{}", "-".repeat(79));
    for v in vehicles {
        let fuel = v
            .fuel()
            .map(|tank| format!("{:.1}", tank.fuel_level()))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10} {:<10} {:<16} {:>10.1} {:>12.1} {:>10} {:<5}",
            truncate(v.id(), 10),
            v.kind(),
            truncate(v.model(), 16),
            v.max_speed(),
            v.current_mileage(),
            fuel,
            if v.is_due_for_maintenance() { "yes" } else { "no" }
        );
    }
    println!("\n{} vehicle(s)", vehicles.len());
    Ok(())
}

pub fn output_vehicle(output_format: OutputFormat, vehicle: &Vehicle) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(vehicle);
    }
    println!("{}", vehicle.display_info());
    Ok(())
}

pub fn output_batch(output_format: OutputFormat, label: &str, outcome: &BatchOutcome) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(outcome);
    }

    println!("{}: {} succeeded", label, outcome.succeeded);
    if outcome.skipped > 0 {
        println!("  {} skipped (not applicable)", outcome.skipped);
    }
    for failure in &outcome.failures {
        println!("  [FAIL] {}: {}", failure.id, failure.reason);
    }
    Ok(())
}

pub fn output_fuel_usage(output_format: OutputFormat, distance: f64, usage: &FuelUsage) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(usage);
    }

    println!(
        "Total fuel consumption for {} km: {:.2} liters",
        distance, usage.total_liters
    );
    for failure in &usage.failures {
        println!("  [FAIL] {}: {}", failure.id, failure.reason);
    }
    Ok(())
}

pub fn output_report(output_format: OutputFormat, report: &FleetReport, text: &str) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(report);
    }
    print!("{}", text);
    Ok(())
}

pub fn output_route_plan(output_format: OutputFormat, distance: f64, plan: &[RouteEstimate]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(plan);
    }

    println!("\nRoute Plan: {} km", distance);
    println!("{}", "=".repeat(70));
    println!(
        "{:<10} {:<10} {:>12} {:>12} {:>12} {:<6}",
        "ID", "Type", "Hours", "Fuel need", "Fuel have", "OK"
    );
    println!("{}", "-".repeat(70));
    for estimate in plan {
        let have = estimate
            .current_fuel
            .map(|level| format!("{:.2}", level))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10} {:<10} {:>12.2} {:>12.2} {:>12} {:<6}",
            truncate(&estimate.id, 10),
            estimate.kind,
            estimate.journey_hours,
            estimate.fuel_needed,
            have,
            if estimate.can_complete { "yes" } else { "no" }
        );
    }
    Ok(())
}

pub fn output_action(output_format: OutputFormat, id: &str, outcome: &ActionOutcome) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(outcome);
    }
    println!("{}: {}", id, outcome);
    Ok(())
}

pub fn output_load_summary(output_format: OutputFormat, summary: &LoadSummary) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(summary);
    }
    println!("Loaded {} vehicle(s)", summary.loaded);
    print_record_failures(&summary.failures);
    Ok(())
}

/// Skipped records go to stderr so table output stays clean
pub fn print_record_failures(failures: &[RecordFailure]) {
    for failure in failures {
        eprintln!("Warning: skipped {}", failure);
    }
}
