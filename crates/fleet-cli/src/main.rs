//! Fleet Manager - bookkeeping for a mixed fleet of vehicles
//!
//! A CLI tool that registers cars, trucks, buses, airplanes and cargo ships,
//! moves and services them, and keeps the fleet in a flat file between runs.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
