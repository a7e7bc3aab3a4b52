//! fleetmatch - Measurement enrichment from fleet roster data
//!
//! A CLI tool that matches extracted measurement VINs against a fleet
//! reference table and merges vehicle attributes into the results.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
