//! CLI definition using clap

use clap::{Parser, Subcommand};
use fleetmatch_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fleetmatch")]
#[command(author = "fleetops")]
#[command(version)]
#[command(about = "Match measurement VINs against a fleet roster and enrich results")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match one measurement listing
    Match {
        /// Path to measurement listing CSV (file,vin,recorded_at[,engine_speed])
        listing: PathBuf,

        /// Fleet roster CSV. Uses config value if not specified.
        #[arg(long, short = 'r')]
        reference: Option<PathBuf>,

        /// Write results as JSON to this file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Number of parallel lookup workers. 0 = auto (CPU count). Uses config value if not specified.
        #[arg(long, short = 'j')]
        jobs: Option<usize>,
    },

    /// Batch process every measurement listing in a folder
    Batch {
        /// Path to folder containing measurement listings
        folder: PathBuf,

        /// Fleet roster CSV. Uses config value if not specified.
        #[arg(long, short = 'r')]
        reference: Option<PathBuf>,

        /// Write combined results as JSON to this file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Number of parallel lookup workers. 0 = auto (CPU count). Uses config value if not specified.
        #[arg(long, short = 'j')]
        jobs: Option<usize>,
    },

    /// Look up one canonical VIN in the roster
    Lookup {
        /// Canonical 17-character VIN
        vin: String,

        /// Fleet roster CSV. Uses config value if not specified.
        #[arg(long, short = 'r')]
        reference: Option<PathBuf>,
    },

    /// Export results to Excel
    Export {
        /// Path to JSON results file
        results: PathBuf,

        /// Output Excel file path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default roster CSV path
        #[arg(long)]
        set_reference: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default number of lookup workers (0 = auto)
        #[arg(long)]
        set_jobs: Option<usize>,
    },
}
