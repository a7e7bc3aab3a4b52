//! Command handlers

use std::path::PathBuf;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};

use fleetmatch_app::app::{match_files, run_match, MatchOptions};
use fleetmatch_app::config::Config;
use fleetmatch_app::export::export_to_excel;
use fleetmatch_app::repository::open_reference_repo;
use fleetmatch_app::scanner::{scan_directory, validate_listing};
use fleetmatch_domain::model::VIN_LEN;
use fleetmatch_domain::repository::ReferenceRepository;
use fleetmatch_infra::measurement_csv::load_measurements;
use fleetmatch_types::{BatchResults, Error, OutputFormat, Result};

use crate::cli::{Cli, Commands};
use crate::output::output_result;

pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let format = cli.format.unwrap_or(config.output_format);
    let verbose = cli.verbose;

    match cli.command {
        Commands::Match {
            listing,
            reference,
            output,
            jobs,
        } => cmd_match(listing, reference, output, jobs, format, verbose, &config),
        Commands::Batch {
            folder,
            reference,
            output,
            jobs,
        } => cmd_batch(folder, reference, output, jobs, format, verbose, &config),
        Commands::Lookup { vin, reference } => cmd_lookup(vin, reference, format, &config),
        Commands::Export { results, output } => cmd_export(results, output),
        Commands::Config {
            show,
            set_reference,
            set_output,
            set_jobs,
        } => cmd_config(show, set_reference, set_output, set_jobs),
    }
}

/// Roster path from the command line, falling back to the configured default
fn resolve_reference(arg: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    arg.or_else(|| config.reference_path.clone()).ok_or_else(|| {
        Error::ReferenceLoad(
            "no roster given (pass --reference or set one with `config --set-reference`)"
                .to_string(),
        )
    })
}

fn match_options(jobs: Option<usize>, verbose: bool, config: &Config) -> MatchOptions {
    MatchOptions {
        jobs: jobs.unwrap_or(config.jobs),
        verbose,
        ..Default::default()
    }
}

fn write_results_json(results: &BatchResults, path: &PathBuf) -> Result<()> {
    let content = serde_json::to_string_pretty(results)?;
    std::fs::write(path, content)?;
    println!("Results written to {}", path.display());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_match(
    listing: PathBuf,
    reference: Option<PathBuf>,
    output: Option<PathBuf>,
    jobs: Option<usize>,
    format: OutputFormat,
    verbose: bool,
    config: &Config,
) -> Result<()> {
    validate_listing(&listing)?;
    let reference = resolve_reference(reference, config)?;

    let options = match_options(jobs, verbose, config);
    let results = match_files(&reference, &listing, &options)?;

    if let Some(ref path) = output {
        write_results_json(&results, path)?;
    }
    output_result(format, &results)
}

#[allow(clippy::too_many_arguments)]
fn cmd_batch(
    folder: PathBuf,
    reference: Option<PathBuf>,
    output: Option<PathBuf>,
    jobs: Option<usize>,
    format: OutputFormat,
    verbose: bool,
    config: &Config,
) -> Result<()> {
    let reference = resolve_reference(reference, config)?;
    let repo = open_reference_repo(reference)?;

    let files = scan_directory(&folder)?;
    if files.is_empty() {
        println!("No measurement listings found in {}", folder.display());
        return Ok(());
    }
    if verbose {
        eprintln!(
            "Processing {} listings against {} reference rows",
            files.len(),
            repo.table().len()
        );
    }

    let options = match_options(jobs, verbose, config);
    let started_at = Utc::now();
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(ProgressStyle::default_bar());
    for file in &files {
        progress.set_message(file.display().to_string());
        match load_measurements(file) {
            Ok(measurements) => {
                let results = run_match(repo.table(), measurements, &options);
                entries.extend(results.entries);
            }
            Err(e) => {
                // One bad listing never aborts the batch
                progress.suspend(|| eprintln!("Skipping {}: {}", file.display(), e));
                skipped += 1;
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    if skipped > 0 {
        eprintln!("Skipped {} unreadable listings", skipped);
    }

    let matched = entries.iter().filter(|entry| entry.matched).count();
    let results = BatchResults {
        started_at,
        total_measurements: entries.len(),
        matched,
        unmatched: entries.len() - matched,
        entries,
    };

    if let Some(ref path) = output {
        write_results_json(&results, path)?;
    }
    output_result(format, &results)
}

fn cmd_lookup(
    vin: String,
    reference: Option<PathBuf>,
    format: OutputFormat,
    config: &Config,
) -> Result<()> {
    let reference = resolve_reference(reference, config)?;
    let repo = open_reference_repo(reference)?;

    if vin.chars().count() != VIN_LEN {
        eprintln!("Warning: {} is not a {}-character VIN", vin, VIN_LEN);
    }

    match repo.find_by_vin(&vin)? {
        Some(record) => {
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("VIN:          {}", record.vin);
                println!("Date:         {}", record.date.format("%Y-%m-%d"));
                println!("Engine:       {}", record.engine.as_deref().unwrap_or("-"));
                println!(
                    "Transmission: {}",
                    record.transmission.as_deref().unwrap_or("-")
                );
                println!(
                    "Reg No:       {}",
                    record.registration_number.as_deref().unwrap_or("-")
                );
                for (key, value) in &record.extra {
                    println!("{}: {}", key, value);
                }
            }
        }
        None => println!("No roster entry for {}", vin),
    }
    Ok(())
}

fn cmd_export(results: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let content = std::fs::read_to_string(&results)?;
    let batch: BatchResults = serde_json::from_str(&content)?;

    let output = output.unwrap_or_else(|| results.with_extension("xlsx"));
    export_to_excel(&batch, &output)?;
    println!("Report written to {}", output.display());
    Ok(())
}

fn cmd_config(
    show: bool,
    set_reference: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_jobs: Option<usize>,
) -> Result<()> {
    let mut config = Config::load()?;
    let mut changed = false;

    if let Some(path) = set_reference {
        config.reference_path = Some(path);
        changed = true;
    }
    if let Some(output_format) = set_output {
        config.output_format = output_format;
        changed = true;
    }
    if let Some(jobs) = set_jobs {
        config.jobs = jobs;
        changed = true;
    }

    if changed {
        config.save()?;
        println!("Configuration saved");
    }
    if show || !changed {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }
    Ok(())
}
