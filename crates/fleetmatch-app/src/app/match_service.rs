//! Match Service - Core Use Case for Measurement Enrichment
//!
//! This service orchestrates the complete matching workflow:
//! 1. Load and prepare the fleet reference table
//! 2. Load the measurement listing
//! 3. Match every measurement VIN against the table, in input order
//! 4. Merge matched attributes and derived fields into measurement metadata
//! 5. Summarize into a reportable result set

use std::path::Path;

use chrono::Utc;

use fleetmatch_domain::model::{Measurement, ReferenceTable};
use fleetmatch_domain::service::{enrich_batch, find_match, EnrichmentKeys, MatchResult};
use fleetmatch_infra::measurement_csv::load_measurements;
use fleetmatch_infra::reference_csv::load_reference_table;
use fleetmatch_types::{BatchResults, Error, MatchEntry, Result};

/// Options for a matching run
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Number of parallel lookup workers. 0 = auto (CPU count), 1 = sequential.
    pub jobs: usize,

    /// Metadata key names the enrichment writes under
    pub keys: EnrichmentKeys,

    /// Verbose output (progress messages to stderr)
    pub verbose: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            keys: EnrichmentKeys::default(),
            verbose: false,
        }
    }
}

/// Match a prepared listing against a prepared table.
///
/// Infallible by design: a measurement without a roster counterpart yields an
/// unmatched entry, never an error. Results come back in listing order.
pub fn run_match(
    table: &ReferenceTable,
    mut measurements: Vec<Measurement>,
    options: &MatchOptions,
) -> BatchResults {
    let started_at = Utc::now();

    let results = match_all(table, &measurements, options.jobs);
    enrich_batch(&mut measurements, &results, &options.keys);

    let entries: Vec<MatchEntry> = measurements
        .iter()
        .zip(&results)
        .map(|(measurement, result)| to_entry(measurement, result))
        .collect();

    let matched = entries.iter().filter(|entry| entry.matched).count();
    BatchResults {
        started_at,
        total_measurements: entries.len(),
        matched,
        unmatched: entries.len() - matched,
        entries,
    }
}

/// Load both inputs from disk and run one matching pass
pub fn match_files(
    reference_path: &Path,
    listing_path: &Path,
    options: &MatchOptions,
) -> Result<BatchResults> {
    let table = load_reference_table(reference_path)
        .map_err(|e| Error::ReferenceLoad(e.to_string()))?;
    let measurements =
        load_measurements(listing_path).map_err(|e| Error::MeasurementLoad(e.to_string()))?;

    if options.verbose {
        eprintln!(
            "Matching {} measurements against {} reference rows",
            measurements.len(),
            table.len()
        );
    }

    Ok(run_match(&table, measurements, options))
}

/// Per-measurement lookups, optionally fanned out over worker threads.
///
/// Lookups are independent and the table is read-only, so measurements are
/// split into contiguous chunks and each worker fills its own output slots.
/// Output order equals input order by construction.
fn match_all(
    table: &ReferenceTable,
    measurements: &[Measurement],
    jobs: usize,
) -> Vec<MatchResult> {
    let jobs = if jobs == 0 { num_cpus::get() } else { jobs };

    let mut results = vec![MatchResult::NoMatch; measurements.len()];
    if jobs <= 1 || measurements.len() <= 1 {
        for (measurement, slot) in measurements.iter().zip(results.iter_mut()) {
            *slot = find_match(&measurement.vin, table);
        }
        return results;
    }

    let chunk_size = measurements.len().div_ceil(jobs);
    std::thread::scope(|scope| {
        for (input_chunk, output_chunk) in measurements
            .chunks(chunk_size)
            .zip(results.chunks_mut(chunk_size))
        {
            scope.spawn(move || {
                for (measurement, slot) in input_chunk.iter().zip(output_chunk.iter_mut()) {
                    *slot = find_match(&measurement.vin, table);
                }
            });
        }
    });
    results
}

fn to_entry(measurement: &Measurement, result: &MatchResult) -> MatchEntry {
    let record = result.record();
    MatchEntry {
        source: measurement.source.clone(),
        vin: measurement.vin.to_string(),
        matched: record.is_some(),
        matched_vin: record.map(|r| r.vin.clone()),
        record_date: record.map(|r| r.date.format("%Y-%m-%d").to_string()),
        engine: record.and_then(|r| r.engine.clone()),
        transmission: record.and_then(|r| r.transmission.clone()),
        registration_number: record.and_then(|r| r.registration_number.clone()),
        engine_ever_running: measurement.engine_ever_running(),
        measurement_date: measurement.recorded_date_iso(),
    }
}
