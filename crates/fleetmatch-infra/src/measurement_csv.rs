//! CSV loader for measurement listings
//!
//! A listing row describes one telemetry capture session: the source file,
//! the extracted (possibly wildcarded) VIN, the recorded timestamp, and
//! optionally the engine speed samples as a semicolon-separated series.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use thiserror::Error;

use fleetmatch_domain::model::{Measurement, MeasurementVin};

#[derive(Error, Debug)]
pub enum MeasurementCsvError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid timestamp in row {row}: {value}")]
    InvalidTimestamp { row: usize, value: String },

    #[error("Invalid number format in row {row}, column {column}: {value}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

const COL_FILE: &str = "file";
const COL_VIN: &str = "vin";
const COL_RECORDED_AT: &str = "recorded_at";
const COL_ENGINE_SPEED: &str = "engine_speed";

/// Load measurement sessions from a listing CSV file
///
/// Expected CSV header (engine_speed is optional):
/// file,vin,recorded_at[,engine_speed]
pub fn load_measurements<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<Measurement>, MeasurementCsvError> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    let content = String::from_utf8_lossy(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| MeasurementCsvError::MissingColumn(name.to_string()))
    };
    let file_col = position(COL_FILE)?;
    let vin_col = position(COL_VIN)?;
    let recorded_col = position(COL_RECORDED_AT)?;
    let speed_col = headers.iter().position(|h| h == COL_ENGINE_SPEED);

    let mut measurements = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row_num = row_idx + 2;

        let source = record.get(file_col).unwrap_or("").to_string();
        let vin = MeasurementVin::new(record.get(vin_col).unwrap_or(""));
        let recorded_at = parse_timestamp(record.get(recorded_col).unwrap_or(""), row_num)?;
        let engine_speed = match speed_col.and_then(|i| record.get(i)) {
            Some(series) => parse_samples(series, row_num)?,
            None => Vec::new(),
        };

        measurements.push(Measurement {
            source,
            vin,
            recorded_at,
            engine_speed,
            metadata: Default::default(),
        });
    }

    Ok(measurements)
}

fn parse_timestamp(s: &str, row: usize) -> Result<NaiveDateTime, MeasurementCsvError> {
    let formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];

    for fmt in formats {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(timestamp);
        }
    }

    Err(MeasurementCsvError::InvalidTimestamp {
        row,
        value: s.to_string(),
    })
}

/// Parse a semicolon-separated sample series, e.g. "0;0;812.5"
fn parse_samples(series: &str, row: usize) -> Result<Vec<f64>, MeasurementCsvError> {
    let mut samples = Vec::new();
    for part in series.split(';') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let value: f64 = part.parse().map_err(|_| MeasurementCsvError::InvalidNumber {
            row,
            column: COL_ENGINE_SPEED.to_string(),
            value: part.to_string(),
        })?;
        samples.push(value);
    }
    Ok(samples)
}
