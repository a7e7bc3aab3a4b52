//! CSV loader for the fleet reference table (roster export)
//!
//! Handles UTF-8 and Windows-1252 encoded exports. Column names are fixed by
//! the external roster schema and preserved verbatim, including "Reg No".

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use encoding_rs::WINDOWS_1252;
use thiserror::Error;

use fleetmatch_domain::model::{ReferenceTable, VehicleRecord};

#[derive(Error, Debug)]
pub enum ReferenceCsvError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid date format in row {row}: {value}")]
    InvalidDate { row: usize, value: String },

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

const COL_VIN: &str = "VIN";
const COL_DATE: &str = "date";
const COL_ENGINE: &str = "engine";
const COL_TRANSMISSION: &str = "transmission";
const COL_REG_NO: &str = "Reg No";

/// Load raw reference records from a roster CSV file
///
/// Expected CSV header (further columns pass through):
/// VIN,date,engine,transmission,Reg No
pub fn load_reference_records<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<VehicleRecord>, ReferenceCsvError> {
    // Read file as bytes
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let decoded = decode(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(decoded.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = resolve_columns(&headers)?;

    let mut records = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row_num = row_idx + 2; // +2 because row_idx is 0-based and header is row 1

        records.push(parse_record(&record, &columns, row_num)?);
    }

    Ok(records)
}

/// Load and prepare the reference table (gap-fill + date sort)
pub fn load_reference_table<P: AsRef<Path>>(
    path: P,
) -> Result<ReferenceTable, ReferenceCsvError> {
    Ok(ReferenceTable::new(load_reference_records(path)?))
}

/// Decode roster bytes: UTF-8, falling back to Windows-1252 (Excel exports)
fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (decoded, _, had_errors) = WINDOWS_1252.decode(bytes);
            if had_errors {
                eprintln!("Warning: Some characters could not be decoded from Windows-1252");
            }
            decoded.into_owned()
        }
    }
}

/// Resolved header positions for the fixed roster schema
struct Columns {
    vin: usize,
    date: usize,
    engine: usize,
    transmission: usize,
    registration: usize,
    /// Position and name of every pass-through column
    extra: Vec<(usize, String)>,
}

fn resolve_columns(headers: &csv::StringRecord) -> Result<Columns, ReferenceCsvError> {
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReferenceCsvError::MissingColumn(name.to_string()))
    };

    let vin = position(COL_VIN)?;
    let date = position(COL_DATE)?;
    let engine = position(COL_ENGINE)?;
    let transmission = position(COL_TRANSMISSION)?;
    let registration = position(COL_REG_NO)?;

    let known = [vin, date, engine, transmission, registration];
    let extra = headers
        .iter()
        .enumerate()
        .filter(|(i, name)| !known.contains(i) && !name.is_empty())
        .map(|(i, name)| (i, name.to_string()))
        .collect();

    Ok(Columns {
        vin,
        date,
        engine,
        transmission,
        registration,
        extra,
    })
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &Columns,
    row_num: usize,
) -> Result<VehicleRecord, ReferenceCsvError> {
    let vin = record.get(columns.vin).unwrap_or("").to_string();
    let date = parse_date(record.get(columns.date).unwrap_or(""), row_num)?;

    let optional = |index: usize| {
        record
            .get(index)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let engine = optional(columns.engine);
    let transmission = optional(columns.transmission);
    let registration_number = optional(columns.registration);

    let mut extra = std::collections::BTreeMap::new();
    for (index, name) in &columns.extra {
        if let Some(value) = record.get(*index).filter(|s| !s.is_empty()) {
            extra.insert(name.clone(), value.to_string());
        }
    }

    Ok(VehicleRecord {
        vin,
        date,
        engine,
        transmission,
        registration_number,
        extra,
    })
}

fn parse_date(s: &str, row: usize) -> Result<NaiveDate, ReferenceCsvError> {
    // Roster exports arrive in ISO, slash, or German dotted form
    let formats = ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(ReferenceCsvError::InvalidDate {
        row,
        value: s.to_string(),
    })
}
