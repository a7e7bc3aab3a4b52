//! Per-measurement reference lookup

use serde::{Deserialize, Serialize};

use crate::model::{MeasurementVin, ReferenceTable, VehicleRecord};
use crate::service::vin_match::vin_matches;

/// Outcome of matching one measurement VIN against the reference table.
///
/// `NoMatch` is an expected, common result (extraction may have failed for
/// every position, or the vehicle is simply not in the roster) and is never
/// surfaced as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchResult {
    Matched(VehicleRecord),
    NoMatch,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }

    pub fn record(&self) -> Option<&VehicleRecord> {
        match self {
            MatchResult::Matched(record) => Some(record),
            MatchResult::NoMatch => None,
        }
    }
}

/// Scan the table in order and return the FIRST row the VIN matches.
///
/// When wildcards admit several rows of the same vehicle, the earliest-dated
/// row wins. Callers needing closest-in-time semantics must post-filter.
pub fn find_match(vin: &MeasurementVin, table: &ReferenceTable) -> MatchResult {
    for record in table.records() {
        if vin_matches(vin, &record.vin) {
            return MatchResult::Matched(record.clone());
        }
    }
    MatchResult::NoMatch
}

/// Match a batch of measurement VINs, one result per input, in input order
pub fn match_batch(vins: &[MeasurementVin], table: &ReferenceTable) -> Vec<MatchResult> {
    vins.iter().map(|vin| find_match(vin, table)).collect()
}
