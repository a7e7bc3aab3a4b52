//! Shared result DTOs for reporting and export

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One measurement's match outcome, flattened for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    /// Source measurement file name
    pub source: String,
    /// Extracted VIN as recorded (wildcards included)
    pub vin: String,
    /// Whether a reference row matched
    pub matched: bool,
    /// Canonical VIN of the matched reference row
    pub matched_vin: Option<String>,
    /// Date of the matched reference row (ISO-8601)
    pub record_date: Option<String>,
    pub engine: Option<String>,
    pub transmission: Option<String>,
    pub registration_number: Option<String>,
    /// Derived from the measurement's own signal, regardless of match outcome
    pub engine_ever_running: bool,
    /// Measurement date normalized to ISO-8601
    pub measurement_date: String,
}

/// Aggregated results for one matching run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    pub started_at: DateTime<Utc>,
    pub total_measurements: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub entries: Vec<MatchEntry>,
}

impl BatchResults {
    /// Matched share in percent, None for an empty run
    pub fn match_rate_percent(&self) -> Option<f64> {
        if self.total_measurements == 0 {
            return None;
        }
        Some((self.matched as f64 / self.total_measurements as f64) * 100.0)
    }
}
