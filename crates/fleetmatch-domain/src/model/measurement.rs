//! Measurement session types

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Canonical VIN length
pub const VIN_LEN: usize = 17;

/// Marker for a VIN position the upstream extraction could not determine
pub const WILDCARD: char = '?';

/// A VIN extracted from a measurement file, with `?` at unknown positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementVin(String);

impl MeasurementVin {
    pub fn new(vin: impl Into<String>) -> Self {
        Self(vin.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of undetermined positions
    pub fn wildcard_count(&self) -> usize {
        self.0.chars().filter(|c| *c == WILDCARD).count()
    }

    /// True when extraction failed for every position
    pub fn is_fully_unknown(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c == WILDCARD)
    }
}

impl std::fmt::Display for MeasurementVin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One telemetry capture session to be enriched with fleet metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    /// Source measurement file name
    pub source: String,
    /// Extracted, possibly wildcarded VIN
    pub vin: MeasurementVin,
    /// Timestamp recorded in the measurement itself
    pub recorded_at: NaiveDateTime,
    /// Engine speed samples from the capture (running-state signal)
    #[serde(default)]
    pub engine_speed: Vec<f64>,
    /// Metadata store the enrichment step writes into
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Measurement {
    /// Whether the engine was ever running during the capture.
    ///
    /// Derived from the measurement's own signal, independent of any
    /// reference-table match.
    pub fn engine_ever_running(&self) -> bool {
        self.engine_speed.iter().any(|sample| *sample > 0.0)
    }

    /// The recorded date normalized to ISO-8601 (date part only)
    pub fn recorded_date_iso(&self) -> String {
        self.recorded_at.date().format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 3, 14)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_wildcard_count() {
        let vin = MeasurementVin::new("1HGCM8263?A00435?");
        assert_eq!(vin.wildcard_count(), 2);
        assert!(!vin.is_fully_unknown());
        assert!(MeasurementVin::new("?????????????????").is_fully_unknown());
    }

    #[test]
    fn test_engine_ever_running() {
        let mut m = Measurement {
            source: "m1.dat".to_string(),
            vin: MeasurementVin::new("1HGCM82633A004352"),
            recorded_at: at(9),
            engine_speed: vec![0.0, 0.0, 812.5],
            metadata: BTreeMap::new(),
        };
        assert!(m.engine_ever_running());
        m.engine_speed = vec![0.0, 0.0];
        assert!(!m.engine_ever_running());
        m.engine_speed.clear();
        assert!(!m.engine_ever_running());
    }

    #[test]
    fn test_recorded_date_iso() {
        let m = Measurement {
            source: "m1.dat".to_string(),
            vin: MeasurementVin::new("1HGCM82633A004352"),
            recorded_at: at(23),
            engine_speed: Vec::new(),
            metadata: BTreeMap::new(),
        };
        assert_eq!(m.recorded_date_iso(), "2021-03-14");
    }
}
