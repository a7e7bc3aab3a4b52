//! Fleet reference record type definitions

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the fleet reference table (roster spreadsheet)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Canonical 17-character VIN
    pub vin: String,
    /// Calendar date of the roster entry, used for chronological ordering
    pub date: NaiveDate,
    /// Engine type, may be missing in the raw roster
    pub engine: Option<String>,
    /// Transmission type, may be missing in the raw roster
    pub transmission: Option<String>,
    /// Registration number ("Reg No" column), may be missing in the raw roster
    pub registration_number: Option<String>,
    /// Any further roster columns, passed through opaquely
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}
