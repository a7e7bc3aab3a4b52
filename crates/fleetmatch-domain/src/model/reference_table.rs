//! Prepared fleet reference table
//!
//! Roster rows are materialized once at load time: grouped per VIN, sorted
//! chronologically, gap-filled, then globally re-sorted by date. The table is
//! immutable afterwards and safe to share read-only across lookup workers.

use std::collections::BTreeMap;

use crate::model::VehicleRecord;

/// Ordered, gap-filled reference table
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    records: Vec<VehicleRecord>,
}

impl ReferenceTable {
    /// Prepare a table from raw roster rows.
    ///
    /// Within each VIN group, `engine`, `transmission` and the registration
    /// number carry the nearest preceding non-null value forward. A group's
    /// leading nulls stay null. The final table is sorted ascending by date.
    pub fn new(records: Vec<VehicleRecord>) -> Self {
        let mut filled = fill_gaps(records);
        filled.sort_by(|a, b| a.date.cmp(&b.date));
        Self { records: filled }
    }

    /// Rows in lookup order (ascending by date)
    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Forward-fill missing attributes within each VIN's chronological history
fn fill_gaps(records: Vec<VehicleRecord>) -> Vec<VehicleRecord> {
    let mut groups: BTreeMap<String, Vec<VehicleRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.vin.clone()).or_default().push(record);
    }

    let mut filled = Vec::new();
    for (_, mut group) in groups {
        group.sort_by(|a, b| a.date.cmp(&b.date));

        let mut last_engine = None;
        let mut last_transmission = None;
        let mut last_registration = None;
        for record in &mut group {
            carry_forward(&mut record.engine, &mut last_engine);
            carry_forward(&mut record.transmission, &mut last_transmission);
            carry_forward(&mut record.registration_number, &mut last_registration);
        }

        filled.extend(group);
    }
    filled
}

fn carry_forward(current: &mut Option<String>, last: &mut Option<String>) {
    match current {
        Some(value) => *last = Some(value.clone()),
        None => *current = last.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn record(
        vin: &str,
        date: (i32, u32, u32),
        engine: Option<&str>,
        transmission: Option<&str>,
    ) -> VehicleRecord {
        VehicleRecord {
            vin: vin.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            engine: engine.map(str::to_string),
            transmission: transmission.map(str::to_string),
            registration_number: None,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_gap_fill_carries_forward() {
        let table = ReferenceTable::new(vec![
            record("1HGCM82633A004352", (2020, 6, 1), Some("V6"), None),
            record("1HGCM82633A004352", (2020, 1, 1), None, Some("auto")),
        ]);

        let rows = table.records();
        assert_eq!(rows.len(), 2);
        // Leading null has no prior value and stays null
        assert_eq!(rows[0].engine, None);
        assert_eq!(rows[0].transmission.as_deref(), Some("auto"));
        // Second row keeps its own engine and inherits the transmission
        assert_eq!(rows[1].engine.as_deref(), Some("V6"));
        assert_eq!(rows[1].transmission.as_deref(), Some("auto"));
    }

    #[test]
    fn test_gap_fill_is_idempotent() {
        let table = ReferenceTable::new(vec![
            record("1HGCM82633A004352", (2020, 1, 1), None, Some("auto")),
            record("1HGCM82633A004352", (2020, 6, 1), Some("V6"), None),
            record("WDB9634031L734581", (2020, 3, 1), Some("R6"), None),
        ]);
        let again = ReferenceTable::new(table.records().to_vec());
        assert_eq!(table.records(), again.records());
    }

    #[test]
    fn test_gap_fill_stays_within_vin_group() {
        // Dates interleave globally; the fill must not cross vehicles
        let table = ReferenceTable::new(vec![
            record("1HGCM82633A004352", (2020, 1, 1), Some("V6"), None),
            record("WDB9634031L734581", (2020, 2, 1), None, None),
            record("1HGCM82633A004352", (2020, 3, 1), None, None),
        ]);

        let rows = table.records();
        assert_eq!(rows[1].vin, "WDB9634031L734581");
        assert_eq!(rows[1].engine, None);
        assert_eq!(rows[2].vin, "1HGCM82633A004352");
        assert_eq!(rows[2].engine.as_deref(), Some("V6"));
    }

    #[test]
    fn test_global_date_order() {
        let table = ReferenceTable::new(vec![
            record("WDB9634031L734581", (2021, 5, 1), Some("R6"), None),
            record("1HGCM82633A004352", (2020, 1, 1), Some("V6"), None),
            record("WDB9634031L734581", (2020, 7, 1), Some("R6"), None),
        ]);

        let dates: Vec<_> = table.records().iter().map(|r| r.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }
}
