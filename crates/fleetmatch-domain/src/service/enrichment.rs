//! Applying match results onto measurement metadata

use crate::model::Measurement;
use crate::service::lookup::MatchResult;

/// Metadata key names the enrichment writes under.
///
/// Callers choose the names; the defaults mirror the roster attributes.
#[derive(Debug, Clone)]
pub struct EnrichmentKeys {
    pub matched_vin: String,
    pub engine: String,
    pub transmission: String,
    pub registration_number: String,
    pub engine_ever_running: String,
    pub measurement_date: String,
}

impl Default for EnrichmentKeys {
    fn default() -> Self {
        Self {
            matched_vin: "vin".to_string(),
            engine: "engine".to_string(),
            transmission: "transmission".to_string(),
            registration_number: "reg_no".to_string(),
            engine_ever_running: "engine_ever_running".to_string(),
            measurement_date: "date".to_string(),
        }
    }
}

/// Merge one match result into a measurement's metadata.
///
/// The derived fields (engine-ever-running flag, ISO date) come from the
/// measurement's own data and are written for matched and unmatched
/// measurements alike. Roster attributes are copied only on a match; `NoMatch`
/// skips them and never raises.
pub fn apply_match(measurement: &mut Measurement, result: &MatchResult, keys: &EnrichmentKeys) {
    let running = measurement.engine_ever_running();
    let date = measurement.recorded_date_iso();
    measurement
        .metadata
        .insert(keys.engine_ever_running.clone(), running.to_string());
    measurement.metadata.insert(keys.measurement_date.clone(), date);

    let record = match result {
        MatchResult::Matched(record) => record,
        MatchResult::NoMatch => return,
    };

    measurement
        .metadata
        .insert(keys.matched_vin.clone(), record.vin.clone());
    if let Some(ref engine) = record.engine {
        measurement.metadata.insert(keys.engine.clone(), engine.clone());
    }
    if let Some(ref transmission) = record.transmission {
        measurement
            .metadata
            .insert(keys.transmission.clone(), transmission.clone());
    }
    if let Some(ref registration) = record.registration_number {
        measurement
            .metadata
            .insert(keys.registration_number.clone(), registration.clone());
    }
    for (key, value) in &record.extra {
        measurement.metadata.insert(key.clone(), value.clone());
    }
}

/// Apply a batch of results pairwise onto a batch of measurements
pub fn enrich_batch(
    measurements: &mut [Measurement],
    results: &[MatchResult],
    keys: &EnrichmentKeys,
) {
    for (measurement, result) in measurements.iter_mut().zip(results) {
        apply_match(measurement, result, keys);
    }
}
