//! Wildcard VIN comparison

use crate::model::{MeasurementVin, WILDCARD};

/// Position-by-position VIN comparison.
///
/// A `?` in the measurement VIN matches any reference character; every other
/// position must match exactly (case-sensitive, no normalization). Sequences
/// of different lengths never match.
pub fn vin_matches(measurement: &MeasurementVin, reference: &str) -> bool {
    let measured = measurement.as_str();
    if measured.chars().count() != reference.chars().count() {
        return false;
    }
    measured
        .chars()
        .zip(reference.chars())
        .all(|(m, r)| m == WILDCARD || m == r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_vin_matches_itself() {
        let vin = MeasurementVin::new("1HGCM82633A004352");
        assert!(vin_matches(&vin, "1HGCM82633A004352"));
    }

    #[test]
    fn test_single_wildcard() {
        let vin = MeasurementVin::new("1HGCM8263?A004352");
        assert!(vin_matches(&vin, "1HGCM82633A004352"));
        assert!(vin_matches(&vin, "1HGCM8263XA004352"));
    }

    #[test]
    fn test_mismatch() {
        let vin = MeasurementVin::new("1HGCM82633A004352");
        assert!(!vin_matches(&vin, "1HGCM82633A004353"));
    }

    #[test]
    fn test_case_sensitive() {
        let vin = MeasurementVin::new("1HGCM82633A004352");
        assert!(!vin_matches(&vin, "1hgcm82633a004352"));
    }

    #[test]
    fn test_length_mismatch_is_non_match() {
        let vin = MeasurementVin::new("1HGCM82633A004352");
        assert!(!vin_matches(&vin, "1HGCM82633A00435"));
        assert!(!vin_matches(&vin, "1HGCM82633A0043521"));
        assert!(!vin_matches(&vin, ""));
    }

    #[test]
    fn test_adding_wildcards_never_shrinks_matches() {
        let reference = "1HGCM82633A004352";
        let concrete = "1HGCM82633A004352";

        // Every single-position relaxation of a matching VIN still matches
        for i in 0..concrete.len() {
            let mut relaxed: Vec<char> = concrete.chars().collect();
            relaxed[i] = WILDCARD;
            let relaxed = MeasurementVin::new(relaxed.into_iter().collect::<String>());
            assert!(vin_matches(&relaxed, reference), "relaxed at {}", i);
        }
    }
}
