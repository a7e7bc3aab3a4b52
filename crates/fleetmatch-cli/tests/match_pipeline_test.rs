//! Integration tests for the matching pipeline
//!
//! Exercises the full path from CSV files on disk through loading, gap-fill,
//! matching, enrichment, and export.

use std::path::{Path, PathBuf};

use tempfile::tempdir;

use fleetmatch_app::app::{match_files, MatchOptions};
use fleetmatch_app::export::export_to_excel;
use fleetmatch_app::scanner::scan_directory;
use fleetmatch_types::BatchResults;

const ROSTER: &str = "\
VIN,date,engine,transmission,Reg No
1HGCM82633A004352,2020-01-01,,auto,M-AB 1234
1HGCM82633A004352,2020-06-01,V6,,
WDB9634031L734581,2020-02-01,R6,manual,S-XY 77
";

const LISTING: &str = "\
file,vin,recorded_at,engine_speed
run_001.dat,WDB9634031L734581,2021-03-14 09:30:00,0;812.5
run_002.dat,JH4KA7561PC008269,2021-03-14 10:00:00,0;0
run_003.dat,1HGCM8263?A004352,2021-03-15 08:15:00,
";

fn write_fixtures(dir: &Path) -> (PathBuf, PathBuf) {
    let roster = dir.join("roster.csv");
    let listing = dir.join("listings/march.csv");
    std::fs::create_dir_all(listing.parent().unwrap()).unwrap();
    std::fs::write(&roster, ROSTER).unwrap();
    std::fs::write(&listing, LISTING).unwrap();
    (roster, listing)
}

#[test]
fn test_match_files_end_to_end() {
    let dir = tempdir().unwrap();
    let (roster, listing) = write_fixtures(dir.path());

    let results = match_files(&roster, &listing, &MatchOptions::default()).unwrap();

    assert_eq!(results.total_measurements, 3);
    assert_eq!(results.matched, 2);
    assert_eq!(results.unmatched, 1);

    // Results stay in listing order, not grouped by match outcome
    let sources: Vec<_> = results.entries.iter().map(|e| e.source.as_str()).collect();
    assert_eq!(sources, vec!["run_001.dat", "run_002.dat", "run_003.dat"]);

    let first = &results.entries[0];
    assert!(first.matched);
    assert_eq!(first.matched_vin.as_deref(), Some("WDB9634031L734581"));
    assert_eq!(first.engine.as_deref(), Some("R6"));
    assert_eq!(first.registration_number.as_deref(), Some("S-XY 77"));
    assert!(first.engine_ever_running);
    assert_eq!(first.measurement_date, "2021-03-14");

    // Unmatched measurement still carries its derived fields
    let second = &results.entries[1];
    assert!(!second.matched);
    assert!(second.engine.is_none());
    assert!(!second.engine_ever_running);
    assert_eq!(second.measurement_date, "2021-03-14");

    // Wildcarded VIN resolves to the earliest-dated roster row of the vehicle
    let third = &results.entries[2];
    assert!(third.matched);
    assert_eq!(third.record_date.as_deref(), Some("2020-01-01"));
    assert_eq!(third.transmission.as_deref(), Some("auto"));
    // Earliest row's engine was null with nothing to carry forward
    assert!(third.engine.is_none());
    assert!(!third.engine_ever_running);
}

#[test]
fn test_parallel_run_matches_sequential() {
    let dir = tempdir().unwrap();
    let (roster, listing) = write_fixtures(dir.path());

    let sequential = match_files(&roster, &listing, &MatchOptions::default()).unwrap();
    let parallel = match_files(
        &roster,
        &listing,
        &MatchOptions {
            jobs: 0, // auto
            ..Default::default()
        },
    )
    .unwrap();

    let outcomes = |r: &BatchResults| {
        r.entries
            .iter()
            .map(|e| (e.source.clone(), e.matched))
            .collect::<Vec<_>>()
    };
    assert_eq!(outcomes(&sequential), outcomes(&parallel));
}

#[test]
fn test_results_survive_json_round_trip() {
    let dir = tempdir().unwrap();
    let (roster, listing) = write_fixtures(dir.path());

    let results = match_files(&roster, &listing, &MatchOptions::default()).unwrap();
    let json = serde_json::to_string_pretty(&results).unwrap();
    let parsed: BatchResults = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.total_measurements, results.total_measurements);
    assert_eq!(parsed.entries.len(), results.entries.len());
    assert_eq!(parsed.entries[0].matched_vin, results.entries[0].matched_vin);
}

#[test]
fn test_scan_and_export() {
    let dir = tempdir().unwrap();
    let (roster, listing) = write_fixtures(dir.path());

    let found = scan_directory(&dir.path().join("listings")).unwrap();
    assert_eq!(found, vec![listing.clone()]);

    let results = match_files(&roster, &listing, &MatchOptions::default()).unwrap();
    let report = dir.path().join("report.xlsx");
    export_to_excel(&results, &report).unwrap();

    let metadata = std::fs::metadata(&report).unwrap();
    assert!(metadata.len() > 0);
}

#[test]
fn test_missing_roster_column_is_fatal() {
    let dir = tempdir().unwrap();
    let roster = dir.path().join("roster.csv");
    let listing = dir.path().join("march.csv");
    std::fs::write(&roster, "VIN,date,engine,transmission\nX,2020-01-01,,\n").unwrap();
    std::fs::write(&listing, LISTING).unwrap();

    let err = match_files(&roster, &listing, &MatchOptions::default()).unwrap_err();
    assert!(err.to_string().contains("Reg No"));
}
