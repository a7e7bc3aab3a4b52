//! Application use cases

pub mod match_service;

pub use match_service::{match_files, run_match, MatchOptions};
