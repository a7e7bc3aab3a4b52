//! Domain services

pub mod enrichment;
pub mod lookup;
pub mod vin_match;

pub use enrichment::{apply_match, enrich_batch, EnrichmentKeys};
pub use lookup::{find_match, match_batch, MatchResult};
pub use vin_match::vin_matches;
