//! Domain layer: fleet reference data, VIN matching, and enrichment

pub mod model;
pub mod repository;
pub mod service;
