//! Repository trait definitions for reference data access

use crate::model::VehicleRecord;
use fleetmatch_types::Error;

/// Repository for fleet reference records (roster)
pub trait ReferenceRepository {
    /// Load all reference records, prepared order
    fn find_all(&self) -> Result<Vec<VehicleRecord>, Error>;

    /// Find the first record with this exact canonical VIN
    fn find_by_vin(&self, vin: &str) -> Result<Option<VehicleRecord>, Error>;
}
