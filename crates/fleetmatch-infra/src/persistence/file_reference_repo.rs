//! File-based implementation of ReferenceRepository

use std::path::PathBuf;

use fleetmatch_domain::model::{ReferenceTable, VehicleRecord};
use fleetmatch_domain::repository::ReferenceRepository;
use fleetmatch_types::Error;

use crate::reference_csv::load_reference_table;

/// Reference repository backed by a roster CSV file
#[derive(Debug)]
pub struct FileReferenceRepository {
    csv_path: PathBuf,
    table: ReferenceTable,
}

impl FileReferenceRepository {
    /// Create a new repository from a roster CSV path
    pub fn new(csv_path: PathBuf) -> Result<Self, Error> {
        let table =
            load_reference_table(&csv_path).map_err(|e| Error::ReferenceLoad(e.to_string()))?;
        Ok(Self { csv_path, table })
    }

    /// Get the roster CSV path
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }

    /// The prepared (gap-filled, date-sorted) table
    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    /// Reload data from the roster CSV
    pub fn reload(&mut self) -> Result<(), Error> {
        self.table =
            load_reference_table(&self.csv_path).map_err(|e| Error::ReferenceLoad(e.to_string()))?;
        Ok(())
    }
}

impl ReferenceRepository for FileReferenceRepository {
    fn find_all(&self) -> Result<Vec<VehicleRecord>, Error> {
        Ok(self.table.records().to_vec())
    }

    fn find_by_vin(&self, vin: &str) -> Result<Option<VehicleRecord>, Error> {
        Ok(self
            .table
            .records()
            .iter()
            .find(|record| record.vin == vin)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn roster() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"VIN,date,engine,transmission,Reg No\n\
              1HGCM82633A004352,2020-01-01,V6,auto,M-AB 1234\n\
              WDB9634031L734581,2020-02-01,R6,manual,\n",
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_find_all() {
        let repo = FileReferenceRepository::new(roster().path().to_path_buf()).unwrap();
        assert_eq!(repo.find_all().unwrap().len(), 2);
    }

    #[test]
    fn test_find_by_vin() {
        let repo = FileReferenceRepository::new(roster().path().to_path_buf()).unwrap();
        let record = repo.find_by_vin("WDB9634031L734581").unwrap().unwrap();
        assert_eq!(record.engine.as_deref(), Some("R6"));
        assert!(repo.find_by_vin("JH4KA7561PC008269").unwrap().is_none());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = FileReferenceRepository::new(PathBuf::from("/no/such/roster.csv")).unwrap_err();
        assert!(matches!(err, Error::ReferenceLoad(_)));
    }
}
