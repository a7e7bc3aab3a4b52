//! Repository adapters for persistence layer

use std::path::PathBuf;

use fleetmatch_infra::persistence::FileReferenceRepository;
use fleetmatch_types::Result;

/// Open the file-based reference repository from a roster CSV
pub fn open_reference_repo(csv_path: PathBuf) -> Result<FileReferenceRepository> {
    FileReferenceRepository::new(csv_path)
}
