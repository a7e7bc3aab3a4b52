//! Measurement listing discovery
//!
//! Walks a drop folder and collects measurement listing files. Results are
//! sorted so batch runs process listings in a stable order.

use fleetmatch_types::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions recognized as measurement listings
const SCAN_LISTING_EXTENSIONS: &[&str] = &["csv"];

/// Recursively collect measurement listing files under a folder
pub fn scan_directory(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_listing_extension(path))
        .collect();

    files.sort();
    Ok(files)
}

/// Check that a path exists and looks like a measurement listing
pub fn validate_listing(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    if !has_listing_extension(path) {
        return Err(Error::MeasurementLoad(format!(
            "unsupported listing extension: {}",
            path.display()
        )));
    }
    Ok(())
}

fn has_listing_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            SCAN_LISTING_EXTENSIONS.iter().any(|known| *known == ext)
        })
        .unwrap_or(false)
}
