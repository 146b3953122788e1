//! # Durable File Writes

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::errors::BundleError;

/// Create (or truncate) `path`, write `contents` and fsync.
pub fn write_synced(path: &Path, contents: &[u8]) -> Result<(), BundleError> {
    let mut file = File::create(path).map_err(|e| BundleError::not_writable(path, e))?;
    file.write_all(contents)
        .and_then(|_| file.sync_all())
        .map_err(|e| BundleError::not_writable(path, e))
}

/// Read a whole bundle file.
pub fn read_file(path: &Path) -> Result<Vec<u8>, BundleError> {
    fs::read(path).map_err(|e| BundleError::read_failed(path, e))
}

/// Read a whole bundle file as UTF-8.
pub fn read_text(path: &Path) -> Result<String, BundleError> {
    fs::read_to_string(path).map_err(|e| BundleError::read_failed(path, e))
}

/// Remove a directory tree if it exists.
pub fn remove_dir_if_exists(path: &Path) -> Result<(), BundleError> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(BundleError::not_writable(path, e)),
    }
}
