//! # Bundle Directory Locking
//!
//! Prevents two runs from materializing into the same output directory at
//! once. The lock file is a sibling (`<out_dir>.lock`) so it survives the
//! directory being swapped out underneath it. It is never removed: unlinking
//! a locked file lets a waiter lock the orphaned inode while a newcomer
//! locks a fresh one.
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on Windows).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::errors::BundleError;

/// Exclusive lock on an output directory, released on drop (RAII).
/// The lock file itself stays in place.
pub struct BundleLock {
    /// The lock file handle (kept open to maintain lock)
    file: File,
    /// Path to the lock file
    path: PathBuf,
}

impl BundleLock {
    /// Acquire the lock for `out_dir` without blocking.
    ///
    /// # Errors
    ///
    /// `DirectoryNotWritable` if the lock file cannot be created or another
    /// process holds the lock.
    pub fn acquire(out_dir: &Path) -> Result<Self, BundleError> {
        let lock_path = sibling_path(out_dir, "lock")?;

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| BundleError::not_writable(&lock_path, e))?;

        if file.try_lock_exclusive().is_err() {
            let holder = std::fs::read_to_string(&lock_path)
                .ok()
                .and_then(|s| s.trim().parse::<u32>().ok());
            let reason = match holder {
                Some(pid) => format!("locked by process {pid}"),
                None => "locked by another process".to_string(),
            };
            return Err(BundleError::not_writable(out_dir, reason));
        }

        let mut file = file;
        file.set_len(0)
            .and_then(|_| writeln!(file, "{}", std::process::id()))
            .and_then(|_| file.sync_all())
            .map_err(|e| BundleError::not_writable(&lock_path, e))?;

        debug!(path = %lock_path.display(), "Acquired bundle lock");
        Ok(Self {
            file,
            path: lock_path,
        })
    }

    /// Get the path to the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for BundleLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            debug!(path = %self.path.display(), error = %e, "Failed to unlock bundle lock");
        }
    }
}

/// `<dir>.<suffix>` next to `dir`.
pub(crate) fn sibling_path(dir: &Path, suffix: &str) -> Result<PathBuf, BundleError> {
    let name = dir
        .file_name()
        .ok_or_else(|| BundleError::not_writable(dir, "output path has no directory name"))?;
    let mut sibling = name.to_os_string();
    sibling.push(".");
    sibling.push(suffix);
    Ok(dir.with_file_name(sibling))
}
