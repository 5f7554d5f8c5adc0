//! # Advisory File Lock
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on
//! Windows). Every durable ExamVault store (submission index, account store,
//! audit streams) serializes its writers through a sidecar lock file guarded
//! by this type.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fs2::FileExt;
use thiserror::Error;

/// Default bounded wait before a lock acquisition gives up.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from store locking.
#[derive(Debug, Error)]
pub enum LockError {
    /// Lock file could not be created or opened.
    #[error("failed to create lock file {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Another writer held the lock for the entire bounded wait.
    #[error("store busy: could not lock {path} within {waited_ms}ms")]
    Timeout { path: PathBuf, waited_ms: u64 },
}

/// Exclusive advisory lock on a store's sidecar lock file.
///
/// Held for the duration of one append or one read-modify-write cycle and
/// released on drop (RAII). Acquisition retries with exponential backoff up
/// to a hard deadline; it never blocks indefinitely.
///
/// # Example
///
/// ```ignore
/// let _guard = FileGuard::acquire(&index_path, DEFAULT_LOCK_TIMEOUT)?;
/// // append one record, then drop the guard
/// ```
pub struct FileGuard {
    /// The lock file handle (kept open to maintain the lock).
    file: File,
    /// Path to the sidecar lock file.
    path: PathBuf,
}

impl FileGuard {
    /// Acquire an exclusive lock guarding `store_path`.
    ///
    /// The lock is taken on a `<store_path>.lock` sidecar so the store file
    /// itself can be renamed atomically while locked.
    ///
    /// # Errors
    ///
    /// Returns `LockError::Timeout` if another process holds the lock past
    /// the bounded wait.
    pub fn acquire(store_path: &Path, timeout: Duration) -> Result<Self, LockError> {
        let lock_path = Self::lock_path(store_path);
        let started = Instant::now();
        let deadline = started + timeout;
        let mut retry_delay = Duration::from_millis(10);

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&lock_path)
            .map_err(|source| LockError::CreateFailed {
                path: lock_path.clone(),
                source,
            })?;

        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    return Ok(Self {
                        file,
                        path: lock_path,
                    });
                }
                Err(_) if Instant::now() >= deadline => {
                    return Err(LockError::Timeout {
                        path: lock_path,
                        waited_ms: started.elapsed().as_millis() as u64,
                    });
                }
                Err(_) => {
                    // Retry with exponential backoff (capped at 250ms)
                    std::thread::sleep(retry_delay);
                    retry_delay = (retry_delay * 2).min(Duration::from_millis(250));
                }
            }
        }
    }

    /// Sidecar lock path for a store file.
    pub fn lock_path(store_path: &Path) -> PathBuf {
        let mut name = store_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "store".into());
        name.push(".lock");
        store_path.with_file_name(name)
    }

    /// Path to the sidecar lock file this guard holds.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileGuard {
    fn drop(&mut self) {
        if let Err(e) = fs2::FileExt::unlock(&self.file) {
            tracing::warn!("failed to release lock {}: {}", self.path.display(), e);
        }
        // The sidecar stays on disk; only the flock is released.
    }
}
