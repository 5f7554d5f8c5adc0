//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the Submission service, plus the in-memory
//! adapters used by unit and integration tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use shared_types::Timestamp;

use crate::domain::entities::SubmissionRecord;
use crate::domain::errors::{IndexError, VaultError};

/// Abstract interface for the durable submission index.
///
/// Production: [`crate::adapters::JsonlIndexStore`].
/// Testing: [`InMemoryIndexStore`] (below).
pub trait IndexStore: Send {
    /// Load every persisted record.
    ///
    /// A malformed interior record is `Corrupted`; implementations must not
    /// return a partial view of a bad store.
    fn load(&self) -> Result<Vec<SubmissionRecord>, IndexError>;

    /// Durably append one record. Implementations must guarantee at most
    /// one append in flight across processes, and that a crash mid-append
    /// cannot corrupt prior records.
    fn append(&mut self, record: &SubmissionRecord) -> Result<(), IndexError>;
}

/// Abstract interface for managed vault storage.
pub trait FileVault: Send {
    /// Copy `source` into the vault under a name derived from
    /// `(student_id, filename)`. Must never overwrite an existing file.
    fn store(
        &self,
        student_id: &str,
        filename: &str,
        source: &Path,
    ) -> Result<PathBuf, VaultError>;

    /// Best-effort removal of a previously stored file, used to keep vault
    /// and index consistent when the append after a copy fails.
    fn discard(&self, student_id: &str, filename: &str) -> Result<(), VaultError>;
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current timestamp in seconds since epoch.
    fn now(&self) -> Timestamp;
}

/// Default time source using system time.
#[derive(Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Controllable time source for tests. Clones share one clock, so a test
/// can keep a handle and advance time while the service owns its copy.
#[derive(Clone)]
pub struct MockTimeSource {
    now: Arc<AtomicU64>,
}

impl MockTimeSource {
    /// Create a clock frozen at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Jump to an absolute timestamp.
    pub fn set(&self, now: Timestamp) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Move the clock forward.
    pub fn advance_secs(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}

/// In-memory index store for tests. Appends can be made to fail to exercise
/// the consistency path.
#[derive(Default)]
pub struct InMemoryIndexStore {
    records: Vec<SubmissionRecord>,
    fail_appends: AtomicBool,
}

impl InMemoryIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent append fail, simulating a full or locked disk.
    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    /// Records appended so far.
    pub fn records(&self) -> &[SubmissionRecord] {
        &self.records
    }
}

impl IndexStore for InMemoryIndexStore {
    fn load(&self) -> Result<Vec<SubmissionRecord>, IndexError> {
        Ok(self.records.clone())
    }

    fn append(&mut self, record: &SubmissionRecord) -> Result<(), IndexError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(IndexError::Io {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "append disabled by test"),
            });
        }
        self.records.push(record.clone());
        Ok(())
    }
}

/// In-memory vault for tests. Stores file bytes keyed by the deterministic
/// vault name; copies can be made to fail.
#[derive(Default)]
pub struct InMemoryVault {
    files: Mutex<HashMap<String, Vec<u8>>>,
    fail_stores: AtomicBool,
}

impl InMemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent store fail, simulating copy failure.
    pub fn set_fail_stores(&self, fail: bool) {
        self.fail_stores.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, student_id: &str, filename: &str) -> bool {
        self.files
            .lock()
            .contains_key(&vault_name(student_id, filename))
    }

    pub fn len(&self) -> usize {
        self.files.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.lock().is_empty()
    }
}

impl FileVault for InMemoryVault {
    fn store(
        &self,
        student_id: &str,
        filename: &str,
        source: &Path,
    ) -> Result<PathBuf, VaultError> {
        if self.fail_stores.load(Ordering::SeqCst) {
            return Err(VaultError::Io {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "store disabled by test"),
            });
        }
        let bytes = std::fs::read(source).map_err(|source_err| VaultError::Io {
            path: source.to_path_buf(),
            source: source_err,
        })?;

        let name = vault_name(student_id, filename);
        self.files.lock().insert(name.clone(), bytes);
        Ok(PathBuf::from(name))
    }

    fn discard(&self, student_id: &str, filename: &str) -> Result<(), VaultError> {
        self.files.lock().remove(&vault_name(student_id, filename));
        Ok(())
    }
}

/// Deterministic vault name for a `(student, filename)` pair.
pub fn vault_name(student_id: &str, filename: &str) -> String {
    format!("{}__{}", student_id, filename)
}
