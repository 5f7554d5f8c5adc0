//! # Audit Sink Port
//!
//! The one interface both pipelines write through. Append is the only
//! operation a sink exposes.

use parking_lot::Mutex;

use crate::entry::AuditEntry;
use crate::errors::AuditError;

/// Append-only destination for audit entries.
///
/// Production: [`crate::FileAuditLog`]. Testing: [`MemoryAuditLog`].
pub trait AuditSink: Send + Sync {
    /// Append one entry. Implementations must serialize concurrent appends
    /// so two entries can never interleave within a record.
    fn append(&self, entry: &AuditEntry) -> Result<(), AuditError>;
}

impl<T: AuditSink + ?Sized> AuditSink for std::sync::Arc<T> {
    fn append(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        (**self).append(entry)
    }
}

/// In-memory audit sink for unit and integration tests.
#[derive(Default)]
pub struct MemoryAuditLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far, in append order.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().clone()
    }

    /// Number of entries appended so far.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl AuditSink for MemoryAuditLog {
    fn append(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }
}
