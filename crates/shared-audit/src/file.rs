//! # File-Backed Audit Stream
//!
//! One human-inspectable text file per logical stream. Each append takes the
//! stream's advisory lock, writes exactly one line, flushes, and fsyncs, so
//! a crash can tear at most the final line and concurrent writers can never
//! interleave inside a record.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use shared_types::flock::{FileGuard, DEFAULT_LOCK_TIMEOUT};

use crate::entry::AuditEntry;
use crate::errors::AuditError;
use crate::sink::AuditSink;

/// Append-only audit stream backed by a text file.
pub struct FileAuditLog {
    path: PathBuf,
    lock_timeout: Duration,
}

impl FileAuditLog {
    /// Create a stream writer for `path`. The file is created lazily on the
    /// first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Override the bounded lock wait.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Path of the underlying stream file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileAuditLog {
    fn append(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        let _guard = FileGuard::acquire(&self.path, self.lock_timeout)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| AuditError::Io {
                path: self.path.clone(),
                source,
            })?;

        let mut line = entry.render_line();
        line.push('\n');
        file.write_all(line.as_bytes())
            .and_then(|()| file.flush())
            .and_then(|()| file.sync_all())
            .map_err(|source| AuditError::Io {
                path: self.path.clone(),
                source,
            })
    }
}
