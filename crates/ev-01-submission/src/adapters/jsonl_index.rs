//! # JSONL Index Store
//!
//! Durable submission index: one JSON object per line, append-only,
//! human-inspectable. Appends are serialized across processes by the
//! sidecar advisory lock; a crash can tear at most the final line, and the
//! next append truncates that torn tail before writing.

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use shared_types::flock::{FileGuard, DEFAULT_LOCK_TIMEOUT};

use crate::domain::entities::SubmissionRecord;
use crate::domain::errors::IndexError;
use crate::ports::outbound::IndexStore;

/// File-backed submission index using JSON Lines.
pub struct JsonlIndexStore {
    path: PathBuf,
    lock_timeout: Duration,
}

impl JsonlIndexStore {
    /// Create a store over `path`. The file is created on the first append.
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

    /// Path of the underlying index file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> IndexError {
        IndexError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Split file content into its complete (newline-terminated) prefix and
    /// a possibly torn tail left by a crashed append.
    fn split_complete(content: &str) -> (&str, &str) {
        match content.rfind('\n') {
            Some(last) => content.split_at(last + 1),
            None => ("", content),
        }
    }
}

impl IndexStore for JsonlIndexStore {
    fn load(&self) -> Result<Vec<SubmissionRecord>, IndexError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let (complete, torn) = Self::split_complete(&content);
        if !torn.is_empty() {
            tracing::warn!(
                "discarding torn trailing record in {} ({} bytes); a previous append crashed mid-write",
                self.path.display(),
                torn.len()
            );
        }

        let mut records = Vec::new();
        for (number, line) in complete.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: SubmissionRecord =
                serde_json::from_str(line).map_err(|e| IndexError::Corrupted {
                    record: number + 1,
                    reason: e.to_string(),
                })?;
            records.push(record);
        }
        Ok(records)
    }

    fn append(&mut self, record: &SubmissionRecord) -> Result<(), IndexError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = FileGuard::acquire(&self.path, self.lock_timeout)?;

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        // Repair a torn tail from a crashed append before extending the file.
        let len = file.metadata().map_err(|e| self.io_error(e))?.len();
        if len > 0 {
            file.seek(SeekFrom::End(-1)).map_err(|e| self.io_error(e))?;
            let mut last = [0u8; 1];
            file.read_exact(&mut last).map_err(|e| self.io_error(e))?;
            if last[0] != b'\n' {
                let mut content = String::new();
                file.seek(SeekFrom::Start(0)).map_err(|e| self.io_error(e))?;
                file.read_to_string(&mut content)
                    .map_err(|e| self.io_error(e))?;
                let (complete, torn) = Self::split_complete(&content);
                tracing::warn!(
                    "truncating torn trailing record in {} ({} bytes)",
                    self.path.display(),
                    torn.len()
                );
                file.set_len(complete.len() as u64)
                    .map_err(|e| self.io_error(e))?;
            }
        }

        file.seek(SeekFrom::End(0)).map_err(|e| self.io_error(e))?;
        file.write_all(line.as_bytes())
            .and_then(|()| file.flush())
            .and_then(|()| file.sync_all())
            .map_err(|e| self.io_error(e))
    }
}
