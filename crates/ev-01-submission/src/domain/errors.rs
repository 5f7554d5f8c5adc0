//! # Domain Errors
//!
//! Error types for the Submission subsystem. Each variant maps to one
//! failure mode of the pipeline; `ErrorCategory` is the coarse
//! classification the menu layer uses to decide re-prompt versus abort.

use shared_types::LockError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a submission failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input (extension, size, path). User can fix and retry.
    Validation,
    /// Filename or content duplicates an accepted record. Nothing mutated.
    Duplicate,
    /// Copy/append/lock failure. Surfaced, logged, store left consistent.
    Storage,
    /// Index unreadable or malformed. Fatal for the operation.
    Corruption,
}

/// Errors from the submission pipeline.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Student identifier is empty or would escape the vault directory.
    #[error("invalid student id: {student_id:?}")]
    InvalidStudentId { student_id: String },

    /// Filename missing or not expressible as a plain file name.
    #[error("invalid filename: {filename:?}")]
    InvalidFilename { filename: String },

    /// Extension missing or not on the allow-list.
    #[error("file type not allowed: {filename}")]
    InvalidExtension { filename: String },

    /// Source exceeds the configured size limit.
    #[error("file too large: {size} bytes, limit {max_size} bytes")]
    FileTooLarge { size: u64, max_size: u64 },

    /// Source path does not resolve to a readable regular file.
    #[error("file not found or not a regular file: {path}")]
    FileNotFound { path: PathBuf },

    /// This student already submitted under this filename.
    #[error("duplicate submission: {student_id} already submitted {filename}")]
    DuplicateFilename {
        student_id: String,
        filename: String,
    },

    /// Identical content already accepted, for any student.
    #[error("duplicate content: identical bytes already submitted (sha256 {digest_prefix})")]
    DuplicateContent { digest_prefix: String },

    /// Source became unreadable while hashing.
    #[error("could not read {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Copy into the vault failed; no index record was written.
    #[error("could not store file in vault: {reason}")]
    CopyFailed { reason: String },

    /// Durable index failure (I/O, lock, or corruption).
    #[error(transparent)]
    Index(#[from] IndexError),
}

impl SubmitError {
    /// Classify for the presentation layer.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SubmitError::InvalidStudentId { .. }
            | SubmitError::InvalidFilename { .. }
            | SubmitError::InvalidExtension { .. }
            | SubmitError::FileTooLarge { .. }
            | SubmitError::FileNotFound { .. } => ErrorCategory::Validation,
            SubmitError::DuplicateFilename { .. } | SubmitError::DuplicateContent { .. } => {
                ErrorCategory::Duplicate
            }
            SubmitError::SourceRead { .. } | SubmitError::CopyFailed { .. } => {
                ErrorCategory::Storage
            }
            SubmitError::Index(index_error) => index_error.category(),
        }
    }
}

/// Errors from the durable submission index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index file could not be read or written.
    #[error("submission index {path} unusable: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Another writer held the index lock past the bounded wait.
    #[error(transparent)]
    Lock(#[from] LockError),

    /// A record failed to encode (never expected for well-formed records).
    #[error("could not encode index record: {0}")]
    Encode(#[from] serde_json::Error),

    /// An interior record is malformed. The index must not be used with a
    /// partial view.
    #[error("submission index corrupted at record {record}: {reason}")]
    Corrupted { record: usize, reason: String },
}

impl IndexError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IndexError::Corrupted { .. } => ErrorCategory::Corruption,
            _ => ErrorCategory::Storage,
        }
    }
}

/// Errors from managed vault storage.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The vault directory or destination file could not be written.
    #[error("vault write failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = SubmitError::InvalidExtension {
            filename: "virus.exe".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);

        let err = SubmitError::DuplicateContent {
            digest_prefix: "deadbeef".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Duplicate);

        let err = SubmitError::Index(IndexError::Corrupted {
            record: 3,
            reason: "truncated".into(),
        });
        assert_eq!(err.category(), ErrorCategory::Corruption);

        let err = SubmitError::CopyFailed {
            reason: "disk full".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Storage);
    }

    #[test]
    fn test_display_carries_limits() {
        let err = SubmitError::FileTooLarge {
            size: 6 * 1024 * 1024,
            max_size: 5 * 1024 * 1024,
        };
        let msg = err.to_string();
        assert!(msg.contains("6291456"));
        assert!(msg.contains("5242880"));
    }
}
