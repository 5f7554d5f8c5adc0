//! # Audit Errors

use shared_types::LockError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from appending to an audit stream.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The stream file could not be opened or written.
    #[error("audit stream {path} unwritable: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Another writer held the stream lock past the bounded wait.
    #[error(transparent)]
    Lock(#[from] LockError),
}
