//! # Submission Validator
//!
//! Ordered, short-circuiting checks over a candidate file. Extension comes
//! before the size check, and both come before any hashing, so a file that
//! will be rejected anyway costs no I/O. Pure with respect to the index and
//! the vault; only source metadata is read.

use std::path::Path;

use crate::domain::config::VaultConfig;
use crate::domain::errors::SubmitError;

/// A candidate that passed validation and may proceed to hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Plain filename (no directory components).
    pub filename: String,
    /// Source size in bytes.
    pub size_bytes: u64,
}

/// Validate a source path against the pipeline configuration.
///
/// Check order is fixed: filename shape, extension allow-list, existence as
/// a regular file, size limit.
pub fn validate(path: &Path, config: &VaultConfig) -> Result<CandidateFile, SubmitError> {
    let filename = plain_filename(path)?;

    let extension = filename
        .rsplit_once('.')
        .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
        .map(|(_, ext)| ext);
    match extension {
        Some(ext) if config.extension_allowed(ext) => {}
        _ => {
            return Err(SubmitError::InvalidExtension {
                filename: filename.to_string(),
            })
        }
    }

    let metadata = std::fs::metadata(path).map_err(|_| SubmitError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    if !metadata.is_file() {
        return Err(SubmitError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let size_bytes = metadata.len();
    if size_bytes > config.max_file_size {
        return Err(SubmitError::FileTooLarge {
            size: size_bytes,
            max_size: config.max_file_size,
        });
    }

    Ok(CandidateFile {
        filename: filename.to_string(),
        size_bytes,
    })
}

/// Extract the plain filename, rejecting anything that is not a simple
/// UTF-8 file name. Vault destinations are built from this value, so it
/// must never carry directory components.
fn plain_filename(path: &Path) -> Result<&str, SubmitError> {
    let invalid = || SubmitError::InvalidFilename {
        filename: path.display().to_string(),
    };

    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(invalid)?;
    if filename.is_empty() || filename == "." || filename == ".." {
        return Err(invalid());
    }
    Ok(filename)
}

/// Validate a student identifier before it becomes part of a vault path.
pub fn validate_student_id(student_id: &str) -> Result<(), SubmitError> {
    let trimmed = student_id.trim();
    let bad = trimmed.is_empty()
        || trimmed != student_id
        || student_id.contains(['/', '\\'])
        || student_id.contains("..");
    if bad {
        return Err(SubmitError::InvalidStudentId {
            student_id: student_id.to_string(),
        });
    }
    Ok(())
}
