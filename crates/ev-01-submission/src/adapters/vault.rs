//! # Filesystem Vault
//!
//! Managed storage for accepted submissions: one file per record, named
//! `<student_id>__<filename>` so same-named files from different students
//! cannot collide. Destinations are opened with `create_new`, so an
//! existing file is never overwritten.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::errors::VaultError;
use crate::ports::outbound::{vault_name, FileVault};

/// Directory-backed vault.
pub struct FsFileVault {
    root: PathBuf,
}

impl FsFileVault {
    /// Create a vault rooted at `root`. The directory is created on the
    /// first store.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Vault root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Destination path for a `(student, filename)` pair.
    pub fn destination(&self, student_id: &str, filename: &str) -> PathBuf {
        self.root.join(vault_name(student_id, filename))
    }

    fn io_error(path: &Path, source: io::Error) -> VaultError {
        VaultError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl FileVault for FsFileVault {
    fn store(
        &self,
        student_id: &str,
        filename: &str,
        source: &Path,
    ) -> Result<PathBuf, VaultError> {
        std::fs::create_dir_all(&self.root).map_err(|e| Self::io_error(&self.root, e))?;

        let destination = self.destination(student_id, filename);
        let mut src = File::open(source).map_err(|e| Self::io_error(source, e))?;
        let mut dst = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&destination)
            .map_err(|e| Self::io_error(&destination, e))?;

        let copy_result = io::copy(&mut src, &mut dst).and_then(|_| dst.sync_all());
        if let Err(e) = copy_result {
            // Half-written vault files must not linger.
            drop(dst);
            let _ = std::fs::remove_file(&destination);
            return Err(Self::io_error(&destination, e));
        }

        Ok(destination)
    }

    fn discard(&self, student_id: &str, filename: &str) -> Result<(), VaultError> {
        let destination = self.destination(student_id, filename);
        match std::fs::remove_file(&destination) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&destination, e)),
        }
    }
}
