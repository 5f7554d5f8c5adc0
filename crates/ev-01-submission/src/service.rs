//! # Submission Service
//!
//! The application service implementing [`SubmissionApi`]. It owns the
//! in-memory index, drives the validate → hash → dedup → copy → append
//! pipeline, and audits every accept and reject before returning.

use std::fs::File;
use std::path::Path;

use shared_audit::{AuditEntry, AuditOutcome, AuditSink};
use shared_crypto::sha256_digest_reader;
use shared_types::short_digest;

use crate::domain::config::VaultConfig;
use crate::domain::entities::{SubmissionIndex, SubmissionRecord};
use crate::domain::errors::{IndexError, SubmitError};
use crate::domain::validator::{validate, validate_student_id};
use crate::ports::inbound::SubmissionApi;
use crate::ports::outbound::{FileVault, IndexStore, TimeSource};

/// Dependencies for [`SubmissionService`].
pub struct SubmissionDependencies<IX, FV, TS, AU> {
    pub index_store: IX,
    pub vault: FV,
    pub time_source: TS,
    pub audit: AU,
}

/// The Submission Service.
///
/// The in-memory index is rebuilt from the durable store at construction;
/// a store that cannot be fully parsed (or that violates a uniqueness
/// constraint) fails construction rather than serving a partial view.
pub struct SubmissionService<IX, FV, TS, AU>
where
    IX: IndexStore,
    FV: FileVault,
    TS: TimeSource,
    AU: AuditSink,
{
    pub(crate) index_store: IX,
    pub(crate) vault: FV,
    pub(crate) time_source: TS,
    pub(crate) audit: AU,
    pub(crate) config: VaultConfig,
    pub(crate) index: SubmissionIndex,
}

impl<IX, FV, TS, AU> SubmissionService<IX, FV, TS, AU>
where
    IX: IndexStore,
    FV: FileVault,
    TS: TimeSource,
    AU: AuditSink,
{
    /// Create a service, loading the durable index.
    pub fn new(
        deps: SubmissionDependencies<IX, FV, TS, AU>,
        config: VaultConfig,
    ) -> Result<Self, SubmitError> {
        let records = deps.index_store.load()?;
        let mut index = SubmissionIndex::new();
        for (position, record) in records.into_iter().enumerate() {
            index.insert(record).map_err(|e| IndexError::Corrupted {
                record: position + 1,
                reason: e.to_string(),
            })?;
        }

        Ok(Self {
            index_store: deps.index_store,
            vault: deps.vault,
            time_source: deps.time_source,
            audit: deps.audit,
            config,
            index,
        })
    }

    /// Number of accepted submissions.
    pub fn record_count(&self) -> usize {
        self.index.len()
    }

    /// Append an audit entry; a failing audit stream must not fail the
    /// operation that triggered it.
    fn audit_or_warn(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.append(&entry) {
            tracing::warn!("audit append failed ({}): entry was {:?}", e, entry);
        }
    }

    fn audit_rejected(&self, student_id: &str, subject: &str, error: &SubmitError) {
        self.audit_or_warn(AuditEntry::new(
            self.time_source.now(),
            student_id,
            subject,
            AuditOutcome::Rejected,
            error.to_string(),
        ));
    }
}

impl<IX, FV, TS, AU> SubmissionApi for SubmissionService<IX, FV, TS, AU>
where
    IX: IndexStore,
    FV: FileVault,
    TS: TimeSource,
    AU: AuditSink,
{
    fn submit(
        &mut self,
        student_id: &str,
        source: &Path,
    ) -> Result<SubmissionRecord, SubmitError> {
        let display_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unnamed>")
            .to_string();

        if let Err(e) = validate_student_id(student_id) {
            self.audit_rejected(student_id, &display_name, &e);
            return Err(e);
        }

        // Stage 1: validation, before any mutation or hashing.
        let candidate = match validate(source, &self.config) {
            Ok(candidate) => candidate,
            Err(e) => {
                self.audit_rejected(student_id, &display_name, &e);
                return Err(e);
            }
        };

        // Stage 2: content fingerprint, streamed.
        let digest = match File::open(source).and_then(sha256_digest_reader) {
            Ok(digest) => digest,
            Err(io_err) => {
                let e = SubmitError::SourceRead {
                    path: source.to_path_buf(),
                    source: io_err,
                };
                self.audit_rejected(student_id, &candidate.filename, &e);
                return Err(e);
            }
        };

        // Stage 3: duplicate filename for this student.
        if self.index.contains_name(student_id, &candidate.filename) {
            let e = SubmitError::DuplicateFilename {
                student_id: student_id.to_string(),
                filename: candidate.filename.clone(),
            };
            self.audit_rejected(student_id, &candidate.filename, &e);
            return Err(e);
        }

        // Stage 4: duplicate content, global across students.
        if let Some(existing) = self.index.record_by_hash(&digest) {
            let detail = format!(
                "duplicate content: matches {}/{} (sha256 {})",
                existing.student_id,
                existing.filename,
                short_digest(&digest)
            );
            let e = SubmitError::DuplicateContent {
                digest_prefix: short_digest(&digest),
            };
            self.audit_or_warn(AuditEntry::new(
                self.time_source.now(),
                student_id,
                &candidate.filename,
                AuditOutcome::Rejected,
                detail,
            ));
            return Err(e);
        }

        // Stage 5: copy into the vault. Failure here leaves the index
        // unwritten.
        if let Err(vault_err) = self.vault.store(student_id, &candidate.filename, source) {
            let e = SubmitError::CopyFailed {
                reason: vault_err.to_string(),
            };
            self.audit_rejected(student_id, &candidate.filename, &e);
            return Err(e);
        }

        // Stage 6: durable index append. If this fails the vault copy is
        // rolled back so the two can never disagree.
        let record = SubmissionRecord {
            student_id: student_id.to_string(),
            filename: candidate.filename.clone(),
            content_hash: digest,
            accepted_at: self.time_source.now(),
            size_bytes: candidate.size_bytes,
        };
        if let Err(index_err) = self.index_store.append(&record) {
            if let Err(discard_err) = self.vault.discard(student_id, &candidate.filename) {
                tracing::warn!(
                    "could not roll back vault file for {}/{}: {}",
                    student_id,
                    candidate.filename,
                    discard_err
                );
            }
            let e = SubmitError::from(index_err);
            self.audit_rejected(student_id, &candidate.filename, &e);
            return Err(e);
        }

        self.index.insert(record.clone())?;

        self.audit_or_warn(AuditEntry::new(
            record.accepted_at,
            student_id,
            &record.filename,
            AuditOutcome::Accepted,
            format!(
                "{} bytes, sha256 {}",
                record.size_bytes,
                short_digest(&record.content_hash)
            ),
        ));

        tracing::info!(
            "accepted submission {}/{} ({} bytes)",
            record.student_id,
            record.filename,
            record.size_bytes
        );
        Ok(record)
    }

    fn submissions_for(&self, student_id: &str) -> Vec<SubmissionRecord> {
        self.index.for_student(student_id)
    }

    fn all_submissions(&self) -> Vec<SubmissionRecord> {
        self.index.records().to_vec()
    }
}
