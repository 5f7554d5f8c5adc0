//! # Domain Entities
//!
//! The accepted-submission record and the in-memory dedup index built over
//! the durable store.

use serde::{Deserialize, Serialize};
use shared_types::{digest_hex, short_digest, Digest, Timestamp};
use std::collections::HashMap;

use crate::domain::errors::SubmitError;

/// One accepted submission. Immutable once written; identified by
/// `(student_id, filename)` and separately constrained by global
/// `content_hash` uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Submitting student.
    pub student_id: String,
    /// Original filename as submitted.
    pub filename: String,
    /// SHA-256 fingerprint of the file bytes, hex-encoded on disk.
    #[serde(with = "digest_hex")]
    pub content_hash: Digest,
    /// When the record was accepted (seconds since epoch).
    pub accepted_at: Timestamp,
    /// Accepted file size in bytes.
    pub size_bytes: u64,
}

/// In-memory index over all accepted submissions.
///
/// Two lookup structures are maintained over one record list: name lookups
/// are per student, content lookups are global.
#[derive(Debug, Default)]
pub struct SubmissionIndex {
    records: Vec<SubmissionRecord>,
    by_name: HashMap<(String, String), usize>,
    by_hash: HashMap<Digest, usize>,
}

impl SubmissionIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from previously persisted records, enforcing both
    /// uniqueness constraints. A violation means the durable store is bad.
    pub fn from_records(
        records: impl IntoIterator<Item = SubmissionRecord>,
    ) -> Result<Self, SubmitError> {
        let mut index = Self::new();
        for record in records {
            index.insert(record)?;
        }
        Ok(index)
    }

    /// True iff a record matches both fields exactly (case-sensitive).
    pub fn contains_name(&self, student_id: &str, filename: &str) -> bool {
        self.by_name
            .contains_key(&(student_id.to_string(), filename.to_string()))
    }

    /// True iff any record, regardless of student, has this hash.
    pub fn contains_hash(&self, content_hash: &Digest) -> bool {
        self.by_hash.contains_key(content_hash)
    }

    /// The record holding this hash, if any.
    pub fn record_by_hash(&self, content_hash: &Digest) -> Option<&SubmissionRecord> {
        self.by_hash.get(content_hash).map(|&i| &self.records[i])
    }

    /// Insert a record, rejecting either uniqueness violation.
    pub fn insert(&mut self, record: SubmissionRecord) -> Result<(), SubmitError> {
        let name_key = (record.student_id.clone(), record.filename.clone());
        if self.by_name.contains_key(&name_key) {
            return Err(SubmitError::DuplicateFilename {
                student_id: record.student_id,
                filename: record.filename,
            });
        }
        if self.by_hash.contains_key(&record.content_hash) {
            return Err(SubmitError::DuplicateContent {
                digest_prefix: short_digest(&record.content_hash),
            });
        }

        let position = self.records.len();
        self.by_name.insert(name_key, position);
        self.by_hash.insert(record.content_hash, position);
        self.records.push(record);
        Ok(())
    }

    /// All records for one student, in acceptance order.
    pub fn for_student(&self, student_id: &str) -> Vec<SubmissionRecord> {
        self.records
            .iter()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect()
    }

    /// All records, in acceptance order.
    pub fn records(&self) -> &[SubmissionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
