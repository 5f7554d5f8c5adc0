//! # Submission Vault (ev-01)
//!
//! The Submission subsystem is the authoritative pipeline for examination
//! artifacts: it validates candidate files, deduplicates them against the
//! durable index, copies accepted files into managed vault storage, and
//! audits every accept and reject.
//!
//! ## Pipeline
//!
//! ```text
//! submit(student, path)
//!     │
//!     ├─ Validator ──── extension → existence → size (short-circuit)
//!     ├─ Hasher ─────── streaming SHA-256 of the source bytes
//!     ├─ Index ──────── (student, filename) unique, content hash globally unique
//!     ├─ Vault copy ─── <student>__<filename>, never overwritten
//!     └─ Index append ─ one durable JSON line, then ACCEPTED audit entry
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Unique Filename | No two records share (student_id, filename) |
//! | 2 | Unique Content | No two records share content_hash, across all students |
//! | 3 | Validate First | Nothing is mutated before validation passes |
//! | 4 | Vault-Index Consistency | An index record exists iff its vault file does |
//! | 5 | Serialized Appends | At most one index append in flight, across processes |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Pure domain logic (records, index, validator, errors)
//! - `ports/` - Port traits (inbound API, outbound SPI) and test adapters
//! - `adapters/` - File-backed production adapters (JSONL index, vault dir)
//! - `service.rs` - Application service implementing the API
//!
//! ## Usage
//!
//! ```ignore
//! use ev_01_submission::{SubmissionApi, SubmissionDependencies, SubmissionService, VaultConfig};
//!
//! let deps = SubmissionDependencies {
//!     index_store: JsonlIndexStore::new(data_dir.join("submission_index.jsonl")),
//!     vault: FsFileVault::new(data_dir.join("vault")),
//!     time_source: SystemTimeSource,
//!     audit: FileAuditLog::new(data_dir.join("submission_log.txt")),
//! };
//! let mut service = SubmissionService::new(deps, VaultConfig::default())?;
//! let record = service.submit("stu42", Path::new("report.pdf"))?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{FsFileVault, JsonlIndexStore};
pub use domain::config::VaultConfig;
pub use domain::entities::{SubmissionIndex, SubmissionRecord};
pub use domain::errors::{ErrorCategory, IndexError, SubmitError, VaultError};
pub use domain::validator::{validate, CandidateFile};
pub use ports::inbound::SubmissionApi;
pub use ports::outbound::{
    FileVault, IndexStore, InMemoryIndexStore, InMemoryVault, MockTimeSource, SystemTimeSource,
    TimeSource,
};
pub use service::{SubmissionDependencies, SubmissionService};
