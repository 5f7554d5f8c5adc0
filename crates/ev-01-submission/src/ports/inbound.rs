//! # Inbound Ports (Driving Ports)
//!
//! The primary API for the Submission subsystem.

use std::path::Path;

use crate::domain::entities::SubmissionRecord;
use crate::domain::errors::SubmitError;

/// Primary API for the Submission subsystem.
///
/// Implementations must enforce all five domain invariants and audit every
/// accept and reject before returning.
pub trait SubmissionApi {
    /// Run the full pipeline for one candidate file.
    ///
    /// ## Errors
    ///
    /// - `InvalidStudentId` / `InvalidFilename` / `InvalidExtension` /
    ///   `FileTooLarge` / `FileNotFound`: validation failures, nothing mutated
    /// - `DuplicateFilename`: this student already submitted this filename
    /// - `DuplicateContent`: identical bytes already accepted, any student
    /// - `CopyFailed`: vault copy failed, no index record written
    /// - `Index(_)`: durable index failure (I/O, lock timeout, corruption)
    fn submit(&mut self, student_id: &str, source: &Path)
        -> Result<SubmissionRecord, SubmitError>;

    /// Accepted records for one student, in acceptance order.
    fn submissions_for(&self, student_id: &str) -> Vec<SubmissionRecord>;

    /// All accepted records, in acceptance order (admin view).
    fn all_submissions(&self) -> Vec<SubmissionRecord>;
}
