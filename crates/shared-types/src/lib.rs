//! # Shared Types Crate
//!
//! Domain primitives shared across all ExamVault subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-subsystem primitives (digests,
//!   timestamps, roles) are defined here and nowhere else.
//! - **No Ambient State**: the file-lock guard in [`flock`] is the only
//!   stateful thing in this crate, and it is RAII-scoped.

pub mod entities;
pub mod flock;

pub use entities::{digest_hex, short_digest, Digest, Role, Timestamp};
pub use flock::{FileGuard, LockError};
