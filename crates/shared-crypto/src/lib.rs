//! # Shared Crypto Crate
//!
//! Hashing primitives for ExamVault. One primitive, two semantics:
//!
//! - **Content fingerprints**: submission bytes are digested to detect
//!   duplicate content across the whole index.
//! - **Password digests**: credentials are stored as one-way digests, never
//!   in plain form.
//!
//! All functions are pure over their input bytes; nothing in this crate
//! touches a store.

pub mod hashing;
pub mod passwords;

pub use hashing::{sha256_digest, sha256_digest_reader, Sha256Hasher};
pub use passwords::{hash_password, verify_password};
