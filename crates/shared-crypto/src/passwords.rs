//! # Password Digests
//!
//! Passwords are stored as a single unsalted SHA-256 digest of their UTF-8
//! bytes. That matches the historical account format this system inherits,
//! and it is a **known weakness**: without a per-account salt and a slow KDF,
//! identical passwords produce identical digests and offline guessing is
//! cheap. Treat these digests as fingerprints guarding coursework data, not
//! as hardened credential storage.

use shared_types::Digest;

use crate::hashing::sha256_digest;

/// Digest a password for storage.
pub fn hash_password(password: &str) -> Digest {
    sha256_digest(password.as_bytes())
}

/// Check a password attempt against a stored digest.
///
/// The comparison runs over every byte regardless of where the first
/// mismatch occurs, so timing does not leak the matching prefix length.
pub fn verify_password(attempt: &str, stored: &Digest) -> bool {
    let candidate = hash_password(attempt);
    let mut diff = 0u8;
    for (a, b) in candidate.iter().zip(stored.iter()) {
        diff |= a ^ b;
    }
    diff == 0
}
