//! # SHA-256 Hashing
//!
//! Deterministic content fingerprinting. The same input bytes always yield
//! the same digest, which is what makes global duplicate detection sound.

use std::io::{self, Read};

use sha2::{Digest as _, Sha256};
use shared_types::Digest;

/// Chunk size for streaming reads. Large submissions are digested without
/// ever being buffered whole.
const READ_CHUNK: usize = 64 * 1024;

/// Stateful SHA-256 hasher.
pub struct Sha256Hasher {
    inner: Sha256,
}

impl Sha256Hasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Sha256::new(),
        }
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Finalize and return the digest.
    pub fn finalize(self) -> Digest {
        self.inner.finalize().into()
    }
}

impl Default for Sha256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash data with SHA-256 (one-shot).
pub fn sha256_digest(data: &[u8]) -> Digest {
    Sha256::digest(data).into()
}

/// Hash everything a reader yields, streaming in 64 KiB chunks.
pub fn sha256_digest_reader<R: Read>(mut reader: R) -> io::Result<Digest> {
    let mut hasher = Sha256Hasher::new();
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize())
}
