//! # Shared Entities
//!
//! Primitive types used by every subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SHA-256 digest (256-bit), used both as a content fingerprint and as a
/// password digest.
pub type Digest = [u8; 32];

/// Unix timestamp in seconds since epoch.
pub type Timestamp = u64;

/// First 8 hex characters of a digest, for audit detail and log output.
pub fn short_digest(digest: &Digest) -> String {
    hex::encode(&digest[..4])
}

/// Serde helpers rendering a [`Digest`] as a hex string, so persisted JSON
/// stays human-inspectable.
///
/// Usage: `#[serde(with = "shared_types::digest_hex")]`.
pub mod digest_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Digest;

    pub fn serialize<S: Serializer>(digest: &Digest, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(digest))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Digest, D::Error> {
        let text = String::deserialize(deserializer)?;
        let bytes = hex::decode(text.trim()).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("digest must be exactly 32 bytes"))
    }
}

/// Account role.
///
/// Students submit artifacts and see their own records; admins additionally
/// see all records and may unlock accounts. Privilege enforcement lives in
/// the menu layer, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}
