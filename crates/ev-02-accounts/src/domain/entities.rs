//! # Domain Entities
//!
//! The account record and its pure lockout-state transitions. The service
//! decides *when* these run; the entity decides *what* they mean, so the
//! state machine is testable without any store.

use serde::{Deserialize, Serialize};
use shared_types::{digest_hex, Digest, Role, Timestamp};

use crate::domain::config::LockoutPolicy;

/// Lockout state of an account at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// Attempts are processed normally.
    Active,
    /// Attempts are rejected until the lock expires or is cleared.
    Locked { remaining_secs: u64 },
}

impl LockState {
    pub fn is_locked(&self) -> bool {
        matches!(self, LockState::Locked { .. })
    }
}

/// One credential record. Mutated only by the login state machine and the
/// manual-unlock operation; never deleted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account identifier (student id or admin name).
    pub account_id: String,
    /// Role granted at creation.
    pub role: Role,
    /// One-way password digest, hex-encoded on disk.
    #[serde(with = "digest_hex")]
    pub password_hash: Digest,
    /// Consecutive failed attempts since the last success or unlock.
    pub failed_attempts: u32,
    /// Set only when failed_attempts reached the threshold; cleared by
    /// expiry (observed lazily) or manual unlock.
    pub locked_until: Option<Timestamp>,
    /// When the account was registered.
    pub created_at: Timestamp,
    /// Most recent successful login.
    pub last_login: Option<Timestamp>,
}

impl Account {
    /// Fresh account with no history.
    pub fn new(
        account_id: impl Into<String>,
        role: Role,
        password_hash: Digest,
        now: Timestamp,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            role,
            password_hash,
            failed_attempts: 0,
            locked_until: None,
            created_at: now,
            last_login: None,
        }
    }

    /// Lockout state at `now`. Pure: a lock whose deadline has passed reads
    /// as `Active` even before any write observes the expiry.
    pub fn lock_state(&self, now: Timestamp) -> LockState {
        match self.locked_until {
            Some(until) if now < until => LockState::Locked {
                remaining_secs: until - now,
            },
            _ => LockState::Active,
        }
    }

    /// Apply a successful login: counters reset, lock cleared, last login
    /// recorded.
    pub fn note_success(&mut self, now: Timestamp) {
        self.failed_attempts = 0;
        self.locked_until = None;
        self.last_login = Some(now);
    }

    /// Apply a failed login. Returns `true` iff this failure reached the
    /// threshold and engaged the lockout.
    pub fn note_failure(&mut self, now: Timestamp, policy: &LockoutPolicy) -> bool {
        self.failed_attempts += 1;
        if self.failed_attempts >= policy.max_failed_attempts {
            self.locked_until = Some(now + policy.lockout_secs);
            true
        } else {
            false
        }
    }

    /// Clear lockout state without touching credentials. Used both for the
    /// lazy expiry transition and for manual unlock.
    pub fn clear_lock(&mut self) {
        self.failed_attempts = 0;
        self.locked_until = None;
    }
}
