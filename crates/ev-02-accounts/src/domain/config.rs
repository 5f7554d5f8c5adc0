//! # Lockout Policy
//!
//! Thresholds governing the login state machine.

/// Default failed-attempt threshold before lockout.
pub const DEFAULT_MAX_FAILED_ATTEMPTS: u32 = 3;

/// Default lockout duration: 30 minutes.
pub const DEFAULT_LOCKOUT_SECS: u64 = 30 * 60;

/// Policy for the login state machine.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    /// Lockout engages when failed_attempts reaches this value.
    pub max_failed_attempts: u32,

    /// How long a lockout lasts, in seconds.
    pub lockout_secs: u64,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
            lockout_secs: DEFAULT_LOCKOUT_SECS,
        }
    }
}

impl LockoutPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_failed_attempts(mut self, attempts: u32) -> Self {
        self.max_failed_attempts = attempts;
        self
    }

    pub fn with_lockout_secs(mut self, secs: u64) -> Self {
        self.lockout_secs = secs;
        self
    }
}
