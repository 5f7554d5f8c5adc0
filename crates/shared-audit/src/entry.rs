//! # Audit Entries
//!
//! Immutable records of security-relevant events. Ordering is append order;
//! timestamp ties are broken by position in the stream.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use shared_types::Timestamp;
use std::fmt;

/// Outcome tag of an audited event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditOutcome {
    /// Submission passed the whole pipeline and was recorded.
    Accepted,
    /// Submission rejected (validation, duplicate, or storage failure).
    Rejected,
    /// New account registered.
    AccountCreated,
    /// Correct password on an unlocked account.
    LoginSuccess,
    /// Wrong password on an unlocked account.
    LoginFailure,
    /// Attempt refused because the account is locked.
    LoginBlocked,
    /// Failed-attempt threshold reached; lockout engaged.
    LockoutTriggered,
    /// Administrator cleared the lockout.
    ManualUnlock,
}

impl AuditOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditOutcome::Accepted => "ACCEPTED",
            AuditOutcome::Rejected => "REJECTED",
            AuditOutcome::AccountCreated => "ACCOUNT_CREATED",
            AuditOutcome::LoginSuccess => "LOGIN_SUCCESS",
            AuditOutcome::LoginFailure => "LOGIN_FAILURE",
            AuditOutcome::LoginBlocked => "LOGIN_BLOCKED",
            AuditOutcome::LockoutTriggered => "LOCKOUT_TRIGGERED",
            AuditOutcome::ManualUnlock => "MANUAL_UNLOCK",
        }
    }
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audited event. Never mutated or deleted once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the event happened (seconds since epoch).
    pub timestamp: Timestamp,
    /// Who acted (account id, or student id for submissions).
    pub actor: String,
    /// What was acted on (filename, account id).
    pub subject: String,
    /// Outcome tag.
    pub outcome: AuditOutcome,
    /// Free-form detail with the full internal reason.
    pub detail: String,
}

impl AuditEntry {
    pub fn new(
        timestamp: Timestamp,
        actor: impl Into<String>,
        subject: impl Into<String>,
        outcome: AuditOutcome,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            actor: actor.into(),
            subject: subject.into(),
            outcome,
            detail: detail.into(),
        }
    }

    /// Render the single-line human-readable form written to the stream.
    pub fn render_line(&self) -> String {
        format!(
            "{} | ACTOR={} | SUBJECT={} | OUTCOME={} | {}",
            format_timestamp(self.timestamp),
            self.actor,
            self.subject,
            self.outcome,
            self.detail
        )
    }
}

/// `YYYY-MM-DD HH:MM:SS` in UTC.
pub fn format_timestamp(ts: Timestamp) -> String {
    DateTime::from_timestamp(ts as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| format!("@{}", ts))
}
