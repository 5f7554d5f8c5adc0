//! # Inbound Ports (Driving Ports)
//!
//! The primary API for the Accounts subsystem.

use shared_types::{Role, Timestamp};

use crate::domain::entities::LockState;
use crate::domain::errors::AuthError;

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub account_id: String,
    pub role: Role,
    /// The login before this one, for the "last login" greeting.
    pub previous_login: Option<Timestamp>,
}

/// Point-in-time view of one account, for status display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountStatus {
    pub account_id: String,
    pub role: Role,
    pub state: LockState,
    pub failed_attempts: u32,
    pub last_login: Option<Timestamp>,
}

/// Primary API for the Accounts subsystem.
///
/// Implementations are the sole writer of lockout state and must audit
/// every outcome before returning.
pub trait AccountApi {
    /// Register a new account. The password is digested before storage.
    ///
    /// ## Errors
    ///
    /// - `EmptyAccountId` / `EmptyPassword`: rejected before any store access
    /// - `AlreadyExists`: the id is taken
    fn create_account(&mut self, account_id: &str, role: Role, password: &str)
        -> Result<(), AuthError>;

    /// Evaluate one login attempt against the state machine.
    ///
    /// Lazy lock expiry is applied first; a still-active lock rejects the
    /// attempt without a password check.
    ///
    /// ## Errors
    ///
    /// - `AccountNotFound` / `InvalidCredentials`: generic user-visible text
    /// - `AccountLocked`: lock still active, retry time included
    fn login(&mut self, account_id: &str, password: &str) -> Result<LoginOutcome, AuthError>;

    /// Clear lockout state unconditionally. Privileged; enforcement is the
    /// calling layer's concern.
    fn unlock(&mut self, account_id: &str) -> Result<(), AuthError>;

    /// Point-in-time status of one account.
    fn account_status(&self, account_id: &str) -> Result<AccountStatus, AuthError>;

    /// Status of every account (admin view).
    fn list_accounts(&self) -> Result<Vec<AccountStatus>, AuthError>;
}
