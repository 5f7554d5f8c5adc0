//! # Domain Errors
//!
//! Error types for the Accounts subsystem.
//!
//! The user-visible text for "no such account" and "wrong password" is
//! deliberately identical so login errors cannot be used to enumerate
//! account ids. The audit trail carries the true reason.

use shared_types::LockError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Generic login-failure text shown for both unknown accounts and bad
/// passwords.
const GENERIC_LOGIN_FAILURE: &str = "login failed: invalid account id or password";

/// Errors from account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Account identifier was empty or whitespace.
    #[error("account id cannot be empty")]
    EmptyAccountId,

    /// Password was empty.
    #[error("password cannot be empty")]
    EmptyPassword,

    /// Creation attempted over an existing account.
    #[error("account {account_id:?} already exists")]
    AlreadyExists { account_id: String },

    /// No account with this id. Displays generically; see module docs.
    #[error("{}", GENERIC_LOGIN_FAILURE)]
    AccountNotFound { account_id: String },

    /// Password digest mismatch. Displays generically; see module docs.
    #[error("{}", GENERIC_LOGIN_FAILURE)]
    InvalidCredentials,

    /// Account is locked; no password check was performed.
    #[error("account locked, try again in {retry_after_secs} second(s)")]
    AccountLocked { retry_after_secs: u64 },

    /// Durable store failure (I/O, lock, or corruption).
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from the durable account store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file could not be read or written.
    #[error("account store {path} unusable: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Another writer held the store lock past the bounded wait.
    #[error(transparent)]
    Lock(#[from] LockError),

    /// An insert collided with an existing account id.
    #[error("account {account_id:?} already present in store")]
    Conflict { account_id: String },

    /// The store is unreadable or malformed. Operations must not proceed
    /// with a partial view.
    #[error("account store {path} corrupted: {reason}")]
    Corrupted { path: PathBuf, reason: String },

    /// A record failed to encode (never expected for well-formed records).
    #[error("could not encode account record: {0}")]
    Encode(#[from] serde_json::Error),
}
