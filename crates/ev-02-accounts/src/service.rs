//! # Login Service
//!
//! The application service implementing [`AccountApi`]. It is the single
//! writer of lockout state: every transition of the state machine happens
//! here, is persisted through the store port, and is audited before the
//! call returns.

use shared_audit::{AuditEntry, AuditOutcome, AuditSink};
use shared_crypto::{hash_password, verify_password};
use shared_types::Role;

use crate::domain::config::LockoutPolicy;
use crate::domain::entities::{Account, LockState};
use crate::domain::errors::AuthError;
use crate::ports::inbound::{AccountApi, AccountStatus, LoginOutcome};
use crate::ports::outbound::{AccountStore, TimeSource};

/// Dependencies for [`LoginService`].
pub struct AccountDependencies<ST, TS, AU> {
    pub store: ST,
    pub time_source: TS,
    pub audit: AU,
}

/// The Login Service.
pub struct LoginService<ST, TS, AU>
where
    ST: AccountStore,
    TS: TimeSource,
    AU: AuditSink,
{
    pub(crate) store: ST,
    pub(crate) time_source: TS,
    pub(crate) audit: AU,
    pub(crate) policy: LockoutPolicy,
}

impl<ST, TS, AU> LoginService<ST, TS, AU>
where
    ST: AccountStore,
    TS: TimeSource,
    AU: AuditSink,
{
    pub fn new(deps: AccountDependencies<ST, TS, AU>, policy: LockoutPolicy) -> Self {
        Self {
            store: deps.store,
            time_source: deps.time_source,
            audit: deps.audit,
            policy,
        }
    }

    /// Append an audit entry; a failing audit stream must not fail the
    /// operation that triggered it.
    fn audit_or_warn(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.append(&entry) {
            tracing::warn!("audit append failed ({}): entry was {:?}", e, entry);
        }
    }

    fn audit_account(&self, account_id: &str, outcome: AuditOutcome, detail: impl Into<String>) {
        self.audit_or_warn(AuditEntry::new(
            self.time_source.now(),
            account_id,
            account_id,
            outcome,
            detail,
        ));
    }

    fn status_of(&self, account: &Account) -> AccountStatus {
        let now = self.time_source.now();
        AccountStatus {
            account_id: account.account_id.clone(),
            role: account.role,
            state: account.lock_state(now),
            failed_attempts: account.failed_attempts,
            last_login: account.last_login,
        }
    }
}

impl<ST, TS, AU> AccountApi for LoginService<ST, TS, AU>
where
    ST: AccountStore,
    TS: TimeSource,
    AU: AuditSink,
{
    fn create_account(
        &mut self,
        account_id: &str,
        role: Role,
        password: &str,
    ) -> Result<(), AuthError> {
        let account_id = account_id.trim();
        if account_id.is_empty() {
            return Err(AuthError::EmptyAccountId);
        }
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        let now = self.time_source.now();
        let account = Account::new(account_id, role, hash_password(password), now);
        self.store.insert_new(&account).map_err(|e| match e {
            crate::domain::errors::StoreError::Conflict { account_id } => {
                AuthError::AlreadyExists { account_id }
            }
            other => AuthError::Store(other),
        })?;

        self.audit_account(
            account_id,
            AuditOutcome::AccountCreated,
            format!("new {} account registered", role),
        );
        tracing::info!("account {} created ({})", account_id, role);
        Ok(())
    }

    fn login(&mut self, account_id: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let account_id = account_id.trim();
        if account_id.is_empty() {
            return Err(AuthError::EmptyAccountId);
        }

        let Some(mut account) = self.store.get(account_id)? else {
            self.audit_account(account_id, AuditOutcome::LoginFailure, "account not found");
            return Err(AuthError::AccountNotFound {
                account_id: account_id.to_string(),
            });
        };

        let now = self.time_source.now();

        // Lazy expiry first: a lock that is still live rejects the attempt
        // without consuming a password check; an expired one clears and the
        // attempt proceeds under the active rules in this same call.
        match account.lock_state(now) {
            LockState::Locked { remaining_secs } => {
                self.audit_account(
                    account_id,
                    AuditOutcome::LoginBlocked,
                    format!("account locked, {}s remaining", remaining_secs),
                );
                return Err(AuthError::AccountLocked {
                    retry_after_secs: remaining_secs,
                });
            }
            LockState::Active => {
                if account.locked_until.is_some() {
                    account.clear_lock();
                }
            }
        }

        if verify_password(password, &account.password_hash) {
            let previous_login = account.last_login;
            account.note_success(now);
            self.store.put(&account)?;

            self.audit_account(
                account_id,
                AuditOutcome::LoginSuccess,
                format!("successful login as {}", account.role),
            );
            Ok(LoginOutcome {
                account_id: account.account_id,
                role: account.role,
                previous_login,
            })
        } else {
            let locked_now = account.note_failure(now, &self.policy);
            self.store.put(&account)?;

            if locked_now {
                self.audit_account(
                    account_id,
                    AuditOutcome::LockoutTriggered,
                    format!(
                        "account locked for {}s after {} failed attempts",
                        self.policy.lockout_secs, account.failed_attempts
                    ),
                );
            } else {
                let attempts_left = self
                    .policy
                    .max_failed_attempts
                    .saturating_sub(account.failed_attempts);
                self.audit_account(
                    account_id,
                    AuditOutcome::LoginFailure,
                    format!("wrong password, {} attempt(s) left", attempts_left),
                );
            }
            Err(AuthError::InvalidCredentials)
        }
    }

    fn unlock(&mut self, account_id: &str) -> Result<(), AuthError> {
        let Some(mut account) = self.store.get(account_id)? else {
            return Err(AuthError::AccountNotFound {
                account_id: account_id.to_string(),
            });
        };

        account.clear_lock();
        self.store.put(&account)?;

        self.audit_account(
            account_id,
            AuditOutcome::ManualUnlock,
            "account manually unlocked by admin",
        );
        tracing::info!("account {} manually unlocked", account_id);
        Ok(())
    }

    fn account_status(&self, account_id: &str) -> Result<AccountStatus, AuthError> {
        let Some(account) = self.store.get(account_id)? else {
            return Err(AuthError::AccountNotFound {
                account_id: account_id.to_string(),
            });
        };
        Ok(self.status_of(&account))
    }

    fn list_accounts(&self) -> Result<Vec<AccountStatus>, AuthError> {
        let accounts = self.store.list()?;
        Ok(accounts.iter().map(|a| self.status_of(a)).collect())
    }
}
