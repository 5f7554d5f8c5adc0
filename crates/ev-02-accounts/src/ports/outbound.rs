//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the Login service, plus in-memory adapters for
//! tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use shared_types::Timestamp;

use crate::domain::entities::Account;
use crate::domain::errors::StoreError;

/// Abstract interface for the durable account store.
///
/// Production: [`crate::adapters::JsonAccountStore`].
/// Testing: [`InMemoryAccountStore`] (below).
///
/// Implementations must make `put` and `insert_new` atomic read-modify-write
/// cycles under the store's exclusion scope, so two concurrent failed-login
/// increments cannot lose an update.
pub trait AccountStore: Send {
    /// Fetch one account by id.
    fn get(&self, account_id: &str) -> Result<Option<Account>, StoreError>;

    /// Insert a fresh account; fails with `Conflict` if the id exists.
    fn insert_new(&mut self, account: &Account) -> Result<(), StoreError>;

    /// Persist the full record, inserting or replacing.
    fn put(&mut self, account: &Account) -> Result<(), StoreError>;

    /// Every stored account, ordered by account id.
    fn list(&self) -> Result<Vec<Account>, StoreError>;
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current timestamp in seconds since epoch.
    fn now(&self) -> Timestamp;
}

/// Default time source using system time.
#[derive(Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Controllable time source for tests. Clones share one clock, so a test
/// can simulate a 30-minute lockout elapsing without sleeping.
#[derive(Clone)]
pub struct MockTimeSource {
    now: Arc<AtomicU64>,
}

impl MockTimeSource {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}

/// In-memory account store for tests.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: BTreeMap<String, Account>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get(&self, account_id: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(account_id).cloned())
    }

    fn insert_new(&mut self, account: &Account) -> Result<(), StoreError> {
        if self.accounts.contains_key(&account.account_id) {
            return Err(StoreError::Conflict {
                account_id: account.account_id.clone(),
            });
        }
        self.accounts
            .insert(account.account_id.clone(), account.clone());
        Ok(())
    }

    fn put(&mut self, account: &Account) -> Result<(), StoreError> {
        self.accounts
            .insert(account.account_id.clone(), account.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.accounts.values().cloned().collect())
    }
}
