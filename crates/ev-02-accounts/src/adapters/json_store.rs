//! # JSON Account Store
//!
//! `accounts.json`: a pretty-printed JSON map from account id to record,
//! human-inspectable. Every operation runs a full read-modify-write cycle
//! under the store's advisory lock, and saves go through a temp file and an
//! atomic rename, so concurrent increments cannot lose updates and a crash
//! cannot leave a half-written store.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use shared_types::flock::{FileGuard, DEFAULT_LOCK_TIMEOUT};

use crate::domain::entities::Account;
use crate::domain::errors::StoreError;
use crate::ports::outbound::AccountStore;

/// File-backed account store.
pub struct JsonAccountStore {
    path: PathBuf,
    lock_timeout: Duration,
}

impl JsonAccountStore {
    /// Create a store over `path`. The file is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Override the bounded lock wait.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Path of the underlying store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Load the full map. Missing file = empty store; unparseable file =
    /// corruption, never an empty fallback.
    fn load_map(&self) -> Result<BTreeMap<String, Account>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupted {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Persist the full map atomically: write a temp file, fsync, rename.
    fn save_map(&self, accounts: &BTreeMap<String, Account>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(accounts)?;
        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(|e| self.io_error(e))?;
        file.write_all(json.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| self.io_error(e))?;
        drop(file);

        std::fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))
    }
}

impl AccountStore for JsonAccountStore {
    fn get(&self, account_id: &str) -> Result<Option<Account>, StoreError> {
        let _guard = FileGuard::acquire(&self.path, self.lock_timeout)?;
        Ok(self.load_map()?.remove(account_id))
    }

    fn insert_new(&mut self, account: &Account) -> Result<(), StoreError> {
        let _guard = FileGuard::acquire(&self.path, self.lock_timeout)?;
        let mut accounts = self.load_map()?;
        if accounts.contains_key(&account.account_id) {
            return Err(StoreError::Conflict {
                account_id: account.account_id.clone(),
            });
        }
        accounts.insert(account.account_id.clone(), account.clone());
        self.save_map(&accounts)
    }

    fn put(&mut self, account: &Account) -> Result<(), StoreError> {
        let _guard = FileGuard::acquire(&self.path, self.lock_timeout)?;
        let mut accounts = self.load_map()?;
        accounts.insert(account.account_id.clone(), account.clone());
        self.save_map(&accounts)
    }

    fn list(&self) -> Result<Vec<Account>, StoreError> {
        let _guard = FileGuard::acquire(&self.path, self.lock_timeout)?;
        Ok(self.load_map()?.into_values().collect())
    }
}
