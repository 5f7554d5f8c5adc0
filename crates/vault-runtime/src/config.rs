//! # Runtime Configuration
//!
//! One data directory holds every durable artifact; all paths derive from
//! it. Limits and thresholds have production defaults with environment
//! override capability.

use std::path::{Path, PathBuf};

use ev_01_submission::VaultConfig;
use ev_02_accounts::LockoutPolicy;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "EXAMVAULT_DATA_DIR";

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Root of all durable state.
    pub data_dir: PathBuf,
    /// Submission pipeline configuration.
    pub vault: VaultConfig,
    /// Login lockout policy.
    pub lockout: LockoutPolicy,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("examvault-data"),
            vault: VaultConfig::default(),
            lockout: LockoutPolicy::default(),
        }
    }
}

impl RuntimeConfig {
    /// Defaults plus environment overrides.
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }
        config
    }

    /// Managed storage directory for accepted submissions.
    pub fn vault_dir(&self) -> PathBuf {
        self.data_dir.join("vault")
    }

    /// Durable submission index (JSON Lines).
    pub fn index_file(&self) -> PathBuf {
        self.data_dir.join("submission_index.jsonl")
    }

    /// Durable account store (JSON map).
    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir.join("accounts.json")
    }

    /// Audit stream for submission events.
    pub fn submission_log(&self) -> PathBuf {
        self.data_dir.join("submission_log.txt")
    }

    /// Audit stream for login and account events.
    pub fn login_log(&self) -> PathBuf {
        self.data_dir.join("login_log.txt")
    }

    /// Create the directory skeleton. Idempotent.
    pub fn bootstrap(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(self.vault_dir())
    }

    /// Root directory as a path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
