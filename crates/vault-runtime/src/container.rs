//! # Service Container
//!
//! Constructs the subsystem services with their production adapters. All
//! wiring decisions live here; the menus only see the inbound APIs.

use anyhow::{Context, Result};

use ev_01_submission::{
    FsFileVault, JsonlIndexStore, SubmissionDependencies, SubmissionService,
    SystemTimeSource as SubmissionClock,
};
use ev_02_accounts::{
    AccountDependencies, JsonAccountStore, LoginService, SystemTimeSource as AccountClock,
};
use shared_audit::FileAuditLog;

use crate::config::RuntimeConfig;

/// Production submission service.
pub type ProdSubmissionService =
    SubmissionService<JsonlIndexStore, FsFileVault, SubmissionClock, FileAuditLog>;

/// Production login service.
pub type ProdLoginService = LoginService<JsonAccountStore, AccountClock, FileAuditLog>;

/// All initialized services plus the configuration they were built from.
pub struct ServiceContainer {
    pub config: RuntimeConfig,
    pub submissions: ProdSubmissionService,
    pub accounts: ProdLoginService,
}

impl ServiceContainer {
    /// Bootstrap the data directory and wire both subsystems.
    ///
    /// Fails if the durable index cannot be loaded cleanly; a corrupted
    /// store must surface here, not serve a partial view later.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        config
            .bootstrap()
            .with_context(|| format!("creating data directory {}", config.data_dir.display()))?;

        let submissions = SubmissionService::new(
            SubmissionDependencies {
                index_store: JsonlIndexStore::new(config.index_file()),
                vault: FsFileVault::new(config.vault_dir()),
                time_source: SubmissionClock,
                audit: FileAuditLog::new(config.submission_log()),
            },
            config.vault.clone(),
        )
        .context("loading submission index")?;

        let accounts = LoginService::new(
            AccountDependencies {
                store: JsonAccountStore::new(config.accounts_file()),
                time_source: AccountClock,
                audit: FileAuditLog::new(config.login_log()),
            },
            config.lockout,
        );

        Ok(Self {
            config,
            submissions,
            accounts,
        })
    }
}
