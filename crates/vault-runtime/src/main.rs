//! # ExamVault Runtime
//!
//! The main entry point for the ExamVault submission system.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging
//! 2. Load configuration (defaults + environment overrides)
//! 3. Bootstrap the data directory skeleton
//! 4. Wire production adapters into the subsystem services
//! 5. Run the interactive menus until exit
//!
//! ## Subsystems
//!
//! 1. Submission Vault (ev-01) - validation, dedup, managed storage
//! 2. Account & Login Monitor (ev-02) - credentials, lockout state machine
//!
//! Both write their security-relevant events to the append-only audit
//! streams owned by `shared-audit`.

pub mod config;
pub mod container;
pub mod menu;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::RuntimeConfig;
use crate::container::ServiceContainer;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let config = RuntimeConfig::load();

    info!("===========================================");
    info!("  ExamVault Runtime v0.1.0");
    info!("  Data Dir: {:?}", config.data_dir);
    info!("===========================================");

    // Wire subsystems with production adapters
    let mut container = ServiceContainer::new(config).context("initializing services")?;

    info!("All subsystems initialized");

    // Run the interactive menus until exit or EOF
    menu::run(&mut container).context("running menu loop")?;

    Ok(())
}
