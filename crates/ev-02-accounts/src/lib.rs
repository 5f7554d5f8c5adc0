//! # Account & Login Monitor (ev-02)
//!
//! The Accounts subsystem owns credential records and the login lockout
//! state machine. It is the only writer of lockout state.
//!
//! ## State Machine
//!
//! ```text
//!             success: reset attempts
//!        ┌──────────────────────────────┐
//!        ↓                              │
//!    [ACTIVE] ──failure×3──→ [LOCKED: now+30min]
//!        ↑                        │
//!        ├── lazy expiry ─────────┤  (evaluated on the next attempt,
//!        └── manual unlock ───────┘   never by a background timer)
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Reset On Success | failed_attempts returns to 0 on success or unlock |
//! | 2 | Threshold Lockout | locked_until is set only when attempts reach the threshold |
//! | 3 | Lazy Expiry | expiry is computed from stored state on read, no timers |
//! | 4 | No Plain Passwords | only one-way digests are ever persisted |
//! | 5 | No Enumeration | unknown-account and wrong-password read identically to users |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Account entity, lockout policy, pure state transitions
//! - `ports/` - Port traits (inbound API, outbound SPI) and test adapters
//! - `adapters/` - JSON file account store
//! - `service.rs` - Application service implementing the API

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::JsonAccountStore;
pub use domain::config::LockoutPolicy;
pub use domain::entities::{Account, LockState};
pub use domain::errors::{AuthError, StoreError};
pub use ports::inbound::{AccountApi, AccountStatus, LoginOutcome};
pub use ports::outbound::{
    AccountStore, InMemoryAccountStore, MockTimeSource, SystemTimeSource, TimeSource,
};
pub use service::{AccountDependencies, LoginService};
