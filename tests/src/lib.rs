//! # ExamVault Test Suite
//!
//! Unified test crate containing the cross-subsystem scenarios:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── submission_flows.rs   # Validation, dedup, vault/index consistency
//!     ├── lockout_flows.rs      # Login state machine end to end
//!     └── persistence.rs        # Durable stores across service restarts
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ev-tests
//!
//! # By category
//! cargo test -p ev-tests integration::submission_flows
//! cargo test -p ev-tests integration::lockout_flows
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
