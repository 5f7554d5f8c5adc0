//! Cross-subsystem integration scenarios.

pub mod lockout_flows;
pub mod persistence;
pub mod submission_flows;
