//! File-backed production adapters for the Accounts subsystem.

pub mod json_store;

pub use json_store::JsonAccountStore;
