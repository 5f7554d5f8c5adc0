//! File-backed production adapters for the Submission subsystem.

pub mod jsonl_index;
pub mod vault;

pub use jsonl_index::JsonlIndexStore;
pub use vault::FsFileVault;
