//! # Vault Configuration
//!
//! Immutable configuration for the submission pipeline. All values have
//! production defaults.

/// Default maximum accepted file size: 5 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Configuration for the submission pipeline.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Allowed filename extensions, compared case-insensitively.
    pub allowed_extensions: Vec<String>,

    /// Maximum accepted file size in bytes.
    pub max_file_size: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: vec!["pdf".to_string(), "docx".to_string()],
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl VaultConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the extension allow-list.
    pub fn with_allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the maximum accepted file size.
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Check an extension against the allow-list, case-insensitively.
    pub fn extension_allowed(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}
