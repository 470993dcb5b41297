//! Shared error types for the engine
//!
//! Engine computations are total: empty inputs, zero sums and zero
//! baselines are handled in place. Errors only surface at the boundaries
//! (catalog loading, config parsing, store access, explicit validation).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cloudrank operations
#[derive(Debug, Error)]
pub enum Error {
    /// Catalog data is structurally invalid
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input validation errors (weights, settings, overrides)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A provider id that is not part of the loaded catalog
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// A component id that is not part of the loaded catalog
    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    /// Key-value store failures
    #[error("Store error for key '{key}': {message}")]
    Store { key: String, message: String },

    /// File errors with the offending path attached
    #[error("File system error at {}: {message}", path.display())]
    FileSystem { message: String, path: PathBuf },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a store error for a key
    pub fn store(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Store {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a file system error with path context
    pub fn file_system(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
