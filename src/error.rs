//! Error types for the fallible parts of the widget (configuration I/O).
//!
//! Interactive operations never fail: invalid input is clamped or ignored.

use thiserror::Error;

/// Errors that can occur while loading or saving a [`crate::DisplayConfig`].
#[derive(Error, Debug)]
pub enum DisplayError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file written by a newer version
    #[error("Unsupported config version {found} (supported up to {supported})")]
    UnsupportedVersion {
        /// Version found in the file
        found: u32,
        /// Highest version this build understands
        supported: u32,
    },

    /// No platform config directory could be determined
    #[error("No config directory available on this platform")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, DisplayError>;
