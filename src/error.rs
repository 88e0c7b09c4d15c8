//! Error types for bootstat
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using BootstatError
pub type Result<T> = std::result::Result<T, BootstatError>;

/// Unified error type for bootstat operations
///
/// Every variant aborts the current parse. The input is a static snapshot,
/// so there is nothing to retry.
#[derive(Debug, Error)]
pub enum BootstatError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Truncated input: needed {needed} bytes at offset 0x{offset:04x}")]
    TruncatedInput { offset: u64, needed: usize },

    // -------------------------------------------------------------------------
    // Decoding Errors
    // -------------------------------------------------------------------------
    #[error("Unknown value {value} for field {field}")]
    UnknownFieldValue { field: &'static str, value: u32 },

    #[error("Corrupt log: {0}")]
    CorruptLog(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BootstatError {
    /// Map an `UnexpectedEof` from `read_exact` into `TruncatedInput`
    pub(crate) fn from_read(err: std::io::Error, offset: u64, needed: usize) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            BootstatError::TruncatedInput { offset, needed }
        } else {
            BootstatError::Io(err)
        }
    }
}
