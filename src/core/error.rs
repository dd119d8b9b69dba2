//! Error types for regview
//!
//! One enum covers the three failure classes the engine distinguishes:
//! configuration errors (bad filter input, retry with corrected input),
//! resolution errors (an external interface query failed for one node,
//! retry via forced refresh), and fatal errors (anything unexpected,
//! scoped to the single operation that raised it). There is no global
//! error state; every error is returned per call.

use thiserror::Error;

use crate::core::records::Guid;

/// Result type alias for viewer operations
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Errors that can occur while building, filtering or resolving views
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The filter pattern did not compile to a valid regular expression
    #[error("invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The match-mode index was outside the supported range
    #[error("invalid match mode index: {index}")]
    InvalidMatchMode { index: usize },

    /// The external interface query failed for a specific class
    #[error("interface query failed for {clsid}: {message}")]
    QueryFailed { clsid: Guid, message: String },

    /// Unexpected failure; not recoverable within this operation
    #[error("unexpected failure: {message}")]
    Fatal { message: String },
}

impl ViewerError {
    /// Create a fatal error
    pub fn fatal(message: impl Into<String>) -> Self {
        ViewerError::Fatal {
            message: message.into(),
        }
    }

    /// Whether retrying the operation (with corrected input or a forced
    /// refresh) can be expected to succeed
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ViewerError::Fatal { .. })
    }

    /// Whether this error was caused by caller-supplied filter input
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ViewerError::InvalidPattern(_) | ViewerError::InvalidMatchMode { .. }
        )
    }
}
