//! Unified error handling for cgdir core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for cgdir core operations.
///
/// This enum wraps all possible errors that can occur when using cgdir-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum CgdirError {
    /// Errors from the domain layer (validation, removal rejections).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration and I/O failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl CgdirError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in cgdir".into(),
                "Please report this issue at: https://github.com/cosecruz/cgdir/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Rejected => ErrorCategory::Rejected,
                crate::domain::ErrorCategory::Template => ErrorCategory::Configuration,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    ///
    /// Directory creation is idempotent, so re-running a partially failed
    /// request is always safe.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::PartialFailure { .. })
                | Self::Application(ApplicationError::StoreLockError)
        )
    }

    /// `true` if the request was refused because it would remove folders.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Domain(DomainError::RemovalRejected(_)))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Rejected,
    NotFound,
    Configuration,
    Io,
    Internal,
}

/// Convenient result type alias.
pub type CgdirResult<T> = Result<T, CgdirError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> CgdirResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> CgdirResult<T> {
        self.map_err(|e| CgdirError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RejectionReason;
    use std::path::PathBuf;

    #[test]
    fn partial_failure_is_retryable() {
        let err: CgdirError = ApplicationError::PartialFailure {
            failed: vec![PathBuf::from("/x")],
        }
        .into();
        assert!(err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Io);
    }

    #[test]
    fn rejection_is_detected() {
        let err: CgdirError = DomainError::from(RejectionReason::ShotRemoval {
            sequence: "seq_0001".into(),
            original: 3,
            requested: 1,
        })
        .into();
        assert!(err.is_rejection());
        assert!(!err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Rejected);
        assert!(err.to_string().contains("shot removal attempted"));
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let result: Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let err = result.context("rendering summary").unwrap_err();
        assert!(matches!(err, CgdirError::Internal { .. }));
        assert!(err.to_string().contains("rendering summary"));
    }
}
