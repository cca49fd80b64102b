//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not validation.
//! Validation and removal rejections are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The scaffold outline could not be read.
    #[error("Scaffold outline unavailable ({source_name}): {reason}")]
    ScaffoldUnavailable { source_name: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Some paths of a batch failed; everything else was created.
    #[error("{} path(s) could not be created", failed.len())]
    PartialFailure { failed: Vec<PathBuf> },

    /// Store access failed (lock poisoned, etc.).
    #[error("Filesystem state lock poisoned")]
    StoreLockError,

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Project folder to open does not exist.
    #[error("No project found at {path}")]
    ProjectNotFound { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ScaffoldUnavailable { source_name, .. } => vec![
                format!("Could not read the scaffold outline from {}", source_name),
                "Check scaffold.template in your configuration".into(),
                "Remove the setting to fall back to the built-in outline".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::PartialFailure { failed } => {
                let mut suggestions = vec!["These paths could not be created:".into()];
                suggestions.extend(failed.iter().map(|p| format!("  • {}", p.display())));
                suggestions.push("Fix the cause and re-run the same command; it is safe to retry".into());
                suggestions
            }
            Self::StoreLockError => vec![
                "The filesystem state is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use: cgdir update to extend an existing project".into(),
                "Or pass --force to re-create missing folders and overwrite the notes".into(),
            ],
            Self::ProjectNotFound { path } => vec![
                format!("Nothing at: {}", path.display()),
                "Pass a project folder path or a folder name under the root directory".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ScaffoldUnavailable { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. } | Self::PartialFailure { .. } => ErrorCategory::Io,
            Self::StoreLockError => ErrorCategory::Internal,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::ProjectNotFound { .. } => ErrorCategory::NotFound,
        }
    }
}
