//! Domain errors: invalid identities, inconsistent states, template gaps and
//! refused removals.

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid project {field}: {reason}")]
    InvalidIdentity { field: &'static str, reason: String },

    #[error("'{name}' is not a project folder (expected <number>_<name>)")]
    InvalidProjectFolder { name: String },

    #[error(
        "Inconsistent project state: {sequence_count} sequences but {shot_entries} shot counts"
    )]
    InconsistentState {
        sequence_count: usize,
        shot_entries: usize,
    },

    #[error("Index {index} is out of range for {kind} names (1..={max})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        max: usize,
    },

    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("Scaffold template is missing '{path}'")]
    MissingTemplateNode { path: String },

    // ========================================================================
    // Constraint Violations (409-level equivalent)
    // ========================================================================
    #[error(transparent)]
    RemovalRejected(#[from] RejectionReason),
}

/// Why a requested project state was refused.
///
/// Updates only ever grow a project; anything implying removal is rejected
/// before the filesystem is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("sequence removal attempted: {original} sequences exist, {requested} requested")]
    SequenceRemoval { original: usize, requested: usize },

    #[error(
        "shot removal attempted in {sequence}: {original} shots exist, {requested} requested"
    )]
    ShotRemoval {
        sequence: String,
        original: usize,
        requested: usize,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidIdentity { field, .. } => vec![
                format!("Provide a non-empty project {field}"),
                "Project folders are named <number>_<name>, e.g. 12345678_Awesome_CG".into(),
            ],
            Self::InvalidProjectFolder { name } => vec![
                format!("'{name}' does not contain an underscore"),
                "Open the project folder itself, e.g. <root>/12345678_Awesome_CG".into(),
            ],
            Self::InconsistentState { .. } => {
                vec!["Give exactly one shot count per sequence".into()]
            }
            Self::MissingTemplateNode { path } => vec![
                format!("The scaffold outline must contain '{path}'"),
                "Run: cgdir template to inspect the parsed outline".into(),
            ],
            Self::RemovalRejected(_) => vec![
                "Sequence deletion or shot removal is not allowed".into(),
                "All pending changes were reverted, including notes".into(),
                "Run: cgdir status <PROJECT> to see the current counts".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidIdentity { .. }
            | Self::InvalidProjectFolder { .. }
            | Self::InconsistentState { .. }
            | Self::IndexOutOfRange { .. } => ErrorCategory::Validation,
            Self::RemovalRejected(_) => ErrorCategory::Rejected,
            Self::MissingTemplateNode { .. } => ErrorCategory::Template,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Rejected,
    Template,
}
