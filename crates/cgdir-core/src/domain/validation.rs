use crate::domain::{
    entities::{ProjectState, ScaffoldNode},
    error::DomainError,
    expansion::SequenceExpander,
    value_objects::{MAX_INDEX, ProjectIdentity, ProjectNumber},
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    /// Identities are validated at construction; re-checked here so that
    /// values that went through serde get the same guarantees.
    pub fn validate_identity(identity: &ProjectIdentity) -> Result<(), DomainError> {
        let number = ProjectNumber::new(identity.number().as_str())?;
        ProjectIdentity::new(number, identity.name()).map(|_| ())
    }

    pub fn validate_state(state: &ProjectState) -> Result<(), DomainError> {
        if state.shot_counts().len() != state.sequence_count() {
            return Err(DomainError::InconsistentState {
                sequence_count: state.sequence_count(),
                shot_entries: state.shot_counts().len(),
            });
        }
        if state.sequence_count() > MAX_INDEX {
            return Err(DomainError::IndexOutOfRange {
                kind: "sequence",
                index: state.sequence_count(),
                max: MAX_INDEX,
            });
        }
        Ok(())
    }

    /// A template is usable once both roots carry the literal template shot.
    pub fn validate_template(template: &ScaffoldNode) -> Result<SequenceExpander, DomainError> {
        SequenceExpander::from_template(template)
    }
}
