pub mod project_state;
pub mod scaffold;

pub use crate::domain::DomainError;
pub use project_state::{Delta, ProjectState, ProjectStateDiffer};
pub use scaffold::{ScaffoldBuilder, ScaffoldNode, ScaffoldParser};
