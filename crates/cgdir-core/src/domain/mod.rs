//! Core domain layer for cgdir.
//!
//! This module contains pure logic with no I/O. Reading outlines, listing
//! folders and creating directories all happen behind the ports defined in
//! the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable trees**: Scaffold subtrees are shared, never mutated in place
//! - **Grow-only updates**: The differ refuses anything that removes folders
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod expansion;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    project_state::{Delta, ProjectState, ProjectStateDiffer},
    scaffold::{
        BRANCH_MARKER, Children, INDENT_MARKER, NodeId, OutlineEntry, Placement, ROOT_PLACEHOLDER,
        ScaffoldBuilder, ScaffoldNode, ScaffoldParser,
    },
};

pub use error::{DomainError, ErrorCategory, RejectionReason};

pub use expansion::{SEQUENCE_ROOTS, SEQUENCES_DIR, SequenceExpander, TEMPLATE_SEQUENCE, TEMPLATE_SHOT};

pub use value_objects::{
    ProjectIdentity, ProjectNumber, SEQUENCE_PREFIX, SHOT_PREFIX, parse_sequence_index,
    parse_shot_index, sequence_name, shot_name,
};

pub use validation::DomainValidator;
