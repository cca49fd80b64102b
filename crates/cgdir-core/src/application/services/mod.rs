//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "set up a project" or "grow a project".

pub mod materializer;
pub mod project_service;
pub mod updater;

pub use materializer::{MaterializeReport, TreeMaterializer};
pub use project_service::{ProjectService, ProjectSession, SetupReport, UpdateOutcome};
pub use updater::{NOTES_FILE, ProjectUpdater, notes_path};
