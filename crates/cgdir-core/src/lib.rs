//! cgdir Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the cgdir
//! production folder tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            cgdir-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ProjectService, TreeMaterializer,     │
//! │   ProjectUpdater)                       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Driven: Filesystem, Scaffold)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     cgdir-adapters (Infrastructure)     │
//! │  (LocalFilesystem, BuiltinScaffold...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ScaffoldParser, SequenceExpander,      │
//! │  ProjectStateDiffer)                    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cgdir_core::prelude::*;
//! # fn run(service: ProjectService) -> CgdirResult<()> {
//! let identity = ProjectIdentity::new(ProjectNumber::generate(), "Awesome_CG")?;
//! let state = ProjectState::new(vec![3, 2], "first delivery in May")?;
//!
//! service.setup("/mnt/projects".as_ref(), &identity, &state, false)?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ProjectService, ProjectSession, SetupReport, UpdateOutcome,
        ports::{Filesystem, ScaffoldSource},
    };
    pub use crate::domain::{
        Delta, ProjectIdentity, ProjectNumber, ProjectState, ScaffoldNode, ScaffoldParser,
    };
    pub use crate::error::{CgdirError, CgdirResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
