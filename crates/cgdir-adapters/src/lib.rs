//! Infrastructure adapters for cgdir.
//!
//! This crate implements the ports defined in `cgdir-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod preferences;
pub mod scaffold_source;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use preferences::RootPreference;
pub use scaffold_source::{BuiltinScaffold, FileScaffold, scaffold_source};
