//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `cgdir-adapters` crate provides implementations.

use std::path::Path;

use crate::error::CgdirResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `cgdir_adapters::filesystem::LocalFilesystem` (production)
/// - `cgdir_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `create_dir_all` must treat an existing directory as success
/// - Nothing here deletes; the tool only ever grows a project
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CgdirResult<()>;

    /// Write content to a file, replacing anything already there.
    fn write_file(&self, path: &Path, content: &str) -> CgdirResult<()>;

    /// Read a file, `None` if it does not exist.
    fn read_file(&self, path: &Path) -> CgdirResult<Option<String>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Names of the immediate subdirectories of `path`, sorted. Empty if
    /// `path` does not exist.
    fn list_dirs(&self, path: &Path) -> CgdirResult<Vec<String>>;
}

/// Port for the scaffold outline text.
///
/// Implemented by:
/// - `cgdir_adapters::scaffold_source::BuiltinScaffold` (embedded outline)
/// - `cgdir_adapters::scaffold_source::FileScaffold` (user outline on disk)
pub trait ScaffoldSource: Send + Sync {
    /// Load the raw outline text.
    fn load(&self) -> CgdirResult<String>;

    /// Human-readable origin, for logs and errors.
    fn describe(&self) -> String;
}
