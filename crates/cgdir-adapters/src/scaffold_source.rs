//! Scaffold outline sources.
//!
//! The outline format is one folder per line, `|  ` once per nesting level
//! and `-- ` before the name:
//!
//! ```text
//! JOB#_ProjectName
//! -- work
//! |  -- sequences
//! |  |  -- seq_0001
//! |  |  |  -- sh_0001
//! ```
//!
//! The first line is the project-folder placeholder and is dropped by the
//! service before anything is created.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use cgdir_core::{
    application::{ApplicationError, ports::ScaffoldSource},
    error::CgdirResult,
};

/// Outline compiled into the binary.
pub const BUILTIN_OUTLINE: &str = include_str!("../templates/directory_scaffold.txt");

/// The outline that ships with cgdir.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinScaffold;

impl ScaffoldSource for BuiltinScaffold {
    fn load(&self) -> CgdirResult<String> {
        Ok(BUILTIN_OUTLINE.to_string())
    }

    fn describe(&self) -> String {
        "built-in outline".into()
    }
}

/// A user-supplied outline file, read on every load.
#[derive(Debug, Clone)]
pub struct FileScaffold {
    path: PathBuf,
}

impl FileScaffold {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScaffoldSource for FileScaffold {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> CgdirResult<String> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            ApplicationError::ScaffoldUnavailable {
                source_name: self.describe(),
                reason: e.to_string(),
            }
        })?;
        debug!(bytes = text.len(), "Outline read");
        Ok(text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Pick the source for an optional configured outline path.
pub fn scaffold_source(custom: Option<&Path>) -> Box<dyn ScaffoldSource> {
    match custom {
        Some(path) => Box::new(FileScaffold::new(path)),
        None => Box::new(BuiltinScaffold),
    }
}
