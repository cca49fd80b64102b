//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use cgdir_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{CgdirError, CgdirResult},
};
use tracing::trace;
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> CgdirResult<()> {
        trace!(path = %path.display(), "create_dir_all");
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> CgdirResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_file(&self, path: &Path) -> CgdirResult<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(path, e, "read file")),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dirs(&self, path: &Path) -> CgdirResult<Vec<String>> {
        if !path.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(path).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let reason = e.to_string();
                CgdirError::from(ApplicationError::FilesystemError {
                    path: e.path().unwrap_or(path).to_path_buf(),
                    reason: format!("Failed to list directory: {}", reason),
                })
            })?;
            if entry.file_type().is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> CgdirError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_dir_all_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = tmp.path().join("a/b/c");

        fs.create_dir_all(&path).unwrap();
        fs.create_dir_all(&path).unwrap();

        assert!(path.is_dir());
    }

    #[test]
    fn missing_file_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        assert_eq!(fs.read_file(&tmp.path().join("nope.txt")).unwrap(), None);

        let file = tmp.path().join("notes.txt");
        fs.write_file(&file, "hi").unwrap();
        assert_eq!(fs.read_file(&file).unwrap().as_deref(), Some("hi"));
    }

    #[test]
    fn lists_only_immediate_directories_sorted() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        fs.create_dir_all(&tmp.path().join("seq_0002/sh_0001")).unwrap();
        fs.create_dir_all(&tmp.path().join("seq_0001")).unwrap();
        fs.write_file(&tmp.path().join("readme.txt"), "").unwrap();

        assert_eq!(fs.list_dirs(tmp.path()).unwrap(), ["seq_0001", "seq_0002"]);
        assert!(fs.list_dirs(&tmp.path().join("missing")).unwrap().is_empty());
    }
}
