//! Root-directory preference file.
//!
//! A single line of text holding the folder all projects are created under.
//! Read once at startup; a missing or blank file means "root not set".

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use cgdir_core::{
    application::ApplicationError,
    error::{CgdirError, CgdirResult},
};

/// The stored root directory.
pub struct RootPreference;

impl RootPreference {
    /// Read the root from `path`. `Ok(None)` if the file is missing or its
    /// first line is blank.
    pub fn load(path: &Path) -> CgdirResult<Option<PathBuf>> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No preferences file");
                return Ok(None);
            }
            Err(e) => return Err(io_error(path, e)),
        };

        let root = text.lines().next().map(str::trim).unwrap_or_default();
        if root.is_empty() {
            return Ok(None);
        }
        Ok(Some(PathBuf::from(root)))
    }

    /// Store `root` in `path`, replacing any previous value.
    pub fn save(path: &Path, root: &Path) -> CgdirResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        std::fs::write(path, format!("{}\n", root.display())).map_err(|e| io_error(path, e))?;
        info!(path = %path.display(), root = %root.display(), "Root directory saved");
        Ok(())
    }
}

fn io_error(path: &Path, e: std::io::Error) -> CgdirError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_means_unset() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(RootPreference::load(&tmp.path().join("preferences.txt")).unwrap(), None);
    }

    #[test]
    fn blank_file_means_unset() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("preferences.txt");
        std::fs::write(&path, "   \n").unwrap();
        assert_eq!(RootPreference::load(&path).unwrap(), None);
    }

    #[test]
    fn save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/preferences.txt");

        RootPreference::save(&path, Path::new("/mnt/projects")).unwrap();

        assert_eq!(
            RootPreference::load(&path).unwrap(),
            Some(PathBuf::from("/mnt/projects"))
        );
    }

    #[test]
    fn only_first_line_counts() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("preferences.txt");
        std::fs::write(&path, "  /jobs  \n/ignored\n").unwrap();
        assert_eq!(RootPreference::load(&path).unwrap(), Some(PathBuf::from("/jobs")));
    }
}
