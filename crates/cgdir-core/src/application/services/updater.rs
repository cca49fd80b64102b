//! Project updater - applies an accepted delta to disk.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ports::Filesystem};
use crate::domain::{
    Delta, ProjectState, SEQUENCE_ROOTS, SEQUENCES_DIR, SequenceExpander, parse_sequence_index,
    shot_name,
};
use crate::error::CgdirResult;

use super::materializer::TreeMaterializer;

/// Notes file location relative to the project folder.
pub const NOTES_FILE: [&str; 4] = ["work", "production", "docs", "project_notes.txt"];

/// Absolute notes file path for a project folder.
pub fn notes_path(project_dir: &Path) -> PathBuf {
    NOTES_FILE.iter().fold(project_dir.to_path_buf(), |path, part| path.join(part))
}

/// Creates the folders a [`Delta`] adds and rewrites the notes file.
///
/// With an expander, every new shot is filled with its root's template shot
/// contents, so updated projects look the same as freshly set up ones.
pub struct ProjectUpdater<'a> {
    fs: &'a dyn Filesystem,
    expander: Option<&'a SequenceExpander>,
}

impl<'a> ProjectUpdater<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs, expander: None }
    }

    pub fn with_expander(mut self, expander: &'a SequenceExpander) -> Self {
        self.expander = Some(expander);
        self
    }

    /// Apply `delta` under `project_dir`.
    ///
    /// Every path is attempted. Failures are logged and returned together as
    /// [`ApplicationError::PartialFailure`]; nothing already created is
    /// removed.
    #[instrument(skip_all, fields(project = %project_dir.display()))]
    pub fn apply(&self, project_dir: &Path, delta: &Delta, requested: &ProjectState) -> CgdirResult<()> {
        let mut failed = Vec::new();

        for root in SEQUENCE_ROOTS {
            let sequences = project_dir.join(root).join(SEQUENCES_DIR);

            for sequence in &delta.new_sequences {
                let shots = parse_sequence_index(sequence)
                    .and_then(|index| index.checked_sub(1))
                    .and_then(|index| requested.shot_count(index))
                    .unwrap_or(0);
                let sequence_dir = sequences.join(sequence);

                if !self.create(&sequence_dir, &mut failed) {
                    continue;
                }
                for shot in 1..=shots {
                    self.create_shot(root, &sequence_dir, &shot_name(shot), &mut failed);
                }
            }

            for (sequence, shot) in &delta.new_shots {
                self.create_shot(root, &sequences.join(sequence), shot, &mut failed);
            }
        }

        if delta.notes_changed {
            self.write_notes(project_dir, requested.notes(), &mut failed);
        }

        if failed.is_empty() {
            info!(
                sequences = delta.new_sequences.len(),
                shots = delta.new_shots.len(),
                notes = delta.notes_changed,
                "Delta applied"
            );
            Ok(())
        } else {
            warn!(failed = failed.len(), "Delta applied with failures");
            Err(ApplicationError::PartialFailure { failed }.into())
        }
    }

    /// Write the notes file, creating its parent first.
    pub(crate) fn write_notes(&self, project_dir: &Path, notes: &str, failed: &mut Vec<PathBuf>) {
        let path = notes_path(project_dir);
        if let Some(parent) = path.parent() {
            if !self.create(parent, failed) {
                return;
            }
        }
        match self.fs.write_file(&path, notes) {
            Ok(()) => debug!(path = %path.display(), "Notes written"),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to write notes");
                failed.push(path);
            }
        }
    }

    fn create_shot(&self, root: &str, sequence_dir: &Path, shot: &str, failed: &mut Vec<PathBuf>) {
        let shot_dir = sequence_dir.join(shot);
        if !self.create(&shot_dir, failed) {
            return;
        }
        if let Some(node) = self.expander.and_then(|e| e.shot_node(root, shot)) {
            let report = TreeMaterializer::new(self.fs).materialize(&shot_dir, &node);
            failed.extend(report.failures);
        }
    }

    fn create(&self, path: &Path, failed: &mut Vec<PathBuf>) -> bool {
        match self.fs.create_dir_all(path) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to create directory");
                failed.push(path.to_path_buf());
                false
            }
        }
    }
}
