//! Tree materializer - turns a scaffold tree into directories.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::application::ports::Filesystem;
use crate::domain::ScaffoldNode;

/// Outcome of one materialization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Directories that exist after the pass (created or already there).
    pub directories: usize,
    /// Paths whose creation failed. Their subtrees were skipped.
    pub failures: Vec<PathBuf>,
}

impl MaterializeReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fold another report into this one.
    pub fn absorb(&mut self, other: MaterializeReport) {
        self.directories += other.directories;
        self.failures.extend(other.failures);
    }
}

/// Creates one directory per node below a base path.
///
/// Creation is idempotent, so running the same tree twice leaves the disk
/// exactly as one run does. A failed directory is logged and recorded; its
/// siblings are still attempted but its own children are not.
pub struct TreeMaterializer<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> TreeMaterializer<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Create every descendant of `node` under `base`. `node` itself maps to
    /// `base` and is not created here.
    pub fn materialize(&self, base: &Path, node: &ScaffoldNode) -> MaterializeReport {
        let mut report = MaterializeReport::default();
        self.walk(base, node, &mut report);
        report
    }

    fn walk(&self, base: &Path, node: &ScaffoldNode, report: &mut MaterializeReport) {
        for child in node.children() {
            let path = base.join(child.name());
            match self.fs.create_dir_all(&path) {
                Ok(()) => {
                    debug!(path = %path.display(), "Directory ready");
                    report.directories += 1;
                    self.walk(&path, child, report);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to create directory");
                    report.failures.push(path);
                }
            }
        }
    }
}
