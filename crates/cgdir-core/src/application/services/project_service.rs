//! Project Service - main application orchestrator.
//!
//! This service coordinates the three workflows of the tool:
//! 1. Setup: parse scaffold, expand sequences, materialize, write notes
//! 2. Open: re-derive identity and state from an existing project folder
//! 3. Update: diff, confirm, apply the delta, restore the base scaffold
//!
//! It implements the driving side and uses the driven ports.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ScaffoldSource},
    },
    domain::{
        Delta, DomainError, DomainValidator as validator, ProjectIdentity, ProjectState,
        ProjectStateDiffer, ROOT_PLACEHOLDER, SEQUENCES_DIR, ScaffoldNode, ScaffoldParser,
        parse_sequence_index, parse_shot_index,
    },
    error::{CgdirError, CgdirResult},
};

use super::{
    materializer::TreeMaterializer,
    updater::{ProjectUpdater, notes_path},
};

/// Root whose `sequences` folder is the source of truth when re-opening.
const STATE_ROOT: &str = "work";

/// An opened project: where it lives, who it is, and the last known-good
/// state that updates are diffed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSession {
    project_dir: PathBuf,
    identity: ProjectIdentity,
    original: ProjectState,
}

impl ProjectSession {
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn identity(&self) -> &ProjectIdentity {
        &self.identity
    }

    /// State captured on open, or the last successfully applied state.
    pub fn original(&self) -> &ProjectState {
        &self.original
    }
}

/// Result of a successful setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupReport {
    pub project_dir: PathBuf,
    pub directories: usize,
}

/// How an update attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Requested state equals the original; nothing was written.
    NoChanges,
    /// The confirmation callback declined; nothing was written.
    Declined(Delta),
    /// The delta was written and the session now holds the requested state.
    Applied(Delta),
}

/// Main project service.
pub struct ProjectService {
    source: Box<dyn ScaffoldSource>,
    filesystem: Box<dyn Filesystem>,
}

impl ProjectService {
    /// Create a new project service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use cgdir_core::application::{Filesystem, ProjectService, ScaffoldSource};
    ///
    /// # fn wire(source: Box<dyn ScaffoldSource>, filesystem: Box<dyn Filesystem>) {
    /// let service = ProjectService::new(source, filesystem);
    /// # }
    /// ```
    pub fn new(source: Box<dyn ScaffoldSource>, filesystem: Box<dyn Filesystem>) -> Self {
        Self { source, filesystem }
    }

    /// Describe where the scaffold outline comes from.
    pub fn scaffold_origin(&self) -> String {
        self.source.describe()
    }

    /// Parse the scaffold outline, without the `JOB#_ProjectName` line.
    pub fn load_template(&self) -> CgdirResult<ScaffoldNode> {
        let text = self.source.load()?;
        let mut tree = ScaffoldParser::parse(&text);
        if tree.remove_child(ROOT_PLACEHOLDER).is_some() {
            debug!("Stripped root placeholder from outline");
        }
        debug!(
            origin = %self.source.describe(),
            directories = tree.directory_count(),
            "Scaffold loaded"
        );
        Ok(tree)
    }

    /// Full tree a setup with `state` would create, relative to the project
    /// folder. Touches nothing on disk.
    pub fn plan_setup(&self, state: &ProjectState) -> CgdirResult<ScaffoldNode> {
        validator::validate_state(state)?;
        let template = self.load_template()?;
        let expander = validator::validate_template(&template)?;
        Ok(expander.expand(template, state.shot_counts())?)
    }

    /// Create a new project under `root`.
    ///
    /// Refuses an existing project folder unless `overwrite` is set, in which
    /// case missing folders are added and the notes file is replaced.
    #[instrument(
        skip_all,
        fields(
            project = %identity,
            root = %root.display(),
            sequences = state.sequence_count()
        )
    )]
    pub fn setup(
        &self,
        root: &Path,
        identity: &ProjectIdentity,
        state: &ProjectState,
        overwrite: bool,
    ) -> CgdirResult<SetupReport> {
        validator::validate_identity(identity)?;

        let project_dir = root.join(identity.folder_name());
        if self.filesystem.exists(&project_dir) {
            if !overwrite {
                return Err(ApplicationError::ProjectExists { path: project_dir }.into());
            }
            warn!(path = %project_dir.display(), "Project exists, overwriting");
        }

        // Everything that can be rejected is checked before the first write.
        let tree = self.plan_setup(state)?;

        self.filesystem
            .create_dir_all(&project_dir)
            .map_err(|e| ApplicationError::FilesystemError {
                path: project_dir.clone(),
                reason: e.to_string(),
            })?;

        let report = TreeMaterializer::new(self.filesystem.as_ref()).materialize(&project_dir, &tree);
        let mut failed = report.failures;
        ProjectUpdater::new(self.filesystem.as_ref()).write_notes(&project_dir, state.notes(), &mut failed);

        if !failed.is_empty() {
            warn!(failed = failed.len(), "Setup finished with failures");
            return Err(ApplicationError::PartialFailure { failed }.into());
        }

        info!(directories = report.directories, "Project created");
        Ok(SetupReport {
            project_dir,
            directories: report.directories,
        })
    }

    /// Open an existing project folder and capture its current state.
    #[instrument(skip_all, fields(project = %project_dir.display()))]
    pub fn open(&self, project_dir: &Path) -> CgdirResult<ProjectSession> {
        if !self.filesystem.exists(project_dir) {
            return Err(ApplicationError::ProjectNotFound {
                path: project_dir.to_path_buf(),
            }
            .into());
        }

        let folder = project_dir
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| DomainError::InvalidProjectFolder {
                name: project_dir.display().to_string(),
            })?;
        let identity = ProjectIdentity::from_folder_name(folder)?;

        let sequences_dir = project_dir.join(STATE_ROOT).join(SEQUENCES_DIR);
        let sequences: Vec<String> = self
            .filesystem
            .list_dirs(&sequences_dir)?
            .into_iter()
            .filter(|name| parse_sequence_index(name).is_some())
            .collect();

        let mut shot_counts = Vec::with_capacity(sequences.len());
        for sequence in &sequences {
            let shots = self
                .filesystem
                .list_dirs(&sequences_dir.join(sequence))?
                .iter()
                .filter(|name| parse_shot_index(name).is_some())
                .count();
            shot_counts.push(shots);
        }

        let notes = self
            .filesystem
            .read_file(&notes_path(project_dir))?
            .unwrap_or_default();

        let original = ProjectState::new(shot_counts, notes)?;
        info!(
            sequences = original.sequence_count(),
            shots = original.total_shots(),
            "Project opened"
        );

        Ok(ProjectSession {
            project_dir: project_dir.to_path_buf(),
            identity,
            original,
        })
    }

    /// Delta an update to `requested` would apply. Rejections surface as
    /// [`DomainError::RemovalRejected`].
    pub fn plan_update(&self, session: &ProjectSession, requested: &ProjectState) -> CgdirResult<Delta> {
        validator::validate_state(requested)?;
        let delta = ProjectStateDiffer::diff(&session.original, requested).map_err(DomainError::from)?;
        Ok(delta)
    }

    /// Grow an opened project to `requested`.
    ///
    /// `confirm` sees the delta before anything is written. After the delta
    /// is applied the base scaffold is re-materialized so missing standard
    /// folders come back. On any error the session keeps its original state.
    #[instrument(skip_all, fields(project = %session.identity))]
    pub fn update<F>(
        &self,
        session: &mut ProjectSession,
        requested: ProjectState,
        confirm: F,
    ) -> CgdirResult<UpdateOutcome>
    where
        F: FnOnce(&Delta) -> bool,
    {
        let delta = self.plan_update(session, &requested)?;

        if delta.is_empty() {
            info!("No changes requested");
            return Ok(UpdateOutcome::NoChanges);
        }

        if !confirm(&delta) {
            info!("Update declined");
            return Ok(UpdateOutcome::Declined(delta));
        }

        let template = self.load_template()?;
        let expander = validator::validate_template(&template)?;
        let base = expander.base_tree(template)?;

        let fs = self.filesystem.as_ref();
        let mut failed = match ProjectUpdater::new(fs)
            .with_expander(&expander)
            .apply(&session.project_dir, &delta, &requested)
        {
            Ok(()) => Vec::new(),
            Err(CgdirError::Application(ApplicationError::PartialFailure { failed })) => failed,
            Err(e) => return Err(e),
        };

        let repair = TreeMaterializer::new(fs).materialize(&session.project_dir, &base);
        failed.extend(repair.failures);

        if !failed.is_empty() {
            return Err(ApplicationError::PartialFailure { failed }.into());
        }

        session.original = requested;
        info!("Project updated");
        Ok(UpdateOutcome::Applied(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use std::sync::{Arc, Mutex};

    const OUTLINE: &str = "\
JOB#_ProjectName
-- work
|  -- production
|  |  -- docs
|  -- sequences
|  |  -- seq_0001
|  |  |  -- sh_0001
|  |  |  |  -- comp
-- renders
|  -- sequences
|  |  -- seq_0001
|  |  |  -- sh_0001
";

    struct Outline(&'static str);

    impl ScaffoldSource for Outline {
        fn load(&self) -> CgdirResult<String> {
            Ok(self.0.to_string())
        }

        fn describe(&self) -> String {
            "test outline".into()
        }
    }

    fn service(fs: MockFilesystem) -> ProjectService {
        ProjectService::new(Box::new(Outline(OUTLINE)), Box::new(fs))
    }

    fn identity() -> ProjectIdentity {
        ProjectIdentity::from_folder_name("12345678_Show").unwrap()
    }

    fn state(shots: &[usize], notes: &str) -> ProjectState {
        ProjectState::new(shots.to_vec(), notes).unwrap()
    }

    /// A filesystem mock for an opened project with `[2, 1]` shots and
    /// notes "n". No writes are allowed.
    fn existing_project_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_list_dirs().returning(|path| {
            Ok(match path.file_name().and_then(|n| n.to_str()) {
                Some("sequences") => vec!["seq_0001".into(), "seq_0002".into(), "_old".into()],
                Some("seq_0001") => vec!["sh_0001".into(), "sh_0002".into()],
                Some("seq_0002") => vec!["sh_0001".into()],
                _ => Vec::new(),
            })
        });
        fs.expect_read_file().returning(|_| Ok(Some("n".into())));
        fs
    }

    #[test]
    fn template_loses_the_placeholder() {
        let tree = service(MockFilesystem::new()).load_template().unwrap();
        assert!(tree.child(ROOT_PLACEHOLDER).is_none());
        assert!(tree.child("work").is_some());
    }

    #[test]
    fn plan_contains_only_synthesized_sequences() {
        let tree = service(MockFilesystem::new()).plan_setup(&state(&[2], "")).unwrap();
        assert!(tree.get(&["work", "sequences", "seq_0001", "sh_0002", "comp"]).is_some());
        assert!(tree.get(&["renders", "sequences", "seq_0001", "sh_0002"]).is_some());

        let empty = service(MockFilesystem::new()).plan_setup(&ProjectState::empty()).unwrap();
        assert!(empty.get(&["work", "sequences"]).unwrap().is_leaf());
    }

    #[test]
    fn setup_creates_tree_and_notes() {
        let dirs: Arc<Mutex<Vec<PathBuf>>> = Arc::default();
        let log = Arc::clone(&dirs);

        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(move |p| {
            log.lock().unwrap().push(p.to_path_buf());
            Ok(())
        });
        fs.expect_write_file()
            .withf(|path, content| path.ends_with("docs/project_notes.txt") && content == "hello")
            .times(1)
            .returning(|_, _| Ok(()));

        let report = service(fs)
            .setup(Path::new("/root"), &identity(), &state(&[1], "hello"), false)
            .unwrap();

        assert_eq!(report.project_dir, PathBuf::from("/root/12345678_Show"));
        let dirs = dirs.lock().unwrap();
        assert!(dirs.contains(&PathBuf::from("/root/12345678_Show/work/sequences/seq_0001/sh_0001/comp")));
        assert!(!dirs.iter().any(|p| p.to_string_lossy().contains(ROOT_PLACEHOLDER)));
    }

    #[test]
    fn setup_refuses_existing_project() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let err = service(fs)
            .setup(Path::new("/root"), &identity(), &state(&[1], ""), false)
            .unwrap_err();
        assert!(matches!(
            err,
            CgdirError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn setup_reports_partial_failure() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|p| {
            if p.ends_with("renders") {
                Err(ApplicationError::FilesystemError {
                    path: p.to_path_buf(),
                    reason: "disk full".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });
        fs.expect_write_file().returning(|_, _| Ok(()));

        let err = service(fs)
            .setup(Path::new("/root"), &identity(), &state(&[1], ""), false)
            .unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn open_counts_sequences_and_shots() {
        let session = service(existing_project_fs())
            .open(Path::new("/root/12345678_Show"))
            .unwrap();

        assert_eq!(session.identity().name(), "Show");
        assert_eq!(session.original(), &state(&[2, 1], "n"));
    }

    #[test]
    fn open_missing_notes_defaults_to_empty() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_list_dirs().returning(|_| Ok(Vec::new()));
        fs.expect_read_file().returning(|_| Ok(None));

        let session = service(fs).open(Path::new("/root/1_Empty")).unwrap();
        assert_eq!(session.original(), &ProjectState::empty());
    }

    #[test]
    fn open_rejects_folder_without_underscore() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);

        let err = service(fs).open(Path::new("/root/scratch")).unwrap_err();
        assert!(matches!(
            err,
            CgdirError::Domain(DomainError::InvalidProjectFolder { .. })
        ));
    }

    #[test]
    fn removal_is_rejected_without_writes_and_state_is_kept() {
        let mut fs = existing_project_fs();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();
        let service = service(fs);

        let mut session = service.open(Path::new("/root/12345678_Show")).unwrap();
        let before = session.original().clone();

        let err = service
            .update(&mut session, state(&[1, 1], "changed"), |_| true)
            .unwrap_err();

        assert!(err.is_rejection());
        assert_eq!(session.original(), &before);
    }

    #[test]
    fn unchanged_state_is_a_no_op() {
        let mut fs = existing_project_fs();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();
        let service = service(fs);

        let mut session = service.open(Path::new("/root/12345678_Show")).unwrap();
        let outcome = service
            .update(&mut session, state(&[2, 1], "n"), |_| panic!("must not ask"))
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::NoChanges);
    }

    #[test]
    fn declined_update_writes_nothing() {
        let mut fs = existing_project_fs();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();
        let service = service(fs);

        let mut session = service.open(Path::new("/root/12345678_Show")).unwrap();
        let outcome = service
            .update(&mut session, state(&[2, 1, 1], "n"), |_| false)
            .unwrap();

        assert!(matches!(outcome, UpdateOutcome::Declined(_)));
        assert_eq!(session.original(), &state(&[2, 1], "n"));
    }

    #[test]
    fn applied_update_supersedes_original_state() {
        let dirs: Arc<Mutex<Vec<PathBuf>>> = Arc::default();
        let log = Arc::clone(&dirs);

        let mut fs = existing_project_fs();
        fs.expect_create_dir_all().returning(move |p| {
            log.lock().unwrap().push(p.to_path_buf());
            Ok(())
        });
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));
        let service = service(fs);

        let mut session = service.open(Path::new("/root/12345678_Show")).unwrap();
        let requested = state(&[2, 2, 1], "more");
        let outcome = service
            .update(&mut session, requested.clone(), |delta| {
                delta.new_sequences == ["seq_0003"] && delta.notes_changed
            })
            .unwrap();

        assert!(matches!(outcome, UpdateOutcome::Applied(_)));
        assert_eq!(session.original(), &requested);

        let dirs = dirs.lock().unwrap();
        let project = Path::new("/root/12345678_Show");
        assert!(dirs.contains(&project.join("work/sequences/seq_0002/sh_0002/comp")));
        assert!(dirs.contains(&project.join("renders/sequences/seq_0003/sh_0001")));
        // base scaffold is restored on every update
        assert!(dirs.contains(&project.join("work/production/docs")));
    }
}
