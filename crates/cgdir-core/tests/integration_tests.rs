//! Integration tests for cgdir-core's public API.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::Mutex,
};

use cgdir_core::{
    application::{TreeMaterializer, UpdateOutcome},
    domain::{ProjectStateDiffer, RejectionReason, parse_sequence_index, sequence_name},
    prelude::*,
};

const OUTLINE: &str = "\
JOB#_ProjectName
-- work
|  -- production
|  |  -- docs
|  -- sequences
|  |  -- seq_0001
|  |  |  -- sh_0001
|  |  |  |  -- anim
-- renders
|  -- sequences
|  |  -- seq_0001
|  |  |  -- sh_0001
";

struct Outline;

impl ScaffoldSource for Outline {
    fn load(&self) -> CgdirResult<String> {
        Ok(OUTLINE.to_string())
    }

    fn describe(&self) -> String {
        "inline".into()
    }
}

#[derive(Default)]
struct Disk {
    dirs: Mutex<BTreeSet<PathBuf>>,
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl Filesystem for Disk {
    fn create_dir_all(&self, path: &Path) -> CgdirResult<()> {
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> CgdirResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> CgdirResult<Option<String>> {
        Ok(self.files.lock().unwrap().get(path).cloned())
    }

    fn exists(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path) || self.files.lock().unwrap().contains_key(path)
    }

    fn list_dirs(&self, path: &Path) -> CgdirResult<Vec<String>> {
        Ok(self
            .dirs
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name()?.to_str().map(String::from))
            .collect())
    }
}

#[test]
fn scaffold_parse_example() {
    let tree = ScaffoldParser::parse("-- A\n|  -- B\n|  |  -- C");
    let names: Vec<_> = tree.child_names().collect();
    assert_eq!(names, ["A"]);
    assert!(tree.get(&["A", "B", "C"]).unwrap().is_leaf());
    assert_eq!(tree.child("A").unwrap().child_count(), 1);
}

#[test]
fn delta_completeness_example() {
    let original = ProjectState::new(vec![1, 1], "").unwrap();
    let requested = ProjectState::new(vec![1, 2, 1], "").unwrap();

    let delta = ProjectStateDiffer::diff(&original, &requested).unwrap();

    assert_eq!(delta.new_sequences, ["seq_0003"]);
    assert_eq!(delta.new_shots, [("seq_0002".to_string(), "sh_0002".to_string())]);
}

#[test]
fn every_sequence_name_round_trips() {
    for i in 1..=9999 {
        assert_eq!(parse_sequence_index(&sequence_name(i)), Some(i));
    }
}

#[test]
fn materializing_twice_equals_once() {
    let disk = Disk::default();
    let tree = ScaffoldParser::parse(OUTLINE);

    TreeMaterializer::new(&disk).materialize(Path::new("/p"), &tree);
    let once = disk.dirs.lock().unwrap().clone();
    TreeMaterializer::new(&disk).materialize(Path::new("/p"), &tree);

    assert_eq!(*disk.dirs.lock().unwrap(), once);
}

#[test]
fn setup_then_grow_then_reject_shrink() {
    let service = ProjectService::new(Box::new(Outline), Box::new(Disk::default()));
    let identity = ProjectIdentity::new(ProjectNumber::new("100").unwrap(), "Demo").unwrap();

    let report = service
        .setup(
            Path::new("/jobs"),
            &identity,
            &ProjectState::new(vec![1], "v1").unwrap(),
            false,
        )
        .unwrap();

    let mut session = service.open(&report.project_dir).unwrap();
    assert_eq!(session.original(), &ProjectState::new(vec![1], "v1").unwrap());

    let grown = ProjectState::new(vec![2, 1], "v2").unwrap();
    let outcome = service.update(&mut session, grown.clone(), |_| true).unwrap();
    assert!(matches!(outcome, UpdateOutcome::Applied(_)));

    let reopened = service.open(&report.project_dir).unwrap();
    assert_eq!(reopened.original(), &grown);

    let err = service
        .update(&mut session, ProjectState::new(vec![1, 1], "v2").unwrap(), |_| true)
        .unwrap_err();
    assert!(err.is_rejection());
    assert!(matches!(
        err,
        CgdirError::Domain(cgdir_core::domain::DomainError::RemovalRejected(
            RejectionReason::ShotRemoval { .. }
        ))
    ));
    assert_eq!(session.original(), &grown);
}
