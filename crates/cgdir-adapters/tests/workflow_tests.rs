//! Setup / open / update against the real adapters.

use std::path::{Path, PathBuf};

use cgdir_adapters::{BuiltinScaffold, LocalFilesystem, MemoryFilesystem};
use cgdir_core::{
    application::{ApplicationError, UpdateOutcome, notes_path},
    prelude::*,
};
use tempfile::TempDir;

fn identity(name: &str) -> ProjectIdentity {
    ProjectIdentity::new(ProjectNumber::new("24001234").unwrap(), name).unwrap()
}

fn state(shots: &[usize], notes: &str) -> ProjectState {
    ProjectState::new(shots.to_vec(), notes).unwrap()
}

fn memory_service() -> (ProjectService, MemoryFilesystem) {
    let fs = MemoryFilesystem::new();
    let service = ProjectService::new(Box::new(BuiltinScaffold), Box::new(fs.clone()));
    (service, fs)
}

#[test]
fn setup_creates_builtin_layout_in_memory() {
    let (service, fs) = memory_service();

    let report = service
        .setup(Path::new("/jobs"), &identity("Show"), &state(&[2, 1], "kickoff"), false)
        .unwrap();

    let project = PathBuf::from("/jobs/24001234_Show");
    assert_eq!(report.project_dir, project);
    for rel in [
        "work/assets/props",
        "work/sequences/seq_0001/sh_0002/lighting",
        "work/sequences/seq_0002/sh_0001/plates",
        "renders/sequences/seq_0002/sh_0001/comp",
        "delivery/final",
        "incoming",
    ] {
        assert!(fs.is_dir(&project.join(rel)), "missing {rel}");
    }
    assert!(!fs.is_dir(&project.join("work/sequences/seq_0002/sh_0002")));
    assert!(!fs.is_dir(&project.join("JOB#_ProjectName")));
    assert_eq!(fs.contents(&notes_path(&project)).as_deref(), Some("kickoff"));
}

#[test]
fn setup_with_zero_sequences_leaves_sequences_empty() {
    let (service, fs) = memory_service();
    let report = service
        .setup(Path::new("/jobs"), &identity("Empty"), &ProjectState::empty(), false)
        .unwrap();

    let sequences = report.project_dir.join("work/sequences");
    assert!(fs.is_dir(&sequences));
    assert!(fs.list_dirs(&sequences).unwrap().is_empty());
}

#[test]
fn failed_root_is_reported_and_siblings_still_created() {
    let (service, fs) = memory_service();
    fs.fail_on("/jobs/24001234_Show/renders");

    let err = service
        .setup(Path::new("/jobs"), &identity("Show"), &state(&[1], ""), false)
        .unwrap_err();

    match err {
        CgdirError::Application(ApplicationError::PartialFailure { failed }) => {
            assert_eq!(failed, [PathBuf::from("/jobs/24001234_Show/renders")]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(fs.is_dir(Path::new("/jobs/24001234_Show/work/sequences/seq_0001/sh_0001")));
    assert!(fs.is_dir(Path::new("/jobs/24001234_Show/delivery")));
}

#[test]
fn grow_in_memory_then_reopen() {
    let (service, fs) = memory_service();
    let report = service
        .setup(Path::new("/jobs"), &identity("Show"), &state(&[1, 1], ""), false)
        .unwrap();

    let mut session = service.open(&report.project_dir).unwrap();
    let outcome = service
        .update(&mut session, state(&[1, 2, 1], "notes"), |delta| {
            delta.summary().contains("seq_0002/sh_0002")
        })
        .unwrap();
    assert!(matches!(outcome, UpdateOutcome::Applied(_)));

    let project = &report.project_dir;
    assert!(fs.is_dir(&project.join("work/sequences/seq_0002/sh_0002/anim")));
    assert!(fs.is_dir(&project.join("renders/sequences/seq_0003/sh_0001/fx")));
    assert_eq!(fs.contents(&notes_path(project)).as_deref(), Some("notes"));

    let reopened = service.open(project).unwrap();
    assert_eq!(reopened.original(), &state(&[1, 2, 1], "notes"));
}

#[test]
fn full_workflow_on_disk() {
    let tmp = TempDir::new().unwrap();
    let service = ProjectService::new(Box::new(BuiltinScaffold), Box::new(LocalFilesystem::new()));

    let report = service
        .setup(tmp.path(), &identity("Disk_Test"), &state(&[1], "first"), false)
        .unwrap();
    let project = tmp.path().join("24001234_Disk_Test");
    assert_eq!(report.project_dir, project);
    assert!(project.join("work/sequences/seq_0001/sh_0001/comp").is_dir());

    // Someone deleted a standard folder by hand; the update restores it.
    std::fs::remove_dir_all(project.join("delivery")).unwrap();

    let mut session = service.open(&project).unwrap();
    assert_eq!(session.identity().name(), "Disk_Test");
    assert_eq!(session.original(), &state(&[1], "first"));

    let outcome = service
        .update(&mut session, state(&[3], "first"), |_| true)
        .unwrap();
    match outcome {
        UpdateOutcome::Applied(delta) => {
            assert!(delta.new_sequences.is_empty());
            assert_eq!(delta.new_shots.len(), 2);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(project.join("renders/sequences/seq_0001/sh_0003/lighting").is_dir());
    assert!(project.join("delivery/client").is_dir());

    // A second identical update is a no-op.
    let outcome = service
        .update(&mut session, state(&[3], "first"), |_| true)
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::NoChanges);
}

#[test]
fn shrinking_on_disk_is_rejected_and_nothing_changes() {
    let tmp = TempDir::new().unwrap();
    let service = ProjectService::new(Box::new(BuiltinScaffold), Box::new(LocalFilesystem::new()));
    let report = service
        .setup(tmp.path(), &identity("Keep"), &state(&[2, 2], "n"), false)
        .unwrap();

    let mut session = service.open(&report.project_dir).unwrap();
    let err = service
        .update(&mut session, state(&[2], "changed"), |_| true)
        .unwrap_err();

    assert!(err.is_rejection());
    let notes = std::fs::read_to_string(notes_path(&report.project_dir)).unwrap();
    assert_eq!(notes, "n");
    assert!(report.project_dir.join("work/sequences/seq_0002").is_dir());
}

#[test]
fn existing_project_needs_overwrite() {
    let tmp = TempDir::new().unwrap();
    let service = ProjectService::new(Box::new(BuiltinScaffold), Box::new(LocalFilesystem::new()));
    service
        .setup(tmp.path(), &identity("Twice"), &state(&[1], "a"), false)
        .unwrap();

    let err = service
        .setup(tmp.path(), &identity("Twice"), &state(&[1], "b"), false)
        .unwrap_err();
    assert!(matches!(
        err,
        CgdirError::Application(ApplicationError::ProjectExists { .. })
    ));

    service
        .setup(tmp.path(), &identity("Twice"), &state(&[1], "b"), true)
        .unwrap();
    let notes = std::fs::read_to_string(notes_path(&tmp.path().join("24001234_Twice"))).unwrap();
    assert_eq!(notes, "b");
}
