//! Implementation of the `cgdir new` command.
//!
//! Responsibility: translate CLI arguments into a project identity and
//! layout, call the core project service, and display results. No business
//! logic lives here.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use cgdir_core::{
    application::ApplicationError,
    domain::{ProjectIdentity, ProjectNumber, ProjectState},
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

use super::{build_service, confirm, read_notes, require_root, shot_counts};

/// JSON view of a created (or planned) project.
#[derive(Debug, Serialize)]
struct NewProjectDto {
    project: String,
    path: PathBuf,
    shots: Vec<usize>,
    dry_run: bool,
    directories: Vec<PathBuf>,
}

/// Execute the `cgdir new` command.
///
/// Dispatch sequence:
/// 1. Resolve root, identity, layout and notes
/// 2. Early-exit with the planned tree if `--dry-run`
/// 3. Refuse an existing project folder unless `--force`
/// 4. Confirm with user unless `--yes` or `--quiet`
/// 5. Create the project via `ProjectService::setup`
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Inputs
    let root = require_root(&config)?.to_path_buf();
    let identity = build_identity(&args)?;
    let counts = shot_counts(&args.layout, &[], config.projects.default_shots)?;
    let notes = read_notes(&args.layout)?.unwrap_or_default();
    let state = ProjectState::new(counts, notes)
        .map_err(|e| CliError::Core(e.into()))?;

    let project_dir = root.join(identity.folder_name());
    let service = build_service(&config);

    debug!(
        folder = %identity,
        sequences = state.sequence_count(),
        shots = state.total_shots(),
        "Project resolved"
    );

    // 2. Dry run: describe but do not write.
    if args.dry_run {
        let tree = service.plan_setup(&state)?;
        let directories = tree.relative_paths();

        if output.is_json() {
            output.json(&NewProjectDto {
                project: identity.to_string(),
                path: project_dir,
                shots: state.shot_counts().to_vec(),
                dry_run: true,
                directories,
            })?;
            return Ok(());
        }

        output.info(&format!(
            "Dry run: would create {} folders in {}",
            directories.len(),
            project_dir.display(),
        ))?;
        for dir in &directories {
            output.print(&format!("  {}", dir.display()))?;
        }
        return Ok(());
    }

    // 3. Refuse an existing folder before asking anything
    if project_dir.exists() && !args.force {
        return Err(CliError::Core(
            ApplicationError::ProjectExists { path: project_dir }.into(),
        ));
    }

    // 4. Show configuration and confirm
    if !global.quiet && !args.yes && !output.is_json() {
        show_configuration(&identity, &state, &project_dir, &output)?;
        if !confirm("Create this project?")? {
            return Err(CliError::Cancelled);
        }
    }

    // 5. Create
    if !output.is_json() {
        output.header(&format!("Creating '{identity}'..."))?;
    }
    info!(path = %project_dir.display(), "Setup started");

    let report = service.setup(&root, &identity, &state, args.force)?;

    if output.is_json() {
        output.json(&NewProjectDto {
            project: identity.to_string(),
            path: report.project_dir.clone(),
            shots: state.shot_counts().to_vec(),
            dry_run: false,
            directories: Vec::new(),
        })?;
        return Ok(());
    }

    output.success(&format!(
        "Project '{}' created with {} folders",
        identity, report.directories
    ))?;
    output.print(&format!("  {}", report.project_dir.display()))?;

    Ok(())
}

fn build_identity(args: &NewArgs) -> CliResult<ProjectIdentity> {
    let number = match &args.number {
        Some(number) => ProjectNumber::new(number).map_err(|e| CliError::Core(e.into()))?,
        None => {
            let number = ProjectNumber::generate();
            debug!(%number, "Generated project number");
            number
        }
    };
    ProjectIdentity::new(number, &args.name).map_err(|e| CliError::Core(e.into()))
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    identity: &ProjectIdentity,
    state: &ProjectState,
    project_dir: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("New project")?;
    out.print(&format!("  Number:    {}", identity.number()))?;
    out.print(&format!("  Name:      {}", identity.name()))?;
    out.print(&format!("  Sequences: {}", state.sequence_count()))?;
    if state.sequence_count() > 0 {
        let shots: Vec<String> = state.shot_counts().iter().map(ToString::to_string).collect();
        out.print(&format!("  Shots:     {}", shots.join(", ")))?;
    }
    if !state.notes().is_empty() {
        out.print(&format!("  Notes:     {} chars", state.notes().chars().count()))?;
    }
    out.print(&format!("  Location:  {}", project_dir.display()))?;
    out.print("")?;
    Ok(())
}
