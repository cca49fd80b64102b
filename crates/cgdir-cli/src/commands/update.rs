//! Implementation of the `cgdir update` command.
//!
//! Re-opens a project, builds the requested layout from the flags (anything
//! not given keeps its current value) and lets the core service grow the
//! project. Shrinking is refused by the core before anything is written.

use serde::Serialize;
use tracing::{debug, instrument};

use cgdir_core::{
    application::UpdateOutcome,
    domain::{Delta, ProjectState},
};

use crate::{
    cli::{UpdateArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

use super::{build_service, confirm, read_notes, resolve_project, shot_counts};

#[derive(Debug, Serialize)]
struct UpdateDto<'a> {
    project: String,
    applied: bool,
    #[serde(flatten)]
    delta: &'a Delta,
}

/// Execute the `cgdir update` command.
#[instrument(skip_all, fields(project = %args.project))]
pub fn execute(
    args: UpdateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let project_dir = resolve_project(&args.project, &config)?;
    let service = build_service(&config);
    let mut session = service.open(&project_dir)?;

    let original = session.original();
    let counts = shot_counts(
        &args.layout,
        original.shot_counts(),
        config.projects.default_shots,
    )?;
    let notes = read_notes(&args.layout)?.unwrap_or_else(|| original.notes().to_owned());
    let requested = ProjectState::new(counts, notes).map_err(|e| CliError::Core(e.into()))?;

    debug!(
        from = ?session.original().shot_counts(),
        to = ?requested.shot_counts(),
        "Update requested"
    );

    let project = session.identity().to_string();

    if args.dry_run {
        let delta = match service.plan_update(&session, &requested) {
            Ok(delta) => delta,
            Err(e) => return Err(rejected(e.into(), &output)?),
        };
        return report(&output, &project, &delta, false);
    }

    let skip_prompt = args.yes || global.quiet || output.is_json();
    let mut prompt_error = None;

    let outcome = service.update(&mut session, requested, |delta| {
        if skip_prompt {
            return true;
        }
        if let Err(e) = output.print(&delta.summary()) {
            prompt_error = Some(CliError::from(e));
            return false;
        }
        match confirm("Apply these changes?") {
            Ok(answer) => answer,
            Err(e) => {
                prompt_error = Some(e);
                false
            }
        }
    });

    if let Some(e) = prompt_error {
        return Err(e);
    }

    match outcome {
        Ok(UpdateOutcome::NoChanges) => {
            if output.is_json() {
                return report(&output, &project, &Delta::default(), false);
            }
            output.info(&format!("No changes for '{project}'"))?;
            Ok(())
        }
        Ok(UpdateOutcome::Declined(_)) => Err(CliError::Cancelled),
        Ok(UpdateOutcome::Applied(delta)) => report(&output, &project, &delta, true),
        Err(e) => Err(rejected(e.into(), &output)?),
    }
}

/// Warn that a rejected request left the project as it was, then hand the
/// error back.
fn rejected(err: CliError, output: &OutputManager) -> CliResult<CliError> {
    if let CliError::Core(core) = &err {
        if core.is_rejection() {
            output.warning("Requested layout reverted to the current project state")?;
        }
    }
    Ok(err)
}

fn report(output: &OutputManager, project: &str, delta: &Delta, applied: bool) -> CliResult<()> {
    if output.is_json() {
        output.json(&UpdateDto {
            project: project.to_owned(),
            applied,
            delta,
        })?;
        return Ok(());
    }

    if delta.is_empty() {
        output.info(&format!("No changes for '{project}'"))?;
        return Ok(());
    }

    if !applied {
        output.info("Dry run: nothing was written")?;
        output.print(&delta.summary())?;
        return Ok(());
    }

    let mut parts = Vec::new();
    if !delta.new_sequences.is_empty() {
        parts.push(format!("{} new sequences", delta.new_sequences.len()));
    }
    if !delta.new_shots.is_empty() {
        parts.push(format!("{} new shots", delta.new_shots.len()));
    }
    if delta.notes_changed {
        parts.push("notes updated".to_owned());
    }
    output.success(&format!("Updated '{project}': {}", parts.join(", ")))?;
    Ok(())
}
