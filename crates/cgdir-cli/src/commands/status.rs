//! `cgdir status`: show the recorded layout of a project.

use std::path::PathBuf;

use serde::Serialize;
use tracing::instrument;

use cgdir_core::{application::ProjectSession, domain::sequence_name};

use crate::{
    cli::{StatusArgs, global::GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

use super::{build_service, resolve_project};

#[derive(Debug, Serialize)]
struct SequenceDto {
    name: String,
    shots: usize,
}

#[derive(Debug, Serialize)]
struct StatusDto {
    number: String,
    name: String,
    path: PathBuf,
    sequences: Vec<SequenceDto>,
    total_shots: usize,
    notes: String,
}

impl From<&ProjectSession> for StatusDto {
    fn from(session: &ProjectSession) -> Self {
        let state = session.original();
        Self {
            number: session.identity().number().to_string(),
            name: session.identity().name().to_owned(),
            path: session.project_dir().to_path_buf(),
            sequences: state
                .shot_counts()
                .iter()
                .enumerate()
                .map(|(i, &shots)| SequenceDto {
                    name: sequence_name(i + 1),
                    shots,
                })
                .collect(),
            total_shots: state.total_shots(),
            notes: state.notes().to_owned(),
        }
    }
}

#[instrument(skip_all, fields(project = %args.project))]
pub fn execute(
    args: StatusArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let project_dir = resolve_project(&args.project, &config)?;
    let session = build_service(&config).open(&project_dir)?;
    let status = StatusDto::from(&session);

    if output.is_json() {
        output.json(&status)?;
        return Ok(());
    }

    output.header(&format!("{}_{}", status.number, status.name))?;
    output.print(&format!("  Number:    {}", status.number))?;
    output.print(&format!("  Name:      {}", status.name))?;
    output.print(&format!("  Path:      {}", status.path.display()))?;
    output.print(&format!(
        "  Sequences: {} ({} shots)",
        status.sequences.len(),
        status.total_shots
    ))?;
    for sequence in &status.sequences {
        output.print(&format!("    {}  {} shots", sequence.name, sequence.shots))?;
    }

    if status.notes.is_empty() {
        output.print("  Notes:     (none)")?;
    } else {
        output.print("  Notes:")?;
        for line in status.notes.lines() {
            output.print(&format!("    {line}"))?;
        }
    }

    Ok(())
}
