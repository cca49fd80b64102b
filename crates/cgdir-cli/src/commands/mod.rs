//! Command handlers.
//!
//! Each submodule translates parsed arguments into calls on the core
//! services and renders the result. Helpers shared by several commands
//! live here.

pub mod completions;
pub mod config;
pub mod init;
pub mod new;
pub mod status;
pub mod template;
pub mod update;

use std::path::{Path, PathBuf};

use tracing::debug;

use cgdir_adapters::{LocalFilesystem, scaffold_source};
use cgdir_core::{application::ProjectService, domain::value_objects::MAX_INDEX};

use crate::{
    cli::LayoutArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
};

/// Service wired to the local disk and the configured outline.
pub fn build_service(config: &AppConfig) -> ProjectService {
    let source = scaffold_source(config.scaffold.template.as_deref());
    debug!(outline = %source.describe(), "Building project service");
    ProjectService::new(source, Box::new(LocalFilesystem::new()))
}

/// The root directory, or the "root not set" error.
pub fn require_root(config: &AppConfig) -> CliResult<&Path> {
    config.root().ok_or_else(|| CliError::RootNotSet {
        preferences: config.preferences_path.clone(),
    })
}

/// Turn a `<PROJECT>` argument into a folder path.
///
/// An existing directory or anything that looks like a path is used as is;
/// a bare folder name is looked up under the root.
pub fn resolve_project(reference: &str, config: &AppConfig) -> CliResult<PathBuf> {
    let path = Path::new(reference);
    if path.is_dir() || path.components().count() > 1 {
        return Ok(path.to_path_buf());
    }
    Ok(require_root(config)?.join(reference))
}

/// Notes from `--notes` or `--notes-file`; `None` when neither was given.
pub fn read_notes(layout: &LayoutArgs) -> CliResult<Option<String>> {
    if let Some(notes) = &layout.notes {
        return Ok(Some(notes.clone()));
    }
    layout
        .notes_file
        .as_ref()
        .map(|file| {
            std::fs::read_to_string(file)
                .with_cli_context(|| format!("Failed to read notes from '{}'", file.display()))
        })
        .transpose()
}

/// Per-sequence shot counts from `--sequences` / `--shots`.
///
/// Sequences without an explicit count keep their `current` count, or get
/// `default_shots` if they are new. The sequence count defaults to the
/// longer of `current` and `--shots`.
pub fn shot_counts(
    layout: &LayoutArgs,
    current: &[usize],
    default_shots: usize,
) -> CliResult<Vec<usize>> {
    let sequences = layout
        .sequences
        .unwrap_or_else(|| current.len().max(layout.shots.len()));

    if sequences > MAX_INDEX {
        return Err(CliError::InvalidInput {
            message: format!("{sequences} sequences requested, at most {MAX_INDEX} are supported"),
            source: None,
        });
    }

    if layout.shots.len() > sequences {
        return Err(CliError::InvalidInput {
            message: format!(
                "{} shot counts given for {} sequences",
                layout.shots.len(),
                sequences
            ),
            source: None,
        });
    }

    Ok((0..sequences)
        .map(|i| {
            layout
                .shots
                .get(i)
                .or_else(|| current.get(i))
                .copied()
                .unwrap_or(default_shots)
        })
        .collect())
}

/// Ask a yes/no question; anything but yes declines.
pub fn confirm(prompt: &str) -> CliResult<bool> {
    #[cfg(feature = "interactive")]
    {
        use std::io::IsTerminal;

        if std::io::stdin().is_terminal() {
            return dialoguer::Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
                .map_err(|e| CliError::IoError {
                    message: "failed to read confirmation".into(),
                    source: std::io::Error::other(e.to_string()),
                });
        }
    }

    prompt_stdin(prompt)
}

fn prompt_stdin(prompt: &str) -> CliResult<bool> {
    use std::io::{self, Write};

    print!("{prompt} [y/N] ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input == "y" || input == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(sequences: Option<usize>, shots: &[usize]) -> LayoutArgs {
        LayoutArgs {
            sequences,
            shots: shots.to_vec(),
            notes: None,
            notes_file: None,
        }
    }

    #[test]
    fn new_project_defaults_to_listed_shots() {
        assert_eq!(shot_counts(&layout(None, &[3, 2]), &[], 1).unwrap(), vec![3, 2]);
        assert!(shot_counts(&layout(None, &[]), &[], 1).unwrap().is_empty());
    }

    #[test]
    fn extra_sequences_get_default_shots() {
        assert_eq!(shot_counts(&layout(Some(3), &[4]), &[], 2).unwrap(), vec![4, 2, 2]);
    }

    #[test]
    fn update_keeps_unlisted_counts() {
        let counts = shot_counts(&layout(Some(4), &[]), &[3, 1], 1).unwrap();
        assert_eq!(counts, vec![3, 1, 1, 1]);

        let counts = shot_counts(&layout(None, &[3, 5]), &[3, 1, 2], 1).unwrap();
        assert_eq!(counts, vec![3, 5, 2]);
    }

    #[test]
    fn more_counts_than_sequences_is_invalid() {
        assert!(matches!(
            shot_counts(&layout(Some(1), &[1, 1]), &[], 1),
            Err(CliError::InvalidInput { .. })
        ));
    }

    #[test]
    fn sequence_count_above_naming_limit_is_invalid() {
        assert!(matches!(
            shot_counts(&layout(Some(usize::MAX), &[]), &[], 1),
            Err(CliError::InvalidInput { .. })
        ));
        assert!(matches!(
            shot_counts(&layout(Some(MAX_INDEX + 1), &[]), &[1], 1),
            Err(CliError::InvalidInput { .. })
        ));
        assert_eq!(shot_counts(&layout(Some(MAX_INDEX), &[]), &[], 0).unwrap().len(), MAX_INDEX);
    }

    #[test]
    fn fewer_sequences_passes_through_for_the_differ() {
        assert_eq!(shot_counts(&layout(Some(1), &[]), &[2, 2], 1).unwrap(), vec![2]);
    }

    #[test]
    fn bare_name_needs_root() {
        let config = AppConfig::default();
        assert!(matches!(
            resolve_project("12_Show", &config),
            Err(CliError::RootNotSet { .. })
        ));

        let config = AppConfig {
            root: Some(PathBuf::from("/jobs")),
            ..AppConfig::default()
        };
        assert_eq!(
            resolve_project("12_Show", &config).unwrap(),
            PathBuf::from("/jobs/12_Show")
        );
        assert_eq!(
            resolve_project("/elsewhere/12_Show", &config).unwrap(),
            PathBuf::from("/elsewhere/12_Show")
        );
    }

    #[test]
    fn notes_text_wins() {
        let mut args = layout(None, &[]);
        assert_eq!(read_notes(&args).unwrap(), None);
        args.notes = Some("hello".into());
        assert_eq!(read_notes(&args).unwrap().as_deref(), Some("hello"));
    }
}
