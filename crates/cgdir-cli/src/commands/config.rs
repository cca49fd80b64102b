//! `cgdir config`: the remembered root directory and configuration values.

use std::path::{Path, PathBuf};

use tracing::info;

use cgdir_adapters::RootPreference;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

use super::require_root;

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::GetRoot => {
            let root = require_root(&config)?;
            output.print(&root.display().to_string())?;
        }

        ConfigCommands::SetRoot { dir } => {
            let root = absolute_dir(&dir)?;
            RootPreference::save(&config.preferences_path, &root)?;
            info!(root = %root.display(), "Root directory stored");
            output.success(&format!("Root directory set to {}", root.display()))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(serialised.trim_end())?;
            output.print("")?;
            let root = config
                .root()
                .map(|r| r.display().to_string())
                .unwrap_or_else(|| "(not set)".into());
            output.print(&format!("root = {root}"))?;
            output.print(&format!(
                "preferences = {}",
                config.preferences_path.display()
            ))?;
        }

        ConfigCommands::Path => {
            output.print(&format!("config: {}", AppConfig::config_path().display()))?;
            output.print(&format!(
                "preferences: {}",
                config.preferences_path.display()
            ))?;
        }
    }

    Ok(())
}

/// `dir` as an absolute path. It must already exist.
fn absolute_dir(dir: &Path) -> CliResult<PathBuf> {
    if !dir.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("'{}' is not an existing directory", dir.display()),
            source: None,
        });
    }
    std::path::absolute(dir).map_err(|e| CliError::IoError {
        message: format!("Failed to resolve '{}'", dir.display()),
        source: e,
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────
