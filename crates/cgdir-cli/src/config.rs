//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (`--root`, `--no-color`, ...)
//! 2. Environment variables (`CGDIR_PROJECTS__DEFAULT_SHOTS=2`, ...)
//! 3. Config file (`--config` or the platform config dir)
//! 4. Built-in defaults (always present)
//!
//! The root directory lives apart from the TOML file, in the single-line
//! preference file, and is resolved here as well.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use cgdir_adapters::RootPreference;

use crate::cli::global::GlobalArgs;

const CONFIG_FILE: &str = "config.toml";
const PREFERENCES_FILE: &str = "preferences.txt";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for new sequences.
    pub projects: ProjectsConfig,
    /// Scaffold outline settings.
    pub scaffold: ScaffoldConfig,
    /// Output settings.
    pub output: OutputConfig,

    /// Root directory all projects live under, if known.
    #[serde(skip)]
    pub root: Option<PathBuf>,
    /// Where the root directory is remembered.
    #[serde(skip)]
    pub preferences_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectsConfig {
    /// Shot count for a sequence the user gave no count for.
    pub default_shots: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Custom outline file; the built-in one when absent.
    pub template: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self { default_shots: 1 }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            projects: ProjectsConfig::default(),
            scaffold: ScaffoldConfig::default(),
            output: OutputConfig::default(),
            root: None,
            preferences_path: Self::default_preferences_path(),
        }
    }
}

impl AppConfig {
    /// Load configuration for this invocation.
    ///
    /// An explicit `--config` file must exist; the default location is
    /// optional.
    pub fn load(args: &GlobalArgs) -> anyhow::Result<Self> {
        let defaults = ProjectsConfig::default();
        let config_file = args.config.clone().unwrap_or_else(Self::config_path);
        debug!(path = %config_file.display(), "Loading configuration");

        let settings = Config::builder()
            .set_default("projects.default_shots", defaults.default_shots as u64)?
            .set_default("output.no_color", false)?
            .set_default("output.format", "auto")?
            .add_source(
                File::from(config_file.as_path())
                    .format(FileFormat::Toml)
                    .required(args.config.is_some()),
            )
            .add_source(
                Environment::with_prefix("CGDIR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("reading {}", config_file.display()))?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .context("invalid configuration values")?;

        config.preferences_path = args
            .preferences
            .clone()
            .unwrap_or_else(Self::default_preferences_path);

        config.root = match &args.root {
            Some(root) => Some(root.clone()),
            None => RootPreference::load(&config.preferences_path)
                .with_context(|| format!("reading {}", config.preferences_path.display()))?,
        };

        debug!(root = ?config.root, "Configuration loaded");
        Ok(config)
    }

    /// Directory holding `config.toml` and `preferences.txt`.
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "cgdir", "cgdir").map(|d| d.config_dir().to_path_buf())
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.cgdir.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        Self::config_dir()
            .map(|d| d.join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(".cgdir.toml"))
    }

    /// Path to the default preference file.
    pub fn default_preferences_path() -> PathBuf {
        Self::config_dir()
            .map(|d| d.join(PREFERENCES_FILE))
            .unwrap_or_else(|| PathBuf::from(PREFERENCES_FILE))
    }

    /// Root directory, if one is set.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}
