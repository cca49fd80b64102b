//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "cgdir",
    bin_name = "cgdir",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f3ac} VFX production folder scaffolding",
    long_about = "cgdir creates the standard folder tree of a CG production \
                  (work, renders, delivery, ...) with one folder per sequence \
                  and shot, and grows existing projects without ever \
                  removing anything.",
    after_help = "EXAMPLES:\n\
        \x20 cgdir config set-root /mnt/projects\n\
        \x20 cgdir new Awesome_CG --shots 3,2,5 --notes \"kickoff 12.03\"\n\
        \x20 cgdir update 24001234_Awesome_CG --shots 3,4,5,1\n\
        \x20 cgdir status 24001234_Awesome_CG --output-format json",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project folder tree.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 cgdir new Awesome_CG                       # no sequences yet\n\
            \x20 cgdir new Awesome_CG --sequences 4         # 4 sequences, default shot count\n\
            \x20 cgdir new Awesome_CG --shots 3,2 -n 2400123 --notes-file brief.txt"
    )]
    New(NewArgs),

    /// Show the layout of an existing project.
    #[command(
        visible_alias = "st",
        about = "Show sequences, shots and notes of a project",
        after_help = "EXAMPLES:\n\
            \x20 cgdir status 24001234_Awesome_CG\n\
            \x20 cgdir status /mnt/projects/24001234_Awesome_CG --output-format json"
    )]
    Status(StatusArgs),

    /// Grow an existing project.
    #[command(
        visible_alias = "up",
        about = "Add sequences or shots, or replace the notes",
        after_help = "EXAMPLES:\n\
            \x20 cgdir update 24001234_Awesome_CG --sequences 5\n\
            \x20 cgdir update 24001234_Awesome_CG --shots 3,4   # seq_0002 gets 4 shots\n\
            \x20 cgdir update 24001234_Awesome_CG --notes \"client review moved\"\n\n\
            Removing sequences or shots is refused; nothing is changed in that case."
    )]
    Update(UpdateArgs),

    /// Print the scaffold outline in use.
    #[command(about = "Show the parsed scaffold outline")]
    Template,

    /// Initialise a cgdir configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 cgdir init            # default location\n\
            \x20 cgdir init --force    # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 cgdir completions bash > ~/.local/share/bash-completion/completions/cgdir\n\
            \x20 cgdir completions zsh  > ~/.zfunc/_cgdir\n\
            \x20 cgdir completions fish > ~/.config/fish/completions/cgdir.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the root directory and configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cgdir config set-root /mnt/projects\n\
            \x20 cgdir config get-root\n\
            \x20 cgdir config list"
    )]
    Config(ConfigCommands),
}

// ── shared layout arguments ───────────────────────────────────────────────────

/// Sequence/shot layout and notes, shared by `new` and `update`.
#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// Number of sequences.
    #[arg(
        short = 's',
        long = "sequences",
        value_name = "N",
        help = "Number of sequences"
    )]
    pub sequences: Option<usize>,

    /// Shot count per sequence, in order.
    #[arg(
        long = "shots",
        value_name = "COUNTS",
        value_delimiter = ',',
        help = "Comma-separated shot count per sequence, e.g. 3,2,5"
    )]
    pub shots: Vec<usize>,

    /// Project notes text.
    #[arg(long = "notes", value_name = "TEXT", conflicts_with = "notes_file")]
    pub notes: Option<String>,

    /// Read project notes from a file.
    #[arg(long = "notes-file", value_name = "FILE")]
    pub notes_file: Option<PathBuf>,
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `cgdir new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name; the folder is `<number>_<name>`.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Project (job) number. A random 8-digit number when omitted.
    #[arg(short = 'n', long = "number", value_name = "NUMBER")]
    pub number: Option<String>,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Re-create missing folders of an existing project and replace its notes.
    #[arg(long = "force", help = "Proceed even if the project folder exists")]
    pub force: bool,

    /// Preview what would be created without touching the disk.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── status ────────────────────────────────────────────────────────────────────

/// Arguments for `cgdir status`.
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Project folder path, or folder name under the root directory.
    #[arg(value_name = "PROJECT")]
    pub project: String,
}

// ── update ────────────────────────────────────────────────────────────────────

/// Arguments for `cgdir update`.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Project folder path, or folder name under the root directory.
    #[arg(value_name = "PROJECT")]
    pub project: String,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Apply without asking")]
    pub yes: bool,

    /// Print the pending changes and stop.
    #[arg(long = "dry-run", help = "Show the changes without applying them")]
    pub dry_run: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `cgdir init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `cgdir completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `cgdir config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the root directory projects are created under.
    GetRoot,
    /// Remember a root directory.
    SetRoot {
        /// Existing directory.
        dir: PathBuf,
    },
    /// Print all configuration values.
    List,
    /// Print the configuration and preference file locations.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_new_command() {
        let cli = Cli::parse_from([
            "cgdir",
            "new",
            "Awesome_CG",
            "--number",
            "24001234",
            "--shots",
            "3,2,5",
            "--notes",
            "hello",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name, "Awesome_CG");
        assert_eq!(args.number.as_deref(), Some("24001234"));
        assert_eq!(args.layout.shots, vec![3, 2, 5]);
        assert_eq!(args.layout.notes.as_deref(), Some("hello"));
    }

    #[test]
    fn notes_and_notes_file_conflict() {
        let result = Cli::try_parse_from([
            "cgdir",
            "new",
            "x",
            "--notes",
            "a",
            "--notes-file",
            "b.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn negative_shot_count_is_rejected() {
        let result = Cli::try_parse_from(["cgdir", "update", "p", "--shots", "1,-2"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_root_after_subcommand() {
        let cli = Cli::parse_from(["cgdir", "status", "p", "--root", "/jobs"]);
        assert_eq!(cli.global.root, Some(PathBuf::from("/jobs")));
    }

    #[test]
    fn config_set_root_takes_a_dir() {
        let cli = Cli::parse_from(["cgdir", "config", "set-root", "/mnt/projects"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::SetRoot { .. })
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["cgdir", "--quiet", "--verbose", "template"]);
        assert!(result.is_err());
    }
}
