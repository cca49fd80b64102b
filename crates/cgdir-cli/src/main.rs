//! # cgdir
//!
//! Creates and grows the folder tree of a VFX production.
//!
//! Startup: `.env`, argument parsing, tracing, configuration (file, env,
//! root preference), output manager, then one command handler. Every
//! [`CliError`] leaves through [`report_failure`].
//!
//! ## Exit codes
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! |  0   | Success                                   |
//! |  1   | Internal / filesystem error               |
//! |  2   | Bad input, refused removal, cancelled     |
//! |  3   | Project not found                         |
//! |  4   | Configuration error or root not set       |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

const EXIT_INTERNAL: u8 = 1;
const EXIT_USAGE: u8 = 2;
const EXIT_CONFIG: u8 = 4;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return parse_failure(&e),
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(EXIT_INTERNAL);
    }

    debug!(
        command = ?cli.command,
        root = ?cli.global.root,
        "cgdir started"
    );

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e:#}");
            eprintln!("Error: failed to load configuration: {e:#}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let output = OutputManager::new(&cli.global, &config);
    let verbose = cli.global.verbose > 0;

    match run(cli, config, output) {
        Ok(()) => {
            info!("cgdir finished");
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(&e, verbose),
    }
}

/// `--help` / `--version` go to stdout with success; anything else is a
/// usage error on stderr.
fn parse_failure(err: &clap::Error) -> ExitCode {
    let code = parse_exit_code(err.kind());
    if code == 0 {
        if err.print().is_err() {
            return ExitCode::from(EXIT_INTERNAL);
        }
    } else {
        eprintln!("{}", err.render().ansi());
    }
    ExitCode::from(code)
}

fn parse_exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => EXIT_USAGE,
    }
}

/// `init` writes the file `--config` names, so it starts from defaults.
fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    match cli.command {
        Commands::Init(_) => Ok(AppConfig::default()),
        _ => AppConfig::load(&cli.global),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let Cli { global, command } = cli;
    match command {
        Commands::New(args) => commands::new::execute(args, global, config, output),
        Commands::Status(args) => commands::status::execute(args, global, config, output),
        Commands::Update(args) => commands::update::execute(args, global, config, output),
        Commands::Template => commands::template::execute(config, output),
        Commands::Init(args) => commands::init::execute(args, global, config, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Log `err`, print it with its suggestions on stderr and pick the exit code.
fn report_failure(err: &CliError, verbose: bool) -> ExitCode {
    err.log();

    let text = if std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{text}");

    ExitCode::from(err.exit_code())
}
