//! Terminal output for command results.
//!
//! Text goes to stdout through a [`console::Term`]; warnings go to stderr.
//! Colour is only used for the human format, which `auto` picks when stdout
//! is a terminal.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Info,
}

impl Tone {
    fn symbol(self) -> &'static str {
        match self {
            Tone::Success => "\u{2713}", // ✓
            Tone::Warning => "\u{26a0}", // ⚠
            Tone::Info => "\u{2139}",    // ℹ
        }
    }
}

/// Renders messages according to the resolved format and quiet flag.
pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => config_format(&config.output.format),
            explicit => explicit,
        };
        let format = resolve(requested, io::stdout().is_terminal());

        Self {
            format,
            quiet: args.quiet,
            color: format == OutputFormat::Human && !args.no_color && !config.output.no_color,
            term: Term::stdout(),
        }
    }

    /// Plain line; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.tagged(Tone::Success, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.tagged(Tone::Info, msg)
    }

    /// Warning on stderr. Survives quiet mode: it reports refused input.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        Term::stderr().write_line(&self.style(Tone::Warning, msg))
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.color {
            self.term.write_line(&text.cyan().bold().to_string())
        } else {
            self.term.write_line(text)
        }
    }

    /// Pretty JSON document on stdout. Printed even in quiet mode.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn tagged(&self, tone: Tone, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&self.style(tone, msg))
    }

    fn style(&self, tone: Tone, msg: &str) -> String {
        let symbol = tone.symbol();
        if !self.color {
            return format!("{symbol} {msg}");
        }
        match tone {
            Tone::Success => format!("{} {}", symbol.green().bold(), msg.green()),
            Tone::Warning => format!("{} {}", symbol.yellow().bold(), msg.yellow()),
            Tone::Info => format!("{} {}", symbol.blue().bold(), msg.blue()),
        }
    }
}

/// `auto` becomes human on a terminal and plain otherwise.
fn resolve(requested: OutputFormat, stdout_is_terminal: bool) -> OutputFormat {
    match requested {
        OutputFormat::Auto if stdout_is_terminal => OutputFormat::Human,
        OutputFormat::Auto => OutputFormat::Plain,
        other => other,
    }
}

/// `output.format` from the config file. Unknown values mean auto.
fn config_format(value: &str) -> OutputFormat {
    match value.to_ascii_lowercase().as_str() {
        "human" => OutputFormat::Human,
        "plain" => OutputFormat::Plain,
        "json" => OutputFormat::Json,
        _ => OutputFormat::Auto,
    }
}
