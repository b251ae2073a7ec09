//! Terminal output for command results.
//!
//! Everything here goes to stdout. Diagnostics and errors go through
//! `tracing` and [`crate::error::CliError::render`] on stderr.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Marker and colour of a status line.
#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Failure,
    Warning,
    Info,
}

impl Tone {
    fn marker(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}", // ✓
            Self::Failure => "\u{2717}", // ✗
            Self::Warning => "\u{26a0}", // ⚠
            Self::Info => "\u{2139}",    // ℹ
        }
    }

    fn paint(self, text: &str) -> String {
        match self {
            Self::Success => text.green().to_string(),
            Self::Failure => text.red().to_string(),
            Self::Warning => text.yellow().to_string(),
            Self::Info => text.blue().to_string(),
        }
    }
}

/// Writes command results in the resolved [`OutputFormat`].
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build from parsed flags and loaded config. `Auto` resolves to
    /// `Human` on a terminal and `Plain` otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let resolved_format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    /// Bare line; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Success, msg)
    }

    /// Negative result line. Shown even in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.write_status(Tone::Failure, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Info, msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.no_color {
            self.term.write_line(text)
        } else {
            self.term.write_line(&text.cyan().bold().to_string())
        }
    }

    /// `  <label>  <value>` detail line under a header.
    pub fn item(&self, label: &str, value: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("  {label:<8} {value}")
        } else {
            format!("  {:<8} {}", label.dimmed(), value)
        };
        self.term.write_line(&line)
    }

    /// Pretty-printed JSON document. Written even in quiet mode, since it
    /// is the command's result rather than progress chatter.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&rendered)
    }

    /// The resolved (never `Auto`) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    fn status(&self, tone: Tone, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_status(tone, msg)
    }

    fn write_status(&self, tone: Tone, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("{} {msg}", tone.marker())
        } else {
            format!("{} {}", tone.paint(tone.marker()).bold(), tone.paint(msg))
        };
        self.term.write_line(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Explicit formats avoid TTY detection in tests.
    fn manager(quiet: bool, no_color: bool, output_format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_mode_writes_are_ok() {
        let out = manager(true, true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
        assert!(out.item("mkdir", "src").is_ok());
        assert!(out.error("src is-file").is_ok());
        assert!(out.json(&serde_json::json!({ "ok": true })).is_ok());
    }

    #[test]
    fn explicit_format_is_kept() {
        let plain = manager(false, false, OutputFormat::Plain);
        assert_eq!(plain.format(), OutputFormat::Plain);
        assert!(!plain.is_json());
        assert!(manager(false, false, OutputFormat::Json).is_json());
    }

    #[test]
    fn no_color_comes_from_flag_or_config() {
        assert!(!manager(false, false, OutputFormat::Plain).no_color);
        assert!(manager(false, true, OutputFormat::Plain).no_color);

        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Plain,
        };
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(OutputManager::new(&args, &config).no_color);
    }

    #[test]
    fn markers_differ_per_tone() {
        let markers = [Tone::Success, Tone::Failure, Tone::Warning, Tone::Info].map(Tone::marker);
        for (i, a) in markers.iter().enumerate() {
            assert!(markers[i + 1..].iter().all(|b| a != b));
        }
    }
}
