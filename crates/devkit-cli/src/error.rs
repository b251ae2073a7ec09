//! CLI error type, exit codes and the stderr report.
//!
//! Core errors are shown with their own message; the CLI adds suggestions,
//! an optional cause list (`-v`) and maps everything onto an exit code.

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use devkit_core::error::{DevkitError, ErrorCategory as CoreCategory};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration missing, unreadable, or naming an unknown key.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// Raised by `devkit-core` or the adapters; the core message is shown
    /// as is.
    #[error("{0}")]
    Core(#[from] DevkitError),

    /// An I/O operation outside the file handler failed (config file,
    /// terminal output).
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

/// How an error is classified for the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input: failed precondition, invalid plan, invalid target name.
    UserError,
    /// A path or named item that should exist does not.
    NotFound,
    Configuration,
    Internal,
}

impl ErrorCategory {
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(self) -> u8 {
        match self {
            Self::UserError => 2,
            Self::NotFound => 3,
            Self::Configuration => 4,
            Self::Internal => 1,
        }
    }
}

impl From<CoreCategory> for ErrorCategory {
    fn from(category: CoreCategory) -> Self {
        match category {
            CoreCategory::Validation => Self::UserError,
            CoreCategory::NotFound => Self::NotFound,
            CoreCategory::Internal => Self::Internal,
        }
    }
}

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: None,
        }
    }

    /// Hints printed under the error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { .. } => vec![
                "Pass --source or set install.source in the config file".into(),
                "Run 'devkit init' to create a default config".into(),
                "Run 'devkit config path' to see which file is read".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::IoError { .. } => vec!["Check permissions on the config directory".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => core.category().into(),
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }

    /// Multi-line report for stderr: message, causes (verbose only),
    /// suggestions, and a hint about `-v` when not verbose.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if color { style(text) } else { text.to_owned() }
        };

        let mut out = format!(
            "\n{} {}\n",
            paint("Error:", |s| s.red().bold().to_string()),
            paint(&self.to_string(), |s| s.red().to_string()),
        );

        if verbose {
            for cause in self.causes() {
                out.push_str(&format!(
                    "  {} {}\n",
                    paint("Caused by:", |s| s.dimmed().to_string()),
                    cause
                ));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                paint("Suggestions:", |s| s.yellow().bold().to_string())
            ));
            for suggestion in &suggestions {
                out.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            out.push_str(&format!(
                "\n{}\n",
                paint("Use -v / --verbose for more details.", |s| s
                    .dimmed()
                    .to_string())
            ));
        }

        out
    }

    /// Emit the error as a tracing event at a severity matching its category.
    pub fn log(&self) {
        let exit_code = self.exit_code();
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(exit_code, "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(exit_code, "{self}")
            }
        }
        for cause in self.causes() {
            tracing::debug!(%cause, "caused by");
        }
    }

    /// Underlying causes, outermost first.
    ///
    /// Application errors carry their low-level reason as data rather than
    /// as a source error.
    fn causes(&self) -> Vec<String> {
        if let Self::Core(DevkitError::Application(app)) = self {
            return app.reason().map(str::to_owned).into_iter().collect();
        }

        let mut causes = Vec::new();
        let mut source = self.source();
        while let Some(err) = source {
            causes.push(err.to_string());
            source = err.source();
        }
        causes
    }
}

/// Attach a context message to a failed `std::io` call.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}
