//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "devkit",
    bin_name = "devkit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Set up a new project from a template tree",
    long_about = "Devkit materializes a source template tree into a target \
                  directory, deriving project naming from the target name.",
    after_help = "EXAMPLES:\n\
        \x20 devkit install --source ~/templates/php-lib --target ./acme-widget\n\
        \x20 devkit install --source ./tpl --dry-run --output-format json\n\
        \x20 devkit check is-writable ./build --require\n\
        \x20 devkit completions bash > /usr/share/bash-completion/completions/devkit",
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
    /// Install a template tree into a project directory.
    #[command(
        visible_alias = "i",
        about = "Install a template tree into a project directory",
        after_help = "EXAMPLES:\n\
            \x20 devkit install --source ~/templates/php-lib\n\
            \x20 devkit install --source ./tpl --target ../acme-widget --name \"Acme Widget\"\n\
            \x20 devkit install --source ./tpl --dry-run"
    )]
    Install(InstallArgs),

    /// Run one filesystem check against a path.
    #[command(
        about = "Check a path",
        after_help = "CHECKS:\n\
            \x20 exists, is-file, is-directory, is-readable, is-writable\n\n\
            EXAMPLES:\n\
            \x20 devkit check exists ./composer.json\n\
            \x20 devkit check is-writable ./build/out.txt --require"
    )]
    Check(CheckArgs),

    /// Initialise a Devkit configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 devkit init\n\
            \x20 devkit init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 devkit completions bash > ~/.local/share/bash-completion/completions/devkit\n\
            \x20 devkit completions zsh  > ~/.zfunc/_devkit\n\
            \x20 devkit completions fish > ~/.config/fish/completions/devkit.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Devkit configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 devkit config get install.source\n\
            \x20 devkit config list\n\
            \x20 devkit config path"
    )]
    Config(ConfigCommands),
}

// ── install ───────────────────────────────────────────────────────────────────

/// Arguments for `devkit install`.
#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Project directory; created when missing.
    #[arg(
        short = 't',
        long = "target",
        value_name = "DIR",
        default_value = ".",
        help = "Project directory (default: current directory)"
    )]
    pub target: PathBuf,

    /// Template tree; falls back to `install.source` from the config.
    #[arg(
        short = 's',
        long = "source",
        value_name = "DIR",
        help = "Source template directory"
    )]
    pub source: Option<PathBuf>,

    #[arg(long = "repo-name", value_name = "VENDOR/NAME", help = "Override {repo.name}")]
    pub repo_name: Option<String>,

    #[arg(long = "repo-uri", value_name = "URI", help = "Override {repo.uri}")]
    pub repo_uri: Option<String>,

    #[arg(long = "repo-page", value_name = "PAGE", help = "Override {repo.page}")]
    pub repo_page: Option<String>,

    #[arg(long = "name", value_name = "NAME", help = "Override {name}")]
    pub name: Option<String>,

    #[arg(long = "namespace", value_name = "NS", help = "Override {namespace}")]
    pub namespace: Option<String>,

    /// Preview without writing anything.
    #[arg(
        long = "dry-run",
        help = "Validate and show what would be installed without writing"
    )]
    pub dry_run: bool,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `devkit check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Check to run, e.g. `is-directory`.
    #[arg(value_name = "CHECK")]
    pub check: String,

    /// Path to check.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Fail with an error instead of printing `false`.
    #[arg(short = 'r', long = "require", help = "Fail when the check does not hold")]
    pub require: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `devkit init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `devkit completions`.
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

/// Subcommands for `devkit config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `install.source`.
        key: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the configuration file location.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
