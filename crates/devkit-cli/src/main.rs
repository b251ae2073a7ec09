//! # Devkit CLI
//!
//! Sets up a new project directory from a template tree.
//!
//! ## Startup sequence
//!
//! 1. Parse arguments; clap prints help, version and usage errors itself.
//! 2. Install the tracing subscriber.
//! 3. Load configuration (file + env + defaults). `init` skips this step.
//! 4. Dispatch to the command handler.
//! 5. Report a [`CliError`] on stderr and map it to an exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
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

fn main() -> ExitCode {
    // .env may carry DEVKIT__* settings and RUST_LOG; a missing file is fine.
    let _ = dotenvy::dotenv();

    // Exits 0 for --help / --version and 2 for usage errors.
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }
    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        config = ?cli.global.config,
        "CLI started"
    );

    let report = Report {
        verbose: cli.global.verbose > 0,
        color: !cli.global.no_color && std::io::stderr().is_terminal(),
    };

    match run(cli) {
        Ok(()) => {
            info!("devkit finished");
            ExitCode::SUCCESS
        }
        Err(e) => report.fail(e),
    }
}

/// Load configuration and dispatch to the command handler.
#[instrument(skip_all)]
fn run(cli: Cli) -> CliResult<()> {
    // `init` creates the file, so it must not require it to exist.
    let config = if matches!(cli.command, Commands::Init(_)) {
        AppConfig::default()
    } else {
        AppConfig::load(cli.global.config.as_ref())
            .map_err(|e| CliError::config(format!("Failed to load configuration: {e:#}")))?
    };
    let output = OutputManager::new(&cli.global, &config);

    match cli.command {
        Commands::Install(cmd) => commands::install::execute(cmd, config, output),
        Commands::Check(cmd) => commands::check::execute(cmd, output),
        Commands::Init(cmd) => commands::init::execute(cmd, cli.global, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, cli.global, config, output),
    }
}

/// How a failed run is shown on stderr.
struct Report {
    verbose: bool,
    color: bool,
}

impl Report {
    fn fail(&self, err: CliError) -> ExitCode {
        err.log();
        eprint!("{}", err.render(self.verbose, self.color));
        ExitCode::from(err.exit_code())
    }
}
