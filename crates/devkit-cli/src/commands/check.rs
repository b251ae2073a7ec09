//! `devkit check` — run one file handler predicate.

use std::path::Path;

use serde::Serialize;

use devkit_adapters::LocalFilesystem;
use devkit_core::{application::FileHandler, domain::CheckKind, error::DevkitError};

use crate::{
    cli::{CheckArgs, OutputFormat},
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct CheckOutcome<'a> {
    check: CheckKind,
    path: &'a Path,
    holds: bool,
}

/// Run the check; with `--require` a failed check is an error.
pub fn execute(args: CheckArgs, output: OutputManager) -> CliResult<()> {
    let check: CheckKind = args.check.parse().map_err(DevkitError::Domain)?;
    let files = FileHandler::new(Box::new(LocalFilesystem::new()));
    let holds = files.check(check, &args.path, args.require)?;

    let outcome = CheckOutcome {
        check,
        path: &args.path,
        holds,
    };
    match output.format() {
        OutputFormat::Json => output.json(&outcome)?,
        OutputFormat::Human => {
            let line = format!("{} {}", outcome.path.display(), outcome.check);
            if holds {
                output.success(&line)?
            } else {
                output.error(&line)?
            }
        }
        _ => output.print(&holds.to_string())?,
    }
    Ok(())
}
