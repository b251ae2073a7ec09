//! Implementation of the `devkit install` command.
//!
//! Responsibility: resolve source and target from flags and config, load the
//! install plan, call the core install service, and display the report. No
//! business logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use devkit_adapters::{LocalFilesystem, PlanLoader};
use devkit_core::{
    application::{FileHandler, InstallReport, InstallRequest, InstallService, InstallStep},
    domain::NamingOverrides,
};

use crate::{
    cli::InstallArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `devkit install` command.
///
/// Dispatch sequence:
/// 1. Resolve source (flag, then config) and target
/// 2. Load the plan from `devkit.toml` or the source tree
/// 3. Run the install, or its dry run
/// 4. Print the report
#[instrument(skip_all, fields(target = %args.target.display(), dry_run = args.dry_run))]
pub fn execute(args: InstallArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // 1. Resolve paths
    let source = resolve_source(args.source.as_deref(), &config)?;
    let target = resolve_target(args.target, &config);
    debug!(source = %source.display(), target = %target.display(), "paths resolved");

    // 2. Load plan
    let files = FileHandler::new(Box::new(LocalFilesystem::new()));
    let plan = PlanLoader::new(&files).load(&source)?;

    // 3. Install
    let overrides = NamingOverrides {
        repo_name: args.repo_name,
        repo_uri: args.repo_uri,
        repo_page: args.repo_page,
        name: args.name,
        namespace: args.namespace,
    };
    let report = InstallService::new(files).install(InstallRequest {
        source,
        target,
        plan,
        overrides,
        dry_run: args.dry_run,
    })?;

    // 4. Report
    if output.is_json() {
        output.json(&report)?;
    } else {
        show_report(&report, &output)?;
    }
    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn resolve_source(flag: Option<&Path>, config: &AppConfig) -> CliResult<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| config.install.source.clone())
        .ok_or_else(|| CliError::config("no source template directory configured"))
}

/// The `--target` default yields to `install.target` from the config.
fn resolve_target(flag: PathBuf, config: &AppConfig) -> PathBuf {
    if flag == Path::new(".") {
        config.install.target.clone().unwrap_or(flag)
    } else {
        flag
    }
}

fn show_report(report: &InstallReport, output: &OutputManager) -> std::io::Result<()> {
    let verb = if report.dry_run { "Would install" } else { "Installing" };
    output.header(&format!(
        "{verb} {} into {}",
        report.naming.name,
        report.root.display()
    ))?;

    for step in &report.steps {
        let (label, path) = match step {
            InstallStep::DirectoryEnsured { path, created } => {
                (if *created { "mkdir" } else { "exists" }, path)
            }
            InstallStep::FileCopied { target, .. } => ("copy", target),
            InstallStep::TemplateRendered { target, .. } => ("render", target),
        };
        let shown = path.strip_prefix(&report.root).unwrap_or(path);
        output.item(label, &shown.display().to_string())?;
    }

    let summary = format!(
        "{} files, {} new directories",
        report.files_written(),
        report.directories_created()
    );
    if report.dry_run {
        output.info(&format!("Dry run, nothing written: {summary}"))
    } else {
        output.success(&format!("Installed {summary}"))
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(source: Option<&str>, target: Option<&str>) -> AppConfig {
        let mut config = AppConfig::default();
        config.install.source = source.map(PathBuf::from);
        config.install.target = target.map(PathBuf::from);
        config
    }

    #[test]
    fn source_flag_wins_over_config() {
        let config = config_with(Some("/from/config"), None);
        assert_eq!(
            resolve_source(Some(Path::new("/from/flag")), &config).unwrap(),
            PathBuf::from("/from/flag")
        );
        assert_eq!(
            resolve_source(None, &config).unwrap(),
            PathBuf::from("/from/config")
        );
    }

    #[test]
    fn missing_source_is_configuration_error() {
        let err = resolve_source(None, &AppConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn default_target_yields_to_config() {
        let config = config_with(None, Some("/work/project"));
        assert_eq!(
            resolve_target(PathBuf::from("."), &config),
            PathBuf::from("/work/project")
        );
        assert_eq!(
            resolve_target(PathBuf::from("here"), &config),
            PathBuf::from("here")
        );
        assert_eq!(
            resolve_target(PathBuf::from("."), &AppConfig::default()),
            PathBuf::from(".")
        );
    }
}
