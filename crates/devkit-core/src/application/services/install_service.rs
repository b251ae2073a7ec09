//! Install Service - main application orchestrator.
//!
//! This service coordinates the install workflow:
//! 1. Check the source root and ensure the target root
//! 2. Resolve project naming into a replacement map
//! 3. Ensure plan directories, copy plain files, render templates
//!
//! Every disk interaction goes through `FileHandler`. The first failure
//! aborts the run; nothing already written is rolled back.

use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::services::FileHandler,
    domain::{
        DomainValidator as validator, FileMapping, InstallPlan, NamingOverrides, ProjectNaming,
        Replacements,
    },
    error::{DevkitError, DevkitResult},
};

/// Input for a single install run.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    /// Root of the template tree the plan's sources are relative to.
    pub source: PathBuf,
    /// Root of the project being set up.
    pub target: PathBuf,
    pub plan: InstallPlan,
    pub overrides: NamingOverrides,
    /// Validate and report without writing anything.
    pub dry_run: bool,
}

/// One materialized (or, in a dry run, planned) plan entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum InstallStep {
    DirectoryEnsured { path: PathBuf, created: bool },
    FileCopied { source: PathBuf, target: PathBuf },
    TemplateRendered { source: PathBuf, target: PathBuf },
}

/// What an install run did.
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub naming: ProjectNaming,
    pub replacements: Replacements,
    pub steps: Vec<InstallStep>,
}

impl InstallReport {
    pub fn directories_created(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, InstallStep::DirectoryEnsured { created: true, .. }))
            .count()
    }

    pub fn files_written(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| !matches!(s, InstallStep::DirectoryEnsured { .. }))
            .count()
    }
}

/// Runs install plans against a target directory.
pub struct InstallService {
    files: FileHandler,
    year: Option<i32>,
}

impl InstallService {
    /// Create a new install service on top of a file handler.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use devkit_core::application::{FileHandler, InstallService};
    ///
    /// let service = InstallService::new(FileHandler::new(Box::new(filesystem)));
    /// let report = service.install(request)?;
    /// ```
    pub fn new(files: FileHandler) -> Self {
        Self { files, year: None }
    }

    /// Pin the `{year}` placeholder instead of reading the clock.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Materialize `request.plan` under `request.target`.
    #[instrument(
        skip_all,
        fields(
            source = %request.source.display(),
            target = %request.target.display(),
            entries = request.plan.entry_count(),
            dry_run = request.dry_run
        )
    )]
    pub fn install(&self, request: InstallRequest) -> DevkitResult<InstallReport> {
        let InstallRequest {
            source,
            target,
            plan,
            overrides,
            dry_run,
        } = request;

        // 1. Validate inputs
        validator::validate_plan(&plan).map_err(DevkitError::Domain)?;
        self.files.is_directory(&source, true)?;

        let root = if dry_run {
            self.files.is_writable(&target, true)?;
            self.files.resolve(&target)
        } else {
            self.files.directory(&target)?
        };

        // 2. Resolve naming
        let year = self.year.unwrap_or_else(|| chrono::Local::now().year());
        let naming = ProjectNaming::derive(&root, year)
            .map_err(DevkitError::Domain)?
            .with_overrides(&overrides);
        let replacements = naming.replacements();
        info!(project = %naming.name, root = %root.display(), "Installing project");

        // 3. Materialize
        let mut steps = Vec::with_capacity(plan.entry_count());
        for dir in plan.directories() {
            let path = dir.under(&root);
            let created = !self.files.exists(&path, false)?;
            let path = if dry_run {
                if !created {
                    self.files.is_directory(&path, true)?;
                }
                path
            } else {
                self.files.directory(&path)?
            };
            steps.push(InstallStep::DirectoryEnsured { path, created });
        }

        for mapping in plan.copies() {
            let (from, to) = self.locate(mapping, &source, &root);
            let target = if dry_run {
                self.check_planned(&from, &to)?
            } else {
                self.files.copy(&from, &to)?
            };
            steps.push(InstallStep::FileCopied {
                source: from,
                target,
            });
        }

        for mapping in plan.templates() {
            let (from, to) = self.locate(mapping, &source, &root);
            let target = if dry_run {
                self.check_planned(&from, &to)?
            } else {
                self.files.template(&from, &to, &replacements)?
            };
            steps.push(InstallStep::TemplateRendered {
                source: from,
                target,
            });
        }

        let report = InstallReport {
            root,
            dry_run,
            naming,
            replacements,
            steps,
        };
        info!(
            directories = report.directories_created(),
            files = report.files_written(),
            "Install completed successfully"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn locate(&self, mapping: &FileMapping, source: &Path, root: &Path) -> (PathBuf, PathBuf) {
        (mapping.source.under(source), mapping.target.under(root))
    }

    /// Dry-run stand-in for copy/template: the same preconditions, no writes.
    fn check_planned(&self, from: &Path, to: &Path) -> DevkitResult<PathBuf> {
        self.files.is_file(from, true)?;
        self.files.is_readable(from, true)?;
        self.files.is_writable(to, true)?;
        Ok(to.to_path_buf())
    }
}
