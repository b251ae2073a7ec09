//! Install plan loading.
//!
//! Builds an [`InstallPlan`] for a source template tree, either from an
//! explicit `devkit.toml` manifest at the source root or, when there is none,
//! by walking the tree.
//!
//! # `devkit.toml` format
//!
//! ```toml
//! directories = ["docs", "src", "tests/suites"]
//!
//! [[copy]]
//! source = ".gitignore"            # target defaults to source
//!
//! [[template]]
//! source = "templates/README.md"
//! target = "README.md"
//! ```
//!
//! # Discovery without a manifest
//!
//! ```text
//! source/
//! ├── .git/                 ← skipped
//! ├── src/                  ← directory entry
//! ├── .gitignore            ← copied
//! └── composer.json.tmpl    ← rendered to composer.json
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use devkit_core::{
    application::{ApplicationError, FileHandler},
    domain::{DomainError, DomainValidator as validator, InstallPlan, Offset, RelativePath},
    error::{DevkitError, DevkitResult},
};

/// Manifest file name looked up at the source root.
pub const MANIFEST_FILE: &str = "devkit.toml";

/// Suffix marking a file as a template during discovery.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

const SKIPPED_DIRS: &[&str] = &[".git"];

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `devkit.toml` file.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct PlanManifest {
    /// Directories to ensure under the target root.
    pub directories: Vec<String>,
    /// Files copied byte-for-byte.
    pub copy: Vec<FileEntry>,
    /// Files rendered with placeholder substitution.
    pub template: Vec<FileEntry>,
}

/// One `[[copy]]` or `[[template]]` entry.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileEntry {
    pub source: String,
    pub target: Option<String>,
}

impl FileEntry {
    fn paths(&self) -> Result<(RelativePath, RelativePath), DomainError> {
        let source = normalize_path(&self.source);
        let target = self
            .target
            .as_deref()
            .map(normalize_path)
            .unwrap_or_else(|| source.clone());
        Ok((RelativePath::try_new(source)?, RelativePath::try_new(target)?))
    }
}

impl PlanManifest {
    /// Parse manifest text.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        toml::from_str(raw).map_err(|e| DomainError::InvalidManifest(e.to_string()))
    }

    /// Convert into a validated plan.
    pub fn into_plan(self) -> Result<InstallPlan, DomainError> {
        let mut plan = InstallPlan::new();
        for dir in &self.directories {
            plan.add_directory(RelativePath::try_new(normalize_path(dir))?);
        }
        for entry in &self.copy {
            let (source, target) = entry.paths()?;
            plan.add_copy(source, target);
        }
        for entry in &self.template {
            let (source, target) = entry.paths()?;
            plan.add_template(source, target);
        }
        validator::validate_plan(&plan)?;
        Ok(plan)
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Resolves the install plan for a source directory.
///
/// The manifest is read through the [`FileHandler`], so its checks and error
/// messages apply. Discovery walks the local disk directly.
pub struct PlanLoader<'a> {
    files: &'a FileHandler,
}

impl<'a> PlanLoader<'a> {
    pub fn new(files: &'a FileHandler) -> Self {
        Self { files }
    }

    /// Load the plan for `source`.
    ///
    /// # Errors
    ///
    /// - precondition errors when `source` is not a readable directory
    /// - [`DomainError::InvalidManifest`] when `devkit.toml` does not parse
    /// - [`DomainError::EmptyPlan`] when nothing is left to install
    #[instrument(skip(self), fields(source = %source.display()))]
    pub fn load(&self, source: &Path) -> DevkitResult<InstallPlan> {
        self.files.is_directory(source, true)?;
        self.files.is_readable(source, true)?;

        let manifest_path = source.join(MANIFEST_FILE);
        let plan = if self.files.is_file(&manifest_path, false)? {
            debug!(manifest = %manifest_path.display(), "loading plan from manifest");
            let raw = self.files.get_contents(&manifest_path, Offset::START)?;
            let raw = String::from_utf8_lossy(&raw);
            PlanManifest::parse(&raw)
                .and_then(PlanManifest::into_plan)
                .map_err(DevkitError::Domain)?
        } else {
            debug!("no manifest, discovering plan from source tree");
            discover(source)?
        };

        debug!(entries = plan.entry_count(), "plan loaded");
        Ok(plan)
    }
}

/// Walk `source` and turn every entry into a plan entry.
///
/// Entries come out in sorted order so the plan is deterministic. Symlinks
/// and other special files are skipped.
pub fn discover(source: &Path) -> DevkitResult<InstallPlan> {
    let mut plan = InstallPlan::new();

    let walker = WalkDir::new(source)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            !(e.file_type().is_dir()
                && e.file_name()
                    .to_str()
                    .is_some_and(|name| SKIPPED_DIRS.contains(&name)))
        });

    for walk_entry in walker {
        let walk_entry = walk_entry.map_err(|e| ApplicationError::Io {
            message: format!("Failed reading template tree '{}'.", source.display()),
            reason: e.to_string(),
        })?;
        let rel_raw = walk_entry
            .path()
            .strip_prefix(source)
            .map_err(|_| DevkitError::Internal {
                message: format!(
                    "walked path '{}' escaped '{}'",
                    walk_entry.path().display(),
                    source.display()
                ),
            })?;
        let path_str = normalize_path(&rel_raw.to_string_lossy());

        if walk_entry.file_type().is_dir() {
            plan.add_directory(RelativePath::try_new(path_str)?);
            continue;
        }

        if !walk_entry.file_type().is_file() {
            continue; // Skip symlinks and other special types.
        }

        let rendered_name = path_str
            .strip_suffix(TEMPLATE_SUFFIX)
            .filter(|name| !name.is_empty() && !name.ends_with('/'))
            .map(str::to_owned);

        match rendered_name {
            Some(target) => {
                plan.add_template(
                    RelativePath::try_new(path_str)?,
                    RelativePath::try_new(target)?,
                );
            }
            None => {
                let path = RelativePath::try_new(path_str)?;
                plan.add_copy(path.clone(), path);
            }
        }
    }

    validator::validate_plan(&plan).map_err(DevkitError::Domain)?;
    Ok(plan)
}

/// Normalise a filesystem path to forward slashes so Windows and Unix paths
/// compare identically throughout the loader.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocalFilesystem;
    use devkit_core::domain::FileMapping;
    use std::fs;
    use tempfile::TempDir;

    // ── helpers ───────────────────────────────────────────────────────────

    fn make_source(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (rel_path, content) in files {
            let full = temp.path().join(rel_path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(full, content).unwrap();
        }
        temp
    }

    fn handler() -> FileHandler {
        FileHandler::new(Box::new(LocalFilesystem::new()))
    }

    fn mapping(m: &FileMapping) -> (String, String) {
        (m.source.to_string(), m.target.to_string())
    }

    // ── manifest ──────────────────────────────────────────────────────────

    #[test]
    fn manifest_target_defaults_to_source() {
        let plan = PlanManifest::parse(
            r#"
directories = ["src"]
[[copy]]
source = ".gitignore"
[[template]]
source = "templates/README.md"
target = "README.md"
"#,
        )
        .unwrap()
        .into_plan()
        .unwrap();

        assert_eq!(plan.directories().count(), 1);
        let copies: Vec<_> = plan.copies().map(mapping).collect();
        assert_eq!(copies, vec![(".gitignore".into(), ".gitignore".into())]);
        let templates: Vec<_> = plan.templates().map(mapping).collect();
        assert_eq!(
            templates,
            vec![("templates/README.md".into(), "README.md".into())]
        );
    }

    #[test]
    fn manifest_rejects_unknown_keys() {
        assert!(matches!(
            PlanManifest::parse("files = []"),
            Err(DomainError::InvalidManifest(_))
        ));
    }

    #[test]
    fn manifest_rejects_escaping_target() {
        let manifest = PlanManifest::parse(
            r#"
[[copy]]
source = "a"
target = "../outside"
"#,
        )
        .unwrap();
        assert!(matches!(
            manifest.into_plan(),
            Err(DomainError::InvalidPlanEntry { .. })
        ));
    }

    #[test]
    fn empty_manifest_is_empty_plan() {
        let manifest = PlanManifest::parse("").unwrap();
        assert!(matches!(manifest.into_plan(), Err(DomainError::EmptyPlan)));
    }

    #[test]
    fn loader_prefers_manifest_over_walk() {
        let temp = make_source(&[
            (MANIFEST_FILE, "[[copy]]\nsource = \"keep.txt\"\n"),
            ("keep.txt", "k"),
            ("ignored.txt", "i"),
        ]);
        let files = handler();

        let plan = PlanLoader::new(&files).load(temp.path()).unwrap();
        assert_eq!(plan.entry_count(), 1);
    }

    #[test]
    fn loader_requires_source_directory() {
        let temp = TempDir::new().unwrap();
        let files = handler();

        let err = PlanLoader::new(&files)
            .load(&temp.path().join("missing"))
            .unwrap_err();
        assert!(err.to_string().ends_with("does not exist."));
    }

    // ── discovery ─────────────────────────────────────────────────────────

    #[test]
    fn discovery_classifies_entries() {
        let temp = make_source(&[
            (".gitignore", "vendor/"),
            ("composer.json.tmpl", "{\"name\": \"{repo.name}\"}"),
            ("src/.keep", ""),
            (".git/HEAD", "ref: refs/heads/main"),
        ]);

        let plan = discover(temp.path()).unwrap();

        let dirs: Vec<_> = plan.directories().map(|d| d.to_string()).collect();
        assert_eq!(dirs, vec!["src".to_string()]);
        let templates: Vec<_> = plan.templates().map(mapping).collect();
        assert_eq!(
            templates,
            vec![("composer.json.tmpl".into(), "composer.json".into())]
        );
        let copies: Vec<_> = plan.copies().map(mapping).collect();
        assert_eq!(
            copies,
            vec![
                (".gitignore".into(), ".gitignore".into()),
                ("src/.keep".into(), "src/.keep".into()),
            ]
        );
        assert_eq!(plan.entry_count(), 4, ".git must not be walked");
    }

    #[test]
    fn bare_suffix_file_is_copied_not_rendered() {
        let temp = make_source(&[(".tmpl", "x")]);
        let plan = discover(temp.path()).unwrap();
        assert_eq!(plan.copies().count(), 1);
        assert_eq!(plan.templates().count(), 0);
    }

    #[test]
    fn empty_tree_is_empty_plan() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            discover(temp.path()),
            Err(DevkitError::Domain(DomainError::EmptyPlan))
        ));
    }

    #[test]
    fn normalize_path_replaces_backslashes() {
        assert_eq!(normalize_path("src\\main.rs"), "src/main.rs");
        assert_eq!(normalize_path("src/main.rs"), "src/main.rs");
    }
}
