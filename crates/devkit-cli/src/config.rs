//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `DEVKIT__<SECTION>__<KEY>`
//!    (e.g. `DEVKIT__INSTALL__SOURCE`)
//! 3. Config file: `--config <FILE>` if given, else the per-user file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "DEVKIT";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for `devkit install`.
    pub install: InstallConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Template tree used when `--source` is not given.
    pub source: Option<PathBuf>,
    /// Project directory used when `--target` is left at its default.
    pub target: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration, layering file and environment over defaults.
    ///
    /// An explicit `config_file` must exist; the per-user file is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Self::config_path().as_path()).required(false),
        };

        let config = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.devkit.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "devkit", "devkit")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".devkit.toml"))
    }

    /// The file `load` reads from for the given `--config` value.
    pub fn effective_path(config_file: Option<&Path>) -> PathBuf {
        config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_have_no_source() {
        let cfg = AppConfig::default();
        assert!(cfg.install.source.is_none());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn load_reads_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("devkit.toml");
        fs::write(
            &path,
            "[install]\nsource = \"/opt/templates/php\"\n[output]\nno_color = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.install.source, Some(PathBuf::from("/opt/templates/php")));
        assert!(cfg.output.no_color);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("devkit.toml");
        fs::write(&path, "[output]\nno_color = true\n").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert!(cfg.install.source.is_none());
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&temp.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn effective_path_prefers_flag() {
        assert_eq!(
            AppConfig::effective_path(Some(Path::new("x.toml"))),
            PathBuf::from("x.toml")
        );
        assert!(!AppConfig::effective_path(None).as_os_str().is_empty());
    }
}
