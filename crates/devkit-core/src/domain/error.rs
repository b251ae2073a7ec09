// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside `DevkitError`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid placeholder '{key}': {reason}")]
    InvalidPlaceholder { key: String, reason: String },

    #[error("Invalid plan entry '{path}': {reason}")]
    InvalidPlanEntry { path: String, reason: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Duplicate target in install plan: {path}")]
    DuplicateTarget { path: String },

    #[error("Install plan is empty")]
    EmptyPlan,

    #[error("Invalid install manifest: {0}")]
    InvalidManifest(String),

    #[error("Unknown check '{0}'")]
    UnknownCheck(String),

    // ========================================================================
    // Naming
    // ========================================================================
    #[error("Cannot derive a project name from '{path}'")]
    InvalidTargetName { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPlaceholder { key, .. } => vec![
                format!("Placeholder '{}' is written as {{{}}} in templates", key, key),
                "Placeholder names must be non-empty and must not contain '{' or '}'".into(),
            ],
            Self::InvalidPlanEntry { .. } | Self::AbsolutePathNotAllowed { .. } => vec![
                "Plan paths are relative to the source or target root".into(),
                "Remove leading '/' and any '..' components".into(),
            ],
            Self::DuplicateTarget { path } => vec![
                format!("'{}' is produced by more than one plan entry", path),
                "Give every copy and template a distinct target".into(),
            ],
            Self::EmptyPlan => vec![
                "The source tree contains nothing to install".into(),
                "Add files to the source directory or a devkit.toml manifest".into(),
            ],
            Self::InvalidManifest(_) => vec![
                "Check the syntax of devkit.toml in the source directory".into(),
                "Supported keys: directories, [[copy]], [[template]]".into(),
            ],
            Self::UnknownCheck(_) => vec![
                "Known checks: exists, is-file, is-directory, is-readable, is-writable".into(),
            ],
            Self::InvalidTargetName { .. } => vec![
                "Install into a named directory, e.g. --target ./acme-widgets".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownCheck(_) => ErrorCategory::NotFound,
            _ => ErrorCategory::Validation,
        }
    }
}

/// Coarse classification shared by every core error; the CLI maps it onto
/// exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
