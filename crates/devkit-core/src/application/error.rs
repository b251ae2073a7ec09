//! Application layer errors.
//!
//! These errors represent failures talking to the filesystem, not domain
//! rule violations. Domain errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::CheckKind;
use crate::error::ErrorCategory;

/// Errors raised by the file handler and the services built on it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A requiring-mode check failed.
    #[error("File '{}' {}", .path.display(), .check.unmet())]
    Precondition { path: PathBuf, check: CheckKind },

    /// A read, write or copy failed after its preconditions passed.
    #[error("{message}")]
    Io { message: String, reason: String },

    /// Recursive directory creation failed.
    #[error("Could not create directory '{}'.", .path.display())]
    DirectoryCreation { path: PathBuf, reason: String },

    /// Raw adapter failure, before the file handler labels it.
    #[error("Filesystem error at {}: {reason}", .path.display())]
    Filesystem { path: PathBuf, reason: String },

    /// In-memory adapter state is unusable (lock poisoned).
    #[error("Filesystem state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Precondition { path, check } => match check {
                CheckKind::Exists | CheckKind::IsFile | CheckKind::IsDirectory => vec![
                    format!("Check the path: {}", path.display()),
                    "Verify the source template tree is complete".into(),
                ],
                CheckKind::IsReadable => vec![
                    format!("Grant read permission on {}", path.display()),
                ],
                CheckKind::IsWritable => vec![
                    format!("Grant write permission on {} or its parent", path.display()),
                    "Choose a different --target".into(),
                ],
            },
            Self::Io { reason, .. } => vec![
                format!("Cause: {}", reason),
                "Check available disk space and file permissions".into(),
            ],
            Self::DirectoryCreation { path, reason } => vec![
                format!("Cause: {}", reason),
                format!(
                    "Check that you have write permissions above {}",
                    path.display()
                ),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have the required permissions".into(),
            ],
            Self::LockPoisoned => vec!["This appears to be a bug in Devkit".into()],
        }
    }

    /// Low-level cause carried alongside the message, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Io { reason, .. }
            | Self::DirectoryCreation { reason, .. }
            | Self::Filesystem { reason, .. } => Some(reason),
            Self::Precondition { .. } | Self::LockPoisoned => None,
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Precondition {
                check: CheckKind::Exists,
                ..
            } => ErrorCategory::NotFound,
            Self::Precondition { .. } => ErrorCategory::Validation,
            Self::Io { .. } | Self::DirectoryCreation { .. } | Self::Filesystem { .. } => {
                ErrorCategory::Internal
            }
            Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
