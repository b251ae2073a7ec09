//! Root error type of `devkit-core`.
//!
//! [`DevkitError`] wraps the domain and application errors so callers deal
//! with a single type; each variant knows its category and what the user
//! can do about it.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

pub use crate::domain::ErrorCategory;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DevkitError {
    /// Invalid plan, manifest, placeholder key or target name.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// A file handler check or operation failed.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// An invariant the code relies on did not hold.
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl DevkitError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec!["Re-run with -vv and include the log in a bug report".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Convenient result type alias.
pub type DevkitResult<T> = Result<T, DevkitError>;
