//! Application layer for Devkit.
//!
//! This layer contains:
//! - **Services**: `FileHandler` (validated disk access) and `InstallService`
//!   (the scaffolding workflow)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Pure rules (naming, placeholder substitution, plan validation) live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{FileHandler, InstallReport, InstallRequest, InstallService, InstallStep};

// Re-export port traits (for adapter implementation)
pub use ports::Filesystem;

pub use error::ApplicationError;
