//! Infrastructure adapters for Devkit.
//!
//! This crate implements the ports defined in `devkit_core::application::ports`
//! and loads install plans from source template trees. It contains all
//! external dependencies and I/O operations.

pub mod filesystem;
pub mod plan_loader;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use plan_loader::{PlanLoader, PlanManifest};
