//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `devkit-adapters` crate provides implementations.

use crate::domain::Offset;
use crate::error::DevkitResult;
use std::path::{Path, PathBuf};

/// Port for primitive filesystem operations.
///
/// Implemented by:
/// - `devkit_adapters::filesystem::LocalFilesystem` (production)
/// - `devkit_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Predicates are native and non-recursive; `FileHandler` layers the
///   existence-first and parent-walking rules on top.
/// - No state may be cached between calls: every answer reflects the
///   filesystem at the moment of the call.
/// - Failures are `ApplicationError::Filesystem`; the file handler relabels
///   them as I/O or directory-creation errors.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path exists and can be read.
    fn is_readable(&self, path: &Path) -> bool;

    /// Check if path exists and can be written. Never looks at parents.
    fn is_writable(&self, path: &Path) -> bool;

    /// Read from `offset` to end of file.
    fn read(&self, path: &Path, offset: Offset) -> DevkitResult<Vec<u8>>;

    /// Write content to a file, truncating unless `append` is set.
    /// The parent directory must already exist.
    fn write(&self, path: &Path, content: &[u8], append: bool) -> DevkitResult<()>;

    /// Copy a file byte-for-byte. The target's parent must already exist.
    fn copy(&self, source: &Path, target: &Path) -> DevkitResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> DevkitResult<()>;

    /// Absolute, symlink-resolved form of `path`, if it can be resolved.
    fn canonicalize(&self, path: &Path) -> Option<PathBuf>;
}
