//! File Handler - validated access to the filesystem.
//!
//! Every disk interaction made by Devkit goes through this service:
//!
//! 1. Predicate checks (`exists`, `is_file`, `is_directory`, `is_readable`,
//!    `is_writable`), each in a returning or a requiring mode
//! 2. Content read/write
//! 3. Recursive directory creation
//! 4. File copy and template rendering
//! 5. Positional relative paths
//!
//! Requiring-mode checks raise `ApplicationError::Precondition`; failed
//! operations raise `ApplicationError::Io` or
//! `ApplicationError::DirectoryCreation`. Nothing is retried and nothing is
//! cached between calls.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{CheckKind, DomainValidator, Offset, Replacements, positional_relative},
    error::{DevkitError, DevkitResult},
};

/// Validated filesystem access on top of a [`Filesystem`] adapter.
pub struct FileHandler {
    filesystem: Box<dyn Filesystem>,
}

impl FileHandler {
    /// Create a file handler over the given adapter.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use devkit_core::application::FileHandler;
    ///
    /// let files = FileHandler::new(Box::new(filesystem)); // impl Filesystem
    /// files.put_contents("out/notes.txt", "A", false)?;
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    // -------------------------------------------------------------------------
    // Predicate checks
    // -------------------------------------------------------------------------

    /// Run the predicate named by `kind`.
    pub fn check(
        &self,
        kind: CheckKind,
        path: impl AsRef<Path>,
        require: bool,
    ) -> DevkitResult<bool> {
        match kind {
            CheckKind::Exists => self.exists(path, require),
            CheckKind::IsFile => self.is_file(path, require),
            CheckKind::IsDirectory => self.is_directory(path, require),
            CheckKind::IsReadable => self.is_readable(path, require),
            CheckKind::IsWritable => self.is_writable(path, require),
        }
    }

    pub fn exists(&self, path: impl AsRef<Path>, require: bool) -> DevkitResult<bool> {
        let path = path.as_ref();
        let result = self.filesystem.exists(path);
        enforce(result, require, path, CheckKind::Exists)
    }

    pub fn is_file(&self, path: impl AsRef<Path>, require: bool) -> DevkitResult<bool> {
        let path = path.as_ref();
        let result = self.exists(path, require)? && self.filesystem.is_file(path);
        enforce(result, require, path, CheckKind::IsFile)
    }

    pub fn is_directory(&self, path: impl AsRef<Path>, require: bool) -> DevkitResult<bool> {
        let path = path.as_ref();
        let result = self.exists(path, require)? && self.filesystem.is_dir(path);
        enforce(result, require, path, CheckKind::IsDirectory)
    }

    pub fn is_readable(&self, path: impl AsRef<Path>, require: bool) -> DevkitResult<bool> {
        let path = path.as_ref();
        let result = self.exists(path, require)? && self.filesystem.is_readable(path);
        enforce(result, require, path, CheckKind::IsReadable)
    }

    /// Writable means the path itself is writable or, failing that, the
    /// nearest parent that is. The walk ends at the filesystem root, or at
    /// `.` for relative paths.
    pub fn is_writable(&self, path: impl AsRef<Path>, require: bool) -> DevkitResult<bool> {
        let path = path.as_ref();
        let result = path.ancestors().any(|candidate| {
            let candidate = if candidate.as_os_str().is_empty() {
                Path::new(".")
            } else {
                candidate
            };
            self.filesystem.is_writable(candidate)
        });
        enforce(result, require, path, CheckKind::IsWritable)
    }

    // -------------------------------------------------------------------------
    // Content
    // -------------------------------------------------------------------------

    /// Read from `offset` to end of file.
    ///
    /// Negative offsets count back from the end; one reaching before the
    /// first byte fails like any other read error.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), offset = %offset))]
    pub fn get_contents(&self, path: impl AsRef<Path>, offset: Offset) -> DevkitResult<Vec<u8>> {
        let path = path.as_ref();
        self.is_file(path, true)?;
        self.is_readable(path, true)?;

        let contents = self.filesystem.read(path, offset).map_err(|e| {
            io_error(
                format!("Failed reading contents from '{}'.", path.display()),
                e,
            )
        })?;
        debug!(bytes = contents.len(), "read contents");
        Ok(contents)
    }

    /// Write `contents`, replacing the file or appending to it.
    ///
    /// The parent directory is created when missing.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), append = append))]
    pub fn put_contents(
        &self,
        path: impl AsRef<Path>,
        contents: impl AsRef<[u8]>,
        append: bool,
    ) -> DevkitResult<()> {
        let path = path.as_ref();
        let contents = contents.as_ref();
        self.is_writable(path, true)?;
        self.directory(parent_dir(path))?;

        self.filesystem.write(path, contents, append).map_err(|e| {
            io_error(
                format!("Failed writing contents to '{}'.", path.display()),
                e,
            )
        })?;
        debug!(bytes = contents.len(), "wrote contents");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Materialization
    // -------------------------------------------------------------------------

    /// Render `source` into `target`, substituting every `{key}` in order.
    ///
    /// Returns the canonical target path, or `target` as given when it
    /// cannot be resolved.
    #[instrument(
        skip_all,
        fields(
            source = %source.as_ref().display(),
            target = %target.as_ref().display(),
            replacements = replacements.len()
        )
    )]
    pub fn template(
        &self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
        replacements: &Replacements,
    ) -> DevkitResult<PathBuf> {
        let source = source.as_ref();
        let target = target.as_ref();
        DomainValidator::validate_replacements(replacements).map_err(DevkitError::Domain)?;

        let raw = self.get_contents(source, Offset::START)?;
        self.put_contents(target, replacements.apply(raw), false)?;
        let resolved = self.canonical(target);
        info!(target = %resolved.display(), "rendered template");
        Ok(resolved)
    }

    /// Copy `source` to `target` byte-for-byte.
    ///
    /// Returns the canonical target path, or `target` as given when it
    /// cannot be resolved.
    #[instrument(
        skip_all,
        fields(source = %source.as_ref().display(), target = %target.as_ref().display())
    )]
    pub fn copy(&self, source: impl AsRef<Path>, target: impl AsRef<Path>) -> DevkitResult<PathBuf> {
        let source = source.as_ref();
        let target = target.as_ref();
        self.is_readable(source, true)?;
        self.is_writable(target, true)?;
        self.directory(parent_dir(target))?;

        self.filesystem.copy(source, target).map_err(|e| {
            io_error(
                format!(
                    "Failed copy file '{}' to '{}'.",
                    source.display(),
                    target.display()
                ),
                e,
            )
        })?;
        let resolved = self.canonical(target);
        info!(target = %resolved.display(), "copied file");
        Ok(resolved)
    }

    /// Ensure `path` is a directory, creating it and any missing ancestors.
    ///
    /// An existing non-directory is a precondition failure. Calling this
    /// twice returns the same canonical path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn directory(&self, path: impl AsRef<Path>) -> DevkitResult<PathBuf> {
        let path = path.as_ref();
        if self.exists(path, false)? {
            self.is_directory(path, true)?;
            debug!("directory already exists");
        } else {
            self.filesystem.create_dir_all(path).map_err(|e| {
                ApplicationError::DirectoryCreation {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            })?;
            info!("created directory");
        }
        Ok(self.canonical(path))
    }

    /// `path` relative to `basepath`, compared segment by segment at equal
    /// positions. See [`positional_relative`].
    pub fn relative(&self, path: &str, basepath: &str) -> String {
        positional_relative(path, basepath)
    }

    /// Canonical form of `path`, or `path` as given when it cannot be
    /// resolved.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.canonical(path.as_ref())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn canonical(&self, path: &Path) -> PathBuf {
        self.filesystem
            .canonicalize(path)
            .unwrap_or_else(|| path.to_path_buf())
    }
}

/// Shared two-mode validation: hand back `result`, or raise when it is false
/// and the caller requires it.
fn enforce(result: bool, require: bool, path: &Path, check: CheckKind) -> DevkitResult<bool> {
    if result || !require {
        return Ok(result);
    }
    Err(ApplicationError::Precondition {
        path: path.to_path_buf(),
        check,
    }
    .into())
}

fn io_error(message: String, cause: DevkitError) -> DevkitError {
    ApplicationError::Io {
        message,
        reason: cause.to_string(),
    }
    .into()
}

/// Directory holding `path`; `.` for bare relative names.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        Some(_) => Path::new("."),
        None => path,
    }
}
