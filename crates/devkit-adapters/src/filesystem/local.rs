//! Local filesystem adapter using std::fs.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::trace;

use devkit_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::Offset,
    error::{DevkitError, DevkitResult},
};

/// Production filesystem implementation using `std::fs`.
///
/// Every call goes straight to the operating system; nothing is cached.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_readable(&self, path: &Path) -> bool {
        if path.is_dir() {
            fs::read_dir(path).is_ok()
        } else {
            File::open(path).is_ok()
        }
    }

    fn is_writable(&self, path: &Path) -> bool {
        let writable = write_access(path);
        trace!(path = %path.display(), writable, "write access");
        writable
    }

    fn read(&self, path: &Path, offset: Offset) -> DevkitResult<Vec<u8>> {
        let mut file = File::open(path).map_err(|e| map_io_error(path, e, "open file"))?;
        let len = file
            .metadata()
            .map_err(|e| map_io_error(path, e, "get metadata"))?
            .len();

        let start = offset.resolve(len).ok_or_else(|| -> DevkitError {
            ApplicationError::Filesystem {
                path: path.to_path_buf(),
                reason: format!("offset {offset} is before the start of a {len} byte file"),
            }
            .into()
        })?;

        file.seek(SeekFrom::Start(start))
            .map_err(|e| map_io_error(path, e, "seek"))?;
        let mut buf = Vec::with_capacity((len - start) as usize);
        file.read_to_end(&mut buf)
            .map_err(|e| map_io_error(path, e, "read file"))?;
        Ok(buf)
    }

    fn write(&self, path: &Path, content: &[u8], append: bool) -> DevkitResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .map_err(|e| map_io_error(path, e, "open file for writing"))?;
        file.write_all(content)
            .map_err(|e| map_io_error(path, e, "write file"))
    }

    fn copy(&self, source: &Path, target: &Path) -> DevkitResult<()> {
        fs::copy(source, target)
            .map(|_| ())
            .map_err(|e| map_io_error(target, e, "copy file"))
    }

    fn create_dir_all(&self, path: &Path) -> DevkitResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn canonicalize(&self, path: &Path) -> Option<PathBuf> {
        fs::canonicalize(path).ok()
    }
}

/// Native write permission check. Never touches the disk; a missing path
/// is not writable.
#[cfg(unix)]
fn write_access(path: &Path) -> bool {
    use rustix::fs::{Access, access};

    access(path, Access::WRITE_OK).is_ok()
}

#[cfg(not(unix))]
fn write_access(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| !meta.permissions().readonly())
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> DevkitError {
    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn predicates_on_missing_path_are_false() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let fs = LocalFilesystem::new();

        assert!(!fs.exists(&missing));
        assert!(!fs.is_file(&missing));
        assert!(!fs.is_dir(&missing));
        assert!(!fs.is_readable(&missing));
        assert!(!fs.is_writable(&missing));
    }

    #[test]
    fn write_check_leaves_directory_untouched() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("keep.txt"), "x").unwrap();
        let before = std::fs::metadata(temp.path()).unwrap().modified().unwrap();
        let fs = LocalFilesystem::new();

        assert!(fs.is_writable(temp.path()));
        assert!(fs.is_writable(&temp.path().join("keep.txt")));
        assert!(!fs.is_writable(&temp.path().join("new.txt")));

        let entries: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, [std::ffi::OsString::from("keep.txt")]);
        let after = std::fs::metadata(temp.path()).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }

    #[cfg(unix)]
    #[test]
    fn write_check_follows_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("locked.txt");
        std::fs::write(&path, "x").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o444)).unwrap();
        let fs = LocalFilesystem::new();

        // Privileged users ignore permission bits.
        let privileged = OpenOptions::new().append(true).open(&path).is_ok();
        assert_eq!(fs.is_writable(&path), privileged);
    }

    #[test]
    fn read_honours_offsets() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("f");
        std::fs::write(&path, "hello world").unwrap();
        let fs = LocalFilesystem::new();

        assert_eq!(fs.read(&path, Offset::new(6)).unwrap(), b"world");
        assert_eq!(fs.read(&path, Offset::new(-5)).unwrap(), b"world");
        assert_eq!(fs.read(&path, Offset::new(100)).unwrap(), b"");
        assert!(fs.read(&path, Offset::new(-100)).is_err());
    }

    #[test]
    fn write_truncates_or_appends() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("f");
        let fs = LocalFilesystem::new();

        fs.write(&path, b"long content", false).unwrap();
        fs.write(&path, b"A", false).unwrap();
        fs.write(&path, b"B", true).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"AB");
    }

    #[test]
    fn write_without_parent_is_filesystem_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("no/such/dir/f");
        let fs = LocalFilesystem::new();

        assert!(matches!(
            fs.write(&path, b"x", false),
            Err(DevkitError::Application(ApplicationError::Filesystem { .. }))
        ));
    }

    #[test]
    fn canonicalize_missing_path_is_none() {
        let fs = LocalFilesystem::new();
        assert!(fs.canonicalize(Path::new("/definitely/not/here")).is_none());
    }
}
