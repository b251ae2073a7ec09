//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use devkit_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::Offset,
    error::DevkitResult,
};

/// In-memory filesystem for testing.
///
/// Paths are taken literally: no normalization, no symlinks. The empty path,
/// `.` and filesystem roots are always present directories. Permissions are
/// simulated with [`set_read_only`](Self::set_read_only) and
/// [`set_unreadable`](Self::set_unreadable).
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
    read_only: HashSet<PathBuf>,
    unreadable: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn is_dir(&self, path: &Path) -> bool {
        is_implicit_dir(path) || self.directories.contains(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.is_dir(path)
    }

    fn parent_is_dir(&self, path: &Path) -> bool {
        path.parent().is_none_or(|parent| self.is_dir(parent))
    }
}

fn is_implicit_dir(path: &Path) -> bool {
    path.as_os_str().is_empty() || path == Path::new(".") || path.parent().is_none()
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories.
    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl AsRef<[u8]>) -> &Self {
        let path = path.into();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path, content.as_ref().to_vec());
        }
        self
    }

    /// Seed a directory and its ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            insert_ancestors(&mut inner.directories, path.as_ref());
        }
        self
    }

    /// Deny writes to `path` (a file, or creating entries in a directory).
    pub fn set_read_only(&self, path: impl Into<PathBuf>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.read_only.insert(path.into());
        }
        self
    }

    /// Deny reads of `path`.
    pub fn set_unreadable(&self, path: impl Into<PathBuf>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.unreadable.insert(path.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// Read a file's content as text (testing helper).
    pub fn read_to_string(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read_file(path).and_then(|b| String::from_utf8(b).ok())
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self
            .inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default();
        files.sort();
        files
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.directories.clear();
            inner.read_only.clear();
            inner.unreadable.clear();
        }
    }

    fn read_lock(&self) -> DevkitResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }

    fn write_lock(&self) -> DevkitResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }

    fn probe(&self, f: impl FnOnce(&MemoryFilesystemInner) -> bool) -> bool {
        self.inner.read().map(|inner| f(&inner)).unwrap_or(false)
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.probe(|inner| inner.exists(path))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.probe(|inner| inner.files.contains_key(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.probe(|inner| inner.is_dir(path))
    }

    fn is_readable(&self, path: &Path) -> bool {
        self.probe(|inner| inner.exists(path) && !inner.unreadable.contains(path))
    }

    fn is_writable(&self, path: &Path) -> bool {
        self.probe(|inner| inner.exists(path) && !inner.read_only.contains(path))
    }

    fn read(&self, path: &Path, offset: Offset) -> DevkitResult<Vec<u8>> {
        let inner = self.read_lock()?;
        let content = inner
            .files
            .get(path)
            .filter(|_| !inner.unreadable.contains(path))
            .ok_or_else(|| fs_error(path, "File not found or unreadable"))?;

        let start = offset
            .resolve(content.len() as u64)
            .ok_or_else(|| fs_error(path, "Offset before start of file"))?;
        Ok(content[start as usize..].to_vec())
    }

    fn write(&self, path: &Path, content: &[u8], append: bool) -> DevkitResult<()> {
        let mut inner = self.write_lock()?;

        if !inner.parent_is_dir(path) {
            return Err(fs_error(path, "Parent directory does not exist"));
        }
        if inner.is_dir(path) {
            return Err(fs_error(path, "Is a directory"));
        }
        let parent_locked = path
            .parent()
            .is_some_and(|parent| inner.read_only.contains(parent));
        if inner.read_only.contains(path) || (parent_locked && !inner.files.contains_key(path)) {
            return Err(fs_error(path, "Permission denied"));
        }

        let file = inner.files.entry(path.to_path_buf()).or_default();
        if !append {
            file.clear();
        }
        file.extend_from_slice(content);
        Ok(())
    }

    fn copy(&self, source: &Path, target: &Path) -> DevkitResult<()> {
        let content = self.read(source, Offset::START)?;
        self.write(target, &content, false)
    }

    fn create_dir_all(&self, path: &Path) -> DevkitResult<()> {
        let mut inner = self.write_lock()?;

        for ancestor in path.ancestors() {
            if inner.files.contains_key(ancestor) {
                return Err(fs_error(ancestor, "Not a directory"));
            }
            if inner.read_only.contains(ancestor) {
                return Err(fs_error(ancestor, "Permission denied"));
            }
            if inner.is_dir(ancestor) {
                break;
            }
        }

        insert_ancestors(&mut inner.directories, path);
        Ok(())
    }

    fn canonicalize(&self, path: &Path) -> Option<PathBuf> {
        let inner = self.inner.read().ok()?;
        (path.is_absolute() && inner.exists(path)).then(|| path.to_path_buf())
    }
}

fn insert_ancestors(directories: &mut HashSet<PathBuf>, path: &Path) {
    for ancestor in path.ancestors() {
        if is_implicit_dir(ancestor) {
            break;
        }
        directories.insert(ancestor.to_path_buf());
    }
}

fn fs_error(path: &Path, reason: &str) -> devkit_core::error::DevkitError {
    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_file_creates_parents() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/tpl/src/main.rs", "fn main() {}");

        assert!(fs.is_dir(Path::new("/tpl")));
        assert!(fs.is_dir(Path::new("/tpl/src")));
        assert!(fs.is_file(Path::new("/tpl/src/main.rs")));
        assert!(!fs.is_dir(Path::new("/tpl/src/main.rs")));
    }

    #[test]
    fn root_and_current_directory_always_exist() {
        let fs = MemoryFilesystem::new();
        assert!(fs.is_dir(Path::new("/")));
        assert!(fs.is_dir(Path::new(".")));
        assert!(fs.is_writable(Path::new(".")));
    }

    #[test]
    fn read_only_directory_blocks_creation_below_it() {
        let fs = MemoryFilesystem::new();
        fs.add_dir("/ro").set_read_only("/ro");

        assert!(!fs.is_writable(Path::new("/ro")));
        assert!(fs.create_dir_all(Path::new("/ro/sub")).is_err());
        assert!(!fs.exists(Path::new("/ro/sub")));
    }

    #[test]
    fn write_requires_existing_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write(Path::new("/a/b"), b"x", false).is_err());

        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.write(Path::new("/a/b"), b"x", false).unwrap();
        fs.write(Path::new("/a/b"), b"y", true).unwrap();
        assert_eq!(fs.read_to_string("/a/b").as_deref(), Some("xy"));
    }

    #[test]
    fn unreadable_file_cannot_be_read_or_copied() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/s", "secret").set_unreadable("/s");

        assert!(fs.exists(Path::new("/s")));
        assert!(!fs.is_readable(Path::new("/s")));
        assert!(fs.copy(Path::new("/s"), Path::new("/t")).is_err());
    }

    #[test]
    fn create_dir_over_file_fails() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/f", "");
        assert!(fs.create_dir_all(Path::new("/f/sub")).is_err());
    }

    #[test]
    fn canonicalize_only_resolves_existing_absolute_paths() {
        let fs = MemoryFilesystem::new();
        fs.add_dir("/work");
        assert_eq!(
            fs.canonicalize(Path::new("/work")),
            Some(PathBuf::from("/work"))
        );
        assert_eq!(fs.canonicalize(Path::new("/nope")), None);
        assert_eq!(fs.canonicalize(Path::new("rel")), None);
    }

    #[test]
    fn clear_drops_everything() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/a/b", "x");
        fs.clear();
        assert!(fs.list_files().is_empty());
        assert!(!fs.exists(Path::new("/a")));
    }
}
