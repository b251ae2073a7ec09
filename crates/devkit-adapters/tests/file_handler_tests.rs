//! File handler behaviour against the real disk.

use std::fs;
use std::path::PathBuf;

use devkit_adapters::{LocalFilesystem, MemoryFilesystem};
use devkit_core::prelude::*;
use tempfile::TempDir;

fn handler() -> FileHandler {
    FileHandler::new(Box::new(LocalFilesystem::new()))
}

fn expect_precondition(err: DevkitError) -> (PathBuf, CheckKind) {
    match err {
        DevkitError::Application(ApplicationError::Precondition { path, check }) => (path, check),
        other => panic!("expected precondition error, got {other:?}"),
    }
}

// ── predicates ────────────────────────────────────────────────────────────────

#[test]
fn predicates_on_missing_path() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing");
    let files = handler();

    for kind in CheckKind::ALL {
        if kind == CheckKind::IsWritable {
            continue;
        }
        assert!(!files.check(kind, &missing, false).unwrap(), "{kind}");
        let (path, check) = expect_precondition(files.check(kind, &missing, true).unwrap_err());
        assert_eq!(path, missing);
        assert_eq!(check, CheckKind::Exists);
    }
}

#[test]
fn missing_path_under_writable_directory_is_writable() {
    let temp = TempDir::new().unwrap();
    let files = handler();

    assert!(files.is_writable(temp.path().join("a/b/c.txt"), true).unwrap());
}

#[test]
fn file_and_directory_checks_distinguish_types() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("f.txt");
    fs::write(&file, "x").unwrap();
    let files = handler();

    assert!(files.is_file(&file, true).unwrap());
    assert!(files.is_directory(temp.path(), true).unwrap());
    assert!(!files.is_directory(&file, false).unwrap());

    let err = files.is_directory(&file, true).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("File '{}' exists but is not a directory.", file.display())
    );
}

// ── directory ─────────────────────────────────────────────────────────────────

#[test]
fn directory_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a/b/c");
    let files = handler();

    let first = files.directory(&path).unwrap();
    let second = files.directory(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, fs::canonicalize(&path).unwrap());
    assert!(path.is_dir());
}

#[test]
fn directory_on_existing_file_fails() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("f");
    fs::write(&file, "x").unwrap();

    let (path, check) = expect_precondition(handler().directory(&file).unwrap_err());
    assert_eq!(path, file);
    assert_eq!(check, CheckKind::IsDirectory);
}

#[cfg(unix)]
#[test]
fn directory_under_read_only_parent_names_requested_path() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let ro = temp.path().join("ro");
    fs::create_dir(&ro).unwrap();
    fs::set_permissions(&ro, fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users ignore permission bits.
    if fs::File::create(ro.join("probe")).is_ok() {
        fs::set_permissions(&ro, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let target = ro.join("sub");
    let err = handler().directory(&target).unwrap_err();
    fs::set_permissions(&ro, fs::Permissions::from_mode(0o755)).unwrap();

    match err {
        DevkitError::Application(ApplicationError::DirectoryCreation { path, .. }) => {
            assert_eq!(path, target)
        }
        other => panic!("expected directory creation error, got {other:?}"),
    }
}

#[test]
fn directory_under_locked_parent_names_requested_path() {
    let memory = MemoryFilesystem::new();
    memory.add_dir("/srv/ro").set_read_only("/srv/ro");
    let files = FileHandler::new(Box::new(memory.clone()));

    let err = files.directory("/srv/ro/sub/deeper").unwrap_err();

    match err {
        DevkitError::Application(ApplicationError::DirectoryCreation { path, reason }) => {
            assert_eq!(path, PathBuf::from("/srv/ro/sub/deeper"));
            assert!(reason.contains("Permission denied"));
        }
        other => panic!("expected directory creation error, got {other:?}"),
    }
    assert!(!memory.is_dir(std::path::Path::new("/srv/ro/sub")));
}

// ── contents ──────────────────────────────────────────────────────────────────

#[test]
fn write_overwrite_append() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("notes.txt");
    let files = handler();

    files.put_contents(&path, "A", false).unwrap();
    assert_eq!(files.get_contents(&path, Offset::START).unwrap(), b"A");

    files.put_contents(&path, "B", false).unwrap();
    assert_eq!(files.get_contents(&path, Offset::START).unwrap(), b"B");

    files.put_contents(&path, "C", true).unwrap();
    assert_eq!(files.get_contents(&path, Offset::START).unwrap(), b"BC");
}

#[test]
fn write_creates_missing_parents() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("deep/er/file.txt");

    handler().put_contents(&path, "x", false).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "x");
}

#[test]
fn read_from_offsets() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("f");
    fs::write(&path, "hello").unwrap();
    let files = handler();

    assert_eq!(files.get_contents(&path, Offset::new(1)).unwrap(), b"ello");
    assert_eq!(files.get_contents(&path, Offset::new(-2)).unwrap(), b"lo");
}

#[test]
fn negative_offset_before_start_is_io_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("f");
    fs::write(&path, "hello").unwrap();

    let err = handler().get_contents(&path, Offset::new(-10)).unwrap_err();
    assert!(matches!(
        err,
        DevkitError::Application(ApplicationError::Io { .. })
    ));
    assert_eq!(
        err.to_string(),
        format!("Failed reading contents from '{}'.", path.display())
    );
}

// ── copy / template ───────────────────────────────────────────────────────────

#[test]
fn copy_preserves_bytes() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("src.bin");
    let target = temp.path().join("out/dst.bin");
    fs::write(&source, [0u8, 159, 146, 150]).unwrap();

    let resolved = handler().copy(&source, &target).unwrap();

    assert_eq!(resolved, fs::canonicalize(&target).unwrap());
    assert_eq!(fs::read(&target).unwrap(), fs::read(&source).unwrap());
}

#[test]
fn template_substitutes_placeholders() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("t.tmpl");
    let target = temp.path().join("t.txt");
    fs::write(&source, "{a}-{b}").unwrap();
    let replacements: Replacements = [("a", "A"), ("b", "B")].into_iter().collect();

    handler().template(&source, &target, &replacements).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "A-B");
}

#[test]
fn template_keeps_non_utf8_bytes() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("LICENSE.tmpl");
    let target = temp.path().join("LICENSE");
    fs::write(&source, b"Copyright {year} \xA9 Acme").unwrap();
    let replacements = Replacements::new().with("year", "2026");

    handler().template(&source, &target, &replacements).unwrap();

    assert_eq!(fs::read(&target).unwrap(), b"Copyright 2026 \xA9 Acme");
}

#[test]
fn relative_strips_matching_prefix() {
    assert_eq!(handler().relative("a/b/c/d", "a/b"), "c/d");
}
