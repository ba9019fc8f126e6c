use std::fs;

use dirhttpd::docroot::{DocumentRoot, EntryKind, Resource};
use tempfile::TempDir;

fn site() -> (TempDir, DocumentRoot) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"0123456789").unwrap();
    fs::write(dir.path().join("index.html"), b"<p>hi</p>").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("nested.png"), b"png").unwrap();
    let root = DocumentRoot::open(dir.path()).unwrap();
    (dir, root)
}

#[test]
fn test_open_rejects_missing_root_and_files() {
    let dir = tempfile::tempdir().unwrap();
    assert!(DocumentRoot::open(dir.path().join("nope")).is_err());

    fs::write(dir.path().join("file"), b"x").unwrap();
    assert!(DocumentRoot::open(dir.path().join("file")).is_err());
}

#[test]
fn test_slash_is_the_root_directory() {
    let (_dir, root) = site();

    match root.resolve(b"/").unwrap() {
        Resource::Directory { entries } => {
            let names: Vec<_> = entries.iter().map(|e| e.name.to_str().unwrap()).collect();
            assert_eq!(names, ["a.txt", "index.html", "sub"]);
            assert_eq!(entries[0].kind, EntryKind::File);
            assert_eq!(entries[0].size, 10);
            assert_eq!(entries[2].kind, EntryKind::Directory);
        }
        other => panic!("expected directory, got {other:?}"),
    }
}

#[test]
fn test_file_has_size_and_content_type() {
    let (_dir, root) = site();

    match root.resolve(b"/index.html").unwrap() {
        Resource::File {
            size, content_type, ..
        } => {
            assert_eq!(size, 9);
            assert_eq!(content_type, "text/html; charset=utf-8");
        }
        other => panic!("expected file, got {other:?}"),
    }

    assert!(matches!(
        root.resolve(b"/sub/nested.png").unwrap(),
        Resource::File { content_type: "image/png", .. }
    ));
}

#[test]
fn test_missing_paths() {
    let (_dir, root) = site();

    assert!(matches!(root.resolve(b"/nope.txt").unwrap(), Resource::Missing));
    assert!(matches!(root.resolve(b"/sub/nope/deeper").unwrap(), Resource::Missing));
    // a file used as a directory
    assert!(matches!(root.resolve(b"/a.txt/more").unwrap(), Resource::Missing));
    // no file name can hold a NUL byte
    assert!(matches!(root.resolve(b"/a.txt\0.png").unwrap(), Resource::Missing));
}

#[test]
fn test_subdirectory_lists_parent_first() {
    let (_dir, root) = site();

    match root.resolve(b"/sub/").unwrap() {
        Resource::Directory { entries } => {
            let names: Vec<_> = entries.iter().map(|e| e.name.to_str().unwrap()).collect();
            assert_eq!(names, ["..", "nested.png"]);
            assert_eq!(entries[0].kind, EntryKind::Directory);
        }
        other => panic!("expected directory, got {other:?}"),
    }
}

#[test]
fn test_paths_escaping_the_root_are_forbidden() {
    let outer = tempfile::tempdir().unwrap();
    let docs = outer.path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(outer.path().join("secret.txt"), b"nope").unwrap();
    let root = DocumentRoot::open(&docs).unwrap();

    assert!(matches!(root.resolve(b"/../secret.txt").unwrap(), Resource::Forbidden));
    assert!(matches!(root.resolve(b"/..").unwrap(), Resource::Forbidden));
}

#[test]
fn test_leading_slashes_do_not_make_paths_absolute() {
    let (_dir, root) = site();
    assert!(matches!(root.resolve(b"//a.txt").unwrap(), Resource::File { .. }));
    assert!(matches!(root.resolve(b"//etc/passwd").unwrap(), Resource::Missing));
}

#[test]
fn test_dot_segments_inside_root_are_fine() {
    let (_dir, root) = site();
    assert!(matches!(
        root.resolve(b"/sub/../a.txt").unwrap(),
        Resource::File { size: 10, .. }
    ));
}

#[cfg(unix)]
#[test]
fn test_symlink_out_of_root_is_forbidden() {
    let outer = tempfile::tempdir().unwrap();
    let docs = outer.path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(outer.path().join("secret.txt"), b"nope").unwrap();
    std::os::unix::fs::symlink(outer.path().join("secret.txt"), docs.join("link")).unwrap();
    let root = DocumentRoot::open(&docs).unwrap();

    assert!(matches!(root.resolve(b"/link").unwrap(), Resource::Forbidden));
}

#[cfg(unix)]
#[test]
fn test_special_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let sock = dir.path().join("control.sock");
    let _listener = std::os::unix::net::UnixListener::bind(&sock).unwrap();
    let root = DocumentRoot::open(dir.path()).unwrap();

    assert!(matches!(root.resolve(b"/control.sock").unwrap(), Resource::Special));

    // and left out of listings
    match root.resolve(b"/").unwrap() {
        Resource::Directory { entries } => assert!(entries.is_empty()),
        other => panic!("expected directory, got {other:?}"),
    }
}
