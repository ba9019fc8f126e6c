use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::http::mime;

/// What a directory entry turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: OsString,
    pub kind: EntryKind,
    /// File size, or the directory's own metadata size (not recursive).
    pub size: u64,
}

/// Result of resolving a request path against the document root.
#[derive(Debug)]
pub enum Resource {
    File {
        path: PathBuf,
        size: u64,
        content_type: &'static str,
    },
    Directory {
        /// `..` first for anything below the root, then entries sorted by
        /// name, byte-wise.
        entries: Vec<DirEntry>,
    },
    Missing,
    /// Exists but is neither a regular file nor a directory.
    Special,
    /// Resolves outside the document root.
    Forbidden,
}

/// The directory all request paths are resolved against.
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    root: PathBuf,
}

impl DocumentRoot {
    /// Canonicalizes `path`, which must name an existing directory.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let root = fs::canonicalize(path)
            .with_context(|| format!("document root {} is not accessible", path.display()))?;

        if !root.is_dir() {
            anyhow::bail!("document root {} is not a directory", root.display());
        }

        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Maps a decoded request path to a filesystem entry.
    ///
    /// `/` is the root itself. Otherwise leading slashes are stripped and the
    /// rest is taken relative to the root. The joined path is canonicalized
    /// so `..` segments and symlinks are followed before the containment
    /// check.
    pub fn resolve(&self, decoded: &[u8]) -> io::Result<Resource> {
        let relative = trim_leading_slashes(decoded);
        let candidate = if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(bytes_to_os_str(relative))
        };

        let canonical = match fs::canonicalize(&candidate) {
            Ok(p) => p,
            Err(e) if is_missing(&e) => return Ok(Resource::Missing),
            Err(e) => return Err(e),
        };

        if !canonical.starts_with(&self.root) {
            tracing::warn!(path = %candidate.display(), "request escapes the document root");
            return Ok(Resource::Forbidden);
        }

        let meta = match fs::metadata(&canonical) {
            Ok(m) => m,
            Err(e) if is_missing(&e) => return Ok(Resource::Missing),
            Err(e) => return Err(e),
        };

        if meta.is_dir() {
            let mut entries = read_entries(&canonical)?;
            if canonical != self.root {
                entries.insert(0, parent_entry(&canonical)?);
            }
            Ok(Resource::Directory { entries })
        } else if meta.is_file() {
            let content_type = mime::mime_type(&canonical.to_string_lossy());
            Ok(Resource::File {
                path: canonical,
                size: meta.len(),
                content_type,
            })
        } else {
            Ok(Resource::Special)
        }
    }
}

fn is_missing(e: &io::Error) -> bool {
    // ENOTDIR shows up when a path goes "through" a regular file, and an
    // embedded NUL byte is InvalidInput
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory | io::ErrorKind::InvalidInput
    )
}

fn trim_leading_slashes(path: &[u8]) -> &[u8] {
    let start = path.iter().position(|&b| b != b'/').unwrap_or(path.len());
    &path[start..]
}

#[cfg(unix)]
fn bytes_to_os_str(bytes: &[u8]) -> &OsStr {
    use std::os::unix::ffi::OsStrExt;
    OsStr::from_bytes(bytes)
}

#[cfg(not(unix))]
fn bytes_to_os_str(bytes: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(bytes).into_owned())
}

/// The `..` row, sized like any other directory.
fn parent_entry(dir: &Path) -> io::Result<DirEntry> {
    let meta = fs::metadata(dir.join(".."))?;
    Ok(DirEntry {
        name: OsString::from(".."),
        kind: EntryKind::Directory,
        size: meta.len(),
    })
}

fn read_entries(dir: &Path) -> io::Result<Vec<DirEntry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();

        // stat, not lstat: symlinks are listed as whatever they point at
        let meta = match fs::metadata(entry.path()) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!(entry = ?name, error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let kind = if meta.is_dir() {
            EntryKind::Directory
        } else if meta.is_file() {
            EntryKind::File
        } else {
            continue;
        };

        entries.push(DirEntry {
            name,
            kind,
            size: meta.len(),
        });
    }

    entries.sort_by(|a, b| a.name.as_encoded_bytes().cmp(b.name.as_encoded_bytes()));
    Ok(entries)
}
