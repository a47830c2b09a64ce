//! scaffold::walk
//!
//! Recursive directory traversal shared by the tree-mutating steps.
//!
//! # Design
//!
//! [`walk`] visits every entry below a root in the order the directory
//! listing yields them. The visitor decides per entry whether to descend
//! (for directories) and may abort the whole walk by returning an error.
//! Entries are reported with both their absolute path and their path
//! relative to the root so that callers can mirror them elsewhere.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Name prefix marking an entry as hidden.
pub const HIDDEN_PREFIX: char = '.';

/// A filesystem operation that failed on a specific path.
#[derive(Debug, Error)]
#[error("failed to {op} '{}'", path.display())]
pub struct IoFailure {
    /// What was being attempted ("read", "write", ...)
    pub op: &'static str,
    /// The offending path
    pub path: PathBuf,
    /// The underlying error
    #[source]
    pub source: io::Error,
}

impl IoFailure {
    /// Build a failure for `op` on `path`.
    pub fn new(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            op,
            path: path.into(),
            source,
        }
    }

    /// Adapter for `map_err`.
    pub fn at<'a>(op: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> Self + 'a {
        move |source| Self::new(op, path, source)
    }
}

/// Kind of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    /// A directory; the walk may descend into it
    Dir,
    /// Anything else (regular file, symlink, ...)
    File,
}

/// An entry encountered during a walk.
#[derive(Debug)]
pub struct Entry<'a> {
    /// Absolute (root-joined) path of the entry
    pub path: &'a Path,
    /// Path relative to the walk root
    pub relative: &'a Path,
    /// Directory or leaf
    pub kind: EntryKind,
}

impl Entry<'_> {
    /// Final path component.
    pub fn name(&self) -> &OsStr {
        self.path.file_name().unwrap_or_default()
    }

    /// Whether the entry name carries the hidden prefix.
    pub fn is_hidden(&self) -> bool {
        is_hidden_name(self.name())
    }

    /// Whether the entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// Visitor decision for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Continue; descend if the entry is a directory
    Continue,
    /// Do not descend into this directory
    SkipDir,
}

/// Check whether a file name is hidden.
pub fn is_hidden_name(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with(HIDDEN_PREFIX)
}

/// Walk every entry below `root`, depth first.
///
/// The root itself is not reported. A directory is reported before its
/// children.
///
/// # Errors
///
/// Returns the first [`IoFailure`] from listing a directory or from the
/// visitor; the walk stops there.
pub fn walk<F>(root: &Path, mut visit: F) -> Result<(), IoFailure>
where
    F: FnMut(&Entry<'_>) -> Result<Visit, IoFailure>,
{
    walk_dir(root, Path::new(""), &mut visit)
}

fn walk_dir<F>(root: &Path, relative_dir: &Path, visit: &mut F) -> Result<(), IoFailure>
where
    F: FnMut(&Entry<'_>) -> Result<Visit, IoFailure>,
{
    let dir = root.join(relative_dir);
    let entries = fs::read_dir(&dir).map_err(IoFailure::at("list directory", &dir))?;

    for dir_entry in entries {
        let dir_entry = dir_entry.map_err(IoFailure::at("list directory", &dir))?;
        let path = dir_entry.path();
        let file_type = dir_entry
            .file_type()
            .map_err(IoFailure::at("inspect", &path))?;
        let relative = relative_dir.join(dir_entry.file_name());

        let kind = if file_type.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };

        let entry = Entry {
            path: &path,
            relative: &relative,
            kind,
        };

        if visit(&entry)? == Visit::Continue && kind == EntryKind::Dir {
            walk_dir(root, &relative, visit)?;
        }
    }

    Ok(())
}
