//! scaffold::rewrite
//!
//! Literal replacement of the template's module path across a tree.
//!
//! # Design
//!
//! The module path is a namespaced string that does not collide with
//! unrelated text, so a plain byte-level substitution is enough. There is
//! no templating and no regex.
//!
//! Every matching file is read and written back, including files with no
//! occurrence; those come out byte-identical. Hidden files are rewritten
//! like any other.
//!
//! # Failure
//!
//! The first read or write error stops the walk. Files already rewritten
//! stay rewritten.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use super::walk::{self, IoFailure, Visit};

/// Extensions of source files that may import the module path.
pub const SOURCE_EXTENSIONS: &[&str] = &["go", "templ"];

/// Name of the Go module manifest.
pub const MANIFEST_FILE: &str = "go.mod";

/// Outcome of a rewrite pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Files read and written back
    pub files_visited: usize,
    /// Files that contained at least one occurrence
    pub files_changed: usize,
    /// Total occurrences replaced
    pub replacements: usize,
    /// Whether the top-level manifest was among the rewritten files
    pub manifest_rewritten: bool,
}

/// Check whether a file takes part in the rewrite.
pub fn is_rewritable(path: &Path) -> bool {
    if path.file_name() == Some(OsStr::new(MANIFEST_FILE)) {
        return true;
    }
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Replace `old` with `new` in every rewritable file below `root`.
///
/// # Errors
///
/// Returns an [`IoFailure`] naming the first file or directory that could
/// not be read or written.
pub fn rewrite_identity(root: &Path, old: &str, new: &str) -> Result<RewriteSummary, IoFailure> {
    let mut summary = RewriteSummary::default();

    walk::walk(root, |entry| {
        if entry.is_dir() || !is_rewritable(entry.path) {
            return Ok(Visit::Continue);
        }

        let replaced = rewrite_file(entry.path, old, new)?;
        summary.files_visited += 1;
        summary.replacements += replaced;
        if replaced > 0 {
            summary.files_changed += 1;
        }
        if entry.relative == Path::new(MANIFEST_FILE) {
            summary.manifest_rewritten = true;
        }
        Ok(Visit::Continue)
    })?;

    Ok(summary)
}

/// Rewrite a single file in place, returning the number of replacements.
///
/// The file is written back even when nothing matched.
pub fn rewrite_file(path: &Path, old: &str, new: &str) -> Result<usize, IoFailure> {
    let content = fs::read(path).map_err(IoFailure::at("read", path))?;
    let (updated, count) = replace_literal(&content, old.as_bytes(), new.as_bytes());
    fs::write(path, updated).map_err(IoFailure::at("write", path))?;
    Ok(count)
}

/// Replace every non-overlapping occurrence of `needle`, left to right.
///
/// An empty needle matches nothing.
pub fn replace_literal(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> (Vec<u8>, usize) {
    if needle.is_empty() || needle.len() > haystack.len() {
        return (haystack.to_vec(), 0);
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut count = 0;
    let mut i = 0;

    while i + needle.len() <= haystack.len() {
        if haystack[i..].starts_with(needle) {
            out.extend_from_slice(replacement);
            i += needle.len();
            count += 1;
        } else {
            out.push(haystack[i]);
            i += 1;
        }
    }
    out.extend_from_slice(&haystack[i..]);

    (out, count)
}
