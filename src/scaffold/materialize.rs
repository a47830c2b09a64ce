//! scaffold::materialize
//!
//! Copy a staged tree into its final location.
//!
//! # Rules
//!
//! - Directories are created under the destination (with any missing
//!   ancestors) and then recursed into.
//! - Hidden entries, files or directories whose name starts with `.`, are
//!   skipped without error and never appear in the destination.
//! - Every other file is read in full and written to the mirrored path,
//!   replacing whatever was there. Unix permission bits are carried over so
//!   that scripts stay executable; the owner always keeps write access so a
//!   later run can overwrite the copy.
//!
//! The first failure aborts the copy; the destination may then be left
//! partially populated.

use std::fs;
use std::path::Path;

use super::walk::{self, IoFailure, Visit};

/// Outcome of a materialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeSummary {
    /// Regular files written to the destination
    pub files_copied: usize,
    /// Directories created or reused in the destination
    pub dirs_created: usize,
    /// Hidden entries left behind
    pub hidden_skipped: usize,
}

/// Mirror `src` into `dst`, skipping hidden entries.
///
/// `dst` itself must already exist.
///
/// # Errors
///
/// Returns an [`IoFailure`] naming the path that could not be read,
/// created, or written.
pub fn materialize(src: &Path, dst: &Path) -> Result<MaterializeSummary, IoFailure> {
    let mut summary = MaterializeSummary::default();

    walk::walk(src, |entry| {
        if entry.is_hidden() {
            summary.hidden_skipped += 1;
            return Ok(Visit::SkipDir);
        }

        let target = dst.join(entry.relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(IoFailure::at("create directory", &target))?;
            summary.dirs_created += 1;
        } else {
            copy_file(entry.path, &target)?;
            summary.files_copied += 1;
        }

        Ok(Visit::Continue)
    })?;

    Ok(summary)
}

fn copy_file(from: &Path, to: &Path) -> Result<(), IoFailure> {
    let content = fs::read(from).map_err(IoFailure::at("read", from))?;
    fs::write(to, content).map_err(IoFailure::at("write", to))?;

    let permissions = fs::metadata(from)
        .map_err(IoFailure::at("inspect", from))?
        .permissions();
    fs::set_permissions(to, owner_writable(permissions))
        .map_err(IoFailure::at("set permissions on", to))?;

    Ok(())
}

#[cfg(unix)]
fn owner_writable(mut permissions: fs::Permissions) -> fs::Permissions {
    use std::os::unix::fs::PermissionsExt;

    permissions.set_mode(permissions.mode() | 0o200);
    permissions
}

#[cfg(not(unix))]
fn owner_writable(mut permissions: fs::Permissions) -> fs::Permissions {
    permissions.set_readonly(false);
    permissions
}
