//! scaffold::strip
//!
//! Removal of version-control metadata from a freshly cloned tree.

use std::fs;
use std::io;
use std::path::Path;

use super::walk::IoFailure;

/// Version-control metadata entry at the top of a clone.
pub const VCS_DIR: &str = ".git";

/// Delete the `.git` entry directly under `root`.
///
/// Returns `true` if something was removed. A missing entry is not an
/// error, so calling this twice is harmless. Only the top level is
/// touched; nested repositories are left alone.
pub fn strip_vcs_metadata(root: &Path) -> Result<bool, IoFailure> {
    let target = root.join(VCS_DIR);

    let metadata = match fs::symlink_metadata(&target) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(IoFailure::new("inspect", target, e)),
    };

    // Worktree checkouts and submodules use a `.git` file instead of a directory.
    if metadata.is_dir() {
        fs::remove_dir_all(&target).map_err(IoFailure::at("remove", &target))?;
    } else {
        fs::remove_file(&target).map_err(IoFailure::at("remove", &target))?;
    }

    Ok(true)
}
