//! No-clobber rename helper.
//! - Refuses when anything already exists at the destination.
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::path::Path;

use crate::errors::{RenamerError, Result};

/// Rename `src` to `dst` within one volume, failing with `DestinationExists`
/// instead of replacing whatever is already at `dst`.
///
/// std's rename would silently replace a file (or an empty directory on Unix),
/// so existence is checked first. The working directory is assumed to be under
/// exclusive control for the duration of a run.
pub fn rename_no_clobber(src: &Path, dst: &Path) -> Result<()> {
    if fs::symlink_metadata(dst).is_ok() {
        return Err(RenamerError::DestinationExists(dst.to_path_buf()));
    }

    fs::rename(src, dst).map_err(RenamerError::io("rename", src))?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // Ignore fsync errors to avoid turning a successful rename into a failure.
        let _ = fs::File::open(parent).and_then(|d| d.sync_all());
    }

    Ok(())
}
