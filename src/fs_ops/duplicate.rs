//! Collision-free naming inside a holding directory.
//!
//! Used by the staging trash: several items with the same name may be trashed
//! over a run (e.g. a `bin` folder from every project), so each gets " (n)"
//! appended before the extension until the name is free.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::errors::{RenamerError, Result};

const MAX_TRIES: u64 = 10_000;

/// Return a path inside `dst_dir` for `name` that does not exist yet.
///
/// Examples:
/// - "bin" -> "bin (2)", "bin (3)", ...
/// - "IMG_0001.CR2" -> "IMG_0001 (2).CR2"
/// - ".env" -> ".env (2)"
///
/// Fails with `DestinationExists` once every numbered name is taken.
pub fn unique_in(dst_dir: &Path, name: &OsStr) -> Result<PathBuf> {
    unique_within(dst_dir, name, MAX_TRIES)
}

fn unique_within(dst_dir: &Path, name: &OsStr, max_tries: u64) -> Result<PathBuf> {
    let candidate = dst_dir.join(name);
    if !exists(&candidate) {
        return Ok(candidate);
    }

    let base = Path::new(name);
    let stem: OsString = base
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| name.to_os_string());
    let ext: Option<OsString> = base.extension().map(|e| e.to_os_string());

    for n in 2..=max_tries {
        let candidate = dst_dir.join(with_suffix(&stem, ext.as_deref(), &format!(" ({n})")));
        if !exists(&candidate) {
            return Ok(candidate);
        }
        if n == 4 {
            trace!(name = ?name, dir = %dst_dir.display(), "duplicate: several collisions, still searching");
        }
    }
    Err(RenamerError::DestinationExists(dst_dir.join(name)))
}

// A dangling symlink still occupies the name.
fn exists(p: &Path) -> bool {
    std::fs::symlink_metadata(p).is_ok()
}

fn with_suffix(stem: &OsStr, ext: Option<&OsStr>, suffix: &str) -> OsString {
    let mut out = stem.to_os_string();
    out.push(suffix);
    if let Some(e) = ext {
        out.push(".");
        out.push(e);
    }
    out
}
