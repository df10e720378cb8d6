//! Directory listing snapshots.
//! One `read_dir` pass per call; callers never re-list mid-batch.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::{RenamerError, Result};

/// Immediate children of a directory, split by kind and sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub dirs: Vec<String>,
    pub files: Vec<String>,
}

/// Take a non-recursive snapshot of `dir`.
///
/// - Symlinks are reported as files (a link is renamed, never followed, here).
/// - Names that are not valid UTF-8 are skipped: every naming rule is defined on text.
pub fn snapshot(dir: &Path) -> Result<Snapshot> {
    let mut snap = Snapshot::default();
    let entries = fs::read_dir(dir).map_err(RenamerError::io("list directory", dir))?;
    for entry in entries {
        let entry = entry.map_err(RenamerError::io("read directory entry", dir))?;
        let file_type = entry
            .file_type()
            .map_err(RenamerError::io("stat entry", entry.path()))?;
        let name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(raw) => {
                debug!(name = ?raw, "skipping non UTF-8 entry name");
                continue;
            }
        };
        if file_type.is_dir() {
            snap.dirs.push(name);
        } else {
            snap.files.push(name);
        }
    }
    snap.dirs.sort();
    snap.files.sort();
    Ok(snap)
}
