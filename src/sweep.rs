//! Build artifact sweep.
//!
//! Finds folders named like build or dependency output (`bin`, `obj`,
//! `node_modules`, ...) anywhere under the working directory and sends each to
//! the trash. A match nested inside another match is dropped, since trashing
//! the outer folder takes it along.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::fs_ops::Trash;
use crate::report::{Notice, SweepReport};

pub const DEFAULT_SKIP: &[&str] = &[".git", ".idea", ".vs", ".vscode"];
pub const DEFAULT_TARGETS: &[&str] = &["bin", "obj", "node_modules", "target", "build", "dist", "packages"];

#[derive(Debug, Clone)]
pub struct SweepOptions {
    /// A folder whose path below the root contains any of these is ignored.
    pub skip: Vec<String>,
    /// Folder base names to sweep.
    pub targets: Vec<String>,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIP.iter().map(|s| s.to_string()).collect(),
            targets: DEFAULT_TARGETS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Every folder under `root` whose base name is one of the targets.
///
/// Skip substrings are matched against the path relative to `root`, so the
/// location of the working directory itself never excludes anything.
pub fn find_artifacts(root: &Path, opts: &SweepOptions) -> Vec<PathBuf> {
    let skipped = |p: &Path| {
        let rel = p.strip_prefix(root).unwrap_or(p).to_string_lossy();
        opts.skip.iter().any(|s| !s.is_empty() && rel.contains(s.as_str()))
    };

    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && skipped(e.path())))
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry during sweep");
                None
            }
        })
        .filter(|e| e.file_type().is_dir())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| opts.targets.iter().any(|t| t == name))
        })
        .map(|e| e.into_path())
        .collect()
}

/// Keep only matches not contained in another match.
///
/// Shorter paths are considered first, so an ancestor is always kept before
/// any of its descendants is looked at. Containment is by path components,
/// not by string prefix (`a/bin2` is not inside `a/bin`).
pub fn drop_nested(mut matches: Vec<PathBuf>) -> Vec<PathBuf> {
    matches.sort_by(|a, b| {
        a.as_os_str()
            .len()
            .cmp(&b.as_os_str().len())
            .then_with(|| a.cmp(b))
    });
    matches.dedup();

    let mut kept: Vec<PathBuf> = Vec::with_capacity(matches.len());
    for m in matches {
        if let Some(parent) = kept.iter().find(|k| m.starts_with(k)) {
            debug!(nested = %m.display(), parent = %parent.display(), "already covered by parent match");
            continue;
        }
        kept.push(m);
    }
    kept
}

/// Trash every top-most build folder under `root`; failures do not stop the sweep.
pub fn sweep_build_artifacts(root: &Path, opts: &SweepOptions, trash: &dyn Trash) -> SweepReport {
    let mut report = SweepReport::default();

    for dir in drop_nested(find_artifacts(root, opts)) {
        match trash.send(&dir) {
            Ok(()) => report.deleted += 1,
            Err(error) => {
                warn!(path = %dir.display(), code = error.code(), error = %error, "Cannot delete build folder");
                report.errors.push(Notice {
                    item: dir.display().to_string(),
                    error,
                });
            }
        }
    }

    info!(deleted = report.deleted, errors = report.errors.len(), "Sweep finished");
    report
}
