//! Folder reorder and merge.
//!
//! Folders named `p0<from>p1<from>p2` are renamed to `p2<to>p1<to>p0`. When a
//! folder with the reordered name already exists, the source's files are moved
//! into it without overwriting anything; colliding files stay in the source and
//! the source's name is reported as a conflict.

use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::errors::{RenamerError, Result};
use crate::fs_ops::{Trash, rename_no_clobber, snapshot};
use crate::report::{FolderReport, ItemOutcome, MergeOutcome};

/// Number of components a selected folder name must split into.
pub const NAME_PARTS: usize = 3;

/// Delimiter currently joining the name components, and the one to rejoin with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorPair {
    pub from: char,
    pub to: char,
}

impl SeparatorPair {
    /// Both separators must differ, otherwise a second run would reorder again.
    pub fn new(from: char, to: char) -> Result<Self> {
        if from == to {
            return Err(RenamerError::InvalidSeparator(format!(
                "from and to are both {from:?}"
            )));
        }
        Ok(Self { from, to })
    }

    /// The pair that undoes a reorder done with `self`.
    pub fn inverse(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

impl fmt::Display for SeparatorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} -> {:?}", self.from, self.to)
    }
}

/// Inputs of a folder pass besides the working directory.
#[derive(Debug, Clone, Copy)]
pub struct FolderOptions {
    pub separators: SeparatorPair,
    /// Trash a merged source even when it still holds colliding files.
    pub delete_duplicates: bool,
}

/// Reverse the three `from`-separated components of `name`, joined by `to`.
pub fn reorder(name: &str, seps: SeparatorPair) -> Result<String> {
    let parts: Vec<&str> = name.split(seps.from).collect();
    if parts.len() != NAME_PARTS {
        return Err(RenamerError::NameShapeViolation {
            name: name.to_string(),
            separator: seps.from,
            expected: NAME_PARTS,
            found: parts.len(),
        });
    }
    let to = seps.to.to_string();
    Ok([parts[2], parts[1], parts[0]].join(to.as_str()))
}

/// Rename or merge every immediate subfolder of `root` whose name contains `from`.
///
/// Selection is by containment only; a selected name that does not split into
/// exactly three parts is reported as a notice. Returns `Err` only when the
/// initial listing fails.
pub fn rename_folders(root: &Path, opts: &FolderOptions, trash: &dyn Trash) -> Result<FolderReport> {
    let snap = snapshot(root)?;
    let mut report = FolderReport::new(opts.delete_duplicates);

    for name in snap.dirs.iter().filter(|n| n.contains(opts.separators.from)) {
        let outcome = match process_folder(root, name, opts, trash) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(folder = %name, code = e.code(), kind = e.kind(), error = %e, "Cannot rename folder");
                ItemOutcome::Failed(e)
            }
        };
        report.record(name, outcome);
    }

    info!(
        processed = report.processed,
        conflicts = report.conflicts.len(),
        failed = report.notices.len(),
        "Folder pass finished"
    );
    Ok(report)
}

fn process_folder(
    root: &Path,
    name: &str,
    opts: &FolderOptions,
    trash: &dyn Trash,
) -> Result<ItemOutcome> {
    let new_name = reorder(name, opts.separators)?;
    let src = root.join(name);
    let dst = root.join(&new_name);

    if !dst.is_dir() {
        rename_no_clobber(&src, &dst)?;
        info!(from = %name, to = %new_name, "Renamed folder");
        return Ok(ItemOutcome::Renamed);
    }

    let (merge, failure) = merge_into(&src, &dst, opts.delete_duplicates, trash);
    if let Some(error) = failure {
        warn!(
            from = %name,
            to = %new_name,
            moved = merge.moved,
            collisions = merge.collisions.len(),
            error = %error,
            "Merge stopped early"
        );
        return Ok(ItemOutcome::MergeFailed { merge, error });
    }
    info!(
        from = %name,
        to = %new_name,
        moved = merge.moved,
        collisions = merge.collisions.len(),
        trashed = merge.source_trashed,
        "Merged folder"
    );
    Ok(ItemOutcome::Merged(merge))
}

/// Move the files directly inside `src` into `dst` without overwriting, then
/// trash `src` if no files are left in it or `delete_duplicates` is set.
///
/// The outcome is returned even when a step fails, so collisions found before
/// the failure are still reported.
pub fn merge_into(
    src: &Path,
    dst: &Path,
    delete_duplicates: bool,
    trash: &dyn Trash,
) -> (MergeOutcome, Option<RenamerError>) {
    let mut outcome = MergeOutcome::default();
    let failure = merge_files(src, dst, delete_duplicates, trash, &mut outcome).err();
    (outcome, failure)
}

fn merge_files(
    src: &Path,
    dst: &Path,
    delete_duplicates: bool,
    trash: &dyn Trash,
    outcome: &mut MergeOutcome,
) -> Result<()> {
    for file in snapshot(src)?.files {
        let target = dst.join(&file);
        if std::fs::symlink_metadata(&target).is_ok() {
            debug!(file = %file, dest = %dst.display(), "Collision; leaving file in source");
            outcome.collisions.push(file);
            continue;
        }
        rename_no_clobber(&src.join(&file), &target)?;
        outcome.moved += 1;
    }

    // Subfolders do not keep the source alive; they go to the trash with it.
    if snapshot(src)?.files.is_empty() || delete_duplicates {
        trash.send(src)?;
        outcome.source_trashed = true;
    }
    Ok(())
}
