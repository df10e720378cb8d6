//! Device-aware file renaming.
//!
//! Flat pass over the working directory: files already in smartphone form are
//! skipped, the rest are classified by the device rule table and renamed to a
//! sortable `timestamp - name` form. Shortcuts are classified by the name they
//! carry without the shortcut suffix, read timestamps from their target, and
//! are themselves what gets renamed.

mod rules;

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::fs_ops::{rename_no_clobber, snapshot};
use crate::media::{MediaKind, MediaProbe, ShortcutResolver};
use crate::report::{FileReport, ItemOutcome, Notice};

pub use rules::{
    Device, DeviceRule, NameSource, RULES, classify, is_smartphone_named, timestamp_name,
};

/// Suffix Windows Explorer gives new shortcuts.
pub const DEFAULT_SHORTCUT_SUFFIX: &str = " - Shortcut.lnk";

#[derive(Debug, Clone)]
pub struct FileOptions {
    pub shortcut_suffix: String,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            shortcut_suffix: DEFAULT_SHORTCUT_SUFFIX.to_string(),
        }
    }
}

/// A directory entry split into the part rules look at and the part that is carried over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Name on disk.
    pub file_name: String,
    /// Name the rules classify.
    pub stem: String,
    /// Appended to the new stem (".JPG", ".lnk", or empty).
    pub ext: String,
    pub shortcut: bool,
}

impl Candidate {
    pub fn new(file_name: &str, shortcut_suffix: &str) -> Self {
        if !shortcut_suffix.is_empty()
            && let Some(stem) = file_name.strip_suffix(shortcut_suffix)
            && !stem.is_empty()
        {
            let ext = Path::new(shortcut_suffix)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| format!(".{e}"))
                .unwrap_or_default();
            return Self {
                file_name: file_name.to_string(),
                stem: stem.to_string(),
                ext,
                shortcut: true,
            };
        }

        let (stem, ext) = match file_name.rfind('.') {
            Some(dot) if dot > 0 => (&file_name[..dot], &file_name[dot..]),
            _ => (file_name, ""),
        };
        Self {
            file_name: file_name.to_string(),
            stem: stem.to_string(),
            ext: ext.to_string(),
            shortcut: false,
        }
    }
}

/// Classify and rename every non-smartphone file directly inside `root`.
///
/// Returns `Err` only when the initial listing fails; per-file failures become
/// notices and the file keeps its name.
pub fn rename_files(
    root: &Path,
    opts: &FileOptions,
    probe: &dyn MediaProbe,
    resolver: &dyn ShortcutResolver,
) -> Result<FileReport> {
    let snap = snapshot(root)?;
    let mut report = FileReport::default();

    for file_name in &snap.files {
        if is_smartphone_named(file_name) {
            debug!(file = %file_name, "already in smartphone form");
            continue;
        }
        let candidate = Candidate::new(file_name, &opts.shortcut_suffix);
        let Some(rule) = classify(&candidate.stem) else {
            debug!(file = %file_name, "no device rule matches");
            report.unknown.push(file_name.clone());
            continue;
        };

        match rename_one(root, &candidate, rule, probe, resolver) {
            ItemOutcome::Renamed => *report.counts.entry(rule.device).or_default() += 1,
            ItemOutcome::Failed(error) => {
                warn!(file = %file_name, rule = rule.name, code = error.code(), kind = error.kind(), error = %error, "Cannot rename file");
                report.notices.push(Notice {
                    item: file_name.clone(),
                    error,
                });
            }
            ItemOutcome::Merged(_) | ItemOutcome::MergeFailed { .. } | ItemOutcome::Skipped(_) => {}
        }
    }

    info!(
        renamed = report.renamed(),
        unknown = report.unknown.len(),
        failed = report.notices.len(),
        "File pass finished"
    );
    Ok(report)
}

fn rename_one(
    root: &Path,
    candidate: &Candidate,
    rule: &DeviceRule,
    probe: &dyn MediaProbe,
    resolver: &dyn ShortcutResolver,
) -> ItemOutcome {
    let path = root.join(&candidate.file_name);
    let result = target_stem(&path, candidate, rule, probe, resolver).and_then(|stem| {
        let new_name = format!("{}{}", stem, candidate.ext);
        rename_no_clobber(&path, &root.join(&new_name))?;
        info!(from = %candidate.file_name, to = %new_name, device = %rule.device, "Renamed file");
        Ok(())
    });
    match result {
        Ok(()) => ItemOutcome::Renamed,
        Err(e) => ItemOutcome::Failed(e),
    }
}

fn target_stem(
    path: &Path,
    candidate: &Candidate,
    rule: &DeviceRule,
    probe: &dyn MediaProbe,
    resolver: &dyn ShortcutResolver,
) -> Result<String> {
    match rule.source {
        NameSource::Stem(build) => build(&candidate.stem),
        NameSource::Timestamp(property_for) => {
            let media: PathBuf = if candidate.shortcut {
                resolver.resolve(path)?
            } else {
                path.to_path_buf()
            };
            let property = property_for(&candidate.stem, MediaKind::of(&media));
            let at = probe.read(property, &media)?;
            Ok(timestamp_name(at, &candidate.stem))
        }
    }
}
