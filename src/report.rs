//! Per-item outcomes and per-operation reports.
//!
//! Engines never stop a batch on a single failure: each item yields an
//! `ItemOutcome`, and the report folds outcomes into counts plus notices.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::errors::RenamerError;
use crate::files::Device;

/// Result of a folder merge into an existing destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Files moved into the destination.
    pub moved: usize,
    /// File names left in the source because the destination already had them.
    pub collisions: Vec<String>,
    /// Whether the source folder went to the trash afterwards.
    pub source_trashed: bool,
}

/// What happened to one folder or file.
#[derive(Debug)]
pub enum ItemOutcome {
    Renamed,
    Merged(MergeOutcome),
    /// A merge that stopped part way; what it did before the error is kept.
    MergeFailed {
        merge: MergeOutcome,
        error: RenamerError,
    },
    Skipped(String),
    Failed(RenamerError),
}

impl ItemOutcome {
    /// True for a merge that left at least one colliding file behind.
    pub fn has_conflict(&self) -> bool {
        match self {
            ItemOutcome::Merged(merge) | ItemOutcome::MergeFailed { merge, .. } => !merge.collisions.is_empty(),
            _ => false,
        }
    }
}

/// A per-item failure surfaced to the user without aborting the batch.
#[derive(Debug)]
pub struct Notice {
    pub item: String,
    pub error: RenamerError,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot process '{}'. {}", self.item, self.error)
    }
}

/// Outcome of `rename_folders`.
#[derive(Debug, Default)]
pub struct FolderReport {
    /// Candidates renamed or merged successfully.
    pub processed: usize,
    /// Original names of source folders that hit a file-name collision.
    pub conflicts: BTreeSet<String>,
    pub notices: Vec<Notice>,
    pub delete_duplicates: bool,
}

impl FolderReport {
    pub(crate) fn new(delete_duplicates: bool) -> Self {
        Self {
            delete_duplicates,
            ..Default::default()
        }
    }

    pub(crate) fn record(&mut self, folder: &str, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Renamed => self.processed += 1,
            ItemOutcome::Merged(merge) => {
                if !merge.collisions.is_empty() {
                    self.conflicts.insert(folder.to_string());
                }
                self.processed += 1;
            }
            ItemOutcome::MergeFailed { merge, error } => {
                if !merge.collisions.is_empty() {
                    self.conflicts.insert(folder.to_string());
                }
                self.notices.push(Notice {
                    item: folder.to_string(),
                    error,
                });
            }
            ItemOutcome::Skipped(_) => {}
            ItemOutcome::Failed(error) => self.notices.push(Notice {
                item: folder.to_string(),
                error,
            }),
        }
    }

    pub fn summary(&self) -> String {
        format!("Renamed {} folders", self.processed)
    }

    /// Multi-line alert listing conflicting folders; only when duplicates were kept.
    pub fn conflict_alert(&self) -> Option<String> {
        if self.conflicts.is_empty() || self.delete_duplicates {
            return None;
        }
        let names: Vec<&str> = self.conflicts.iter().map(String::as_str).collect();
        Some(format!(
            "There were some conflicts in the following folders:\n\n{}",
            names.join("\n")
        ))
    }
}

/// Outcome of `rename_files`.
#[derive(Debug, Default)]
pub struct FileReport {
    pub counts: BTreeMap<Device, usize>,
    /// On-disk names that matched no device rule.
    pub unknown: Vec<String>,
    pub notices: Vec<Notice>,
}

impl FileReport {
    pub fn count(&self, device: Device) -> usize {
        self.counts.get(&device).copied().unwrap_or(0)
    }

    pub fn renamed(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn summary(&self) -> String {
        let per_device: Vec<String> = Device::ALL
            .iter()
            .map(|d| format!("{} {}", self.count(*d), d))
            .collect();
        format!(
            "Renamed: {}. Found {} unknown: {}",
            per_device.join(", "),
            self.unknown.len(),
            self.unknown.join(", ")
        )
    }
}

/// Outcome of `sweep_build_artifacts`.
#[derive(Debug, Default)]
pub struct SweepReport {
    pub deleted: usize,
    pub errors: Vec<Notice>,
}

impl SweepReport {
    pub fn summary(&self) -> String {
        format!(
            "Deleted {} build folders ({} errors)",
            self.deleted,
            self.errors.len()
        )
    }
}

/// Outcome of `cleanup_originals`.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub raw: usize,
    pub unedited_jpg: usize,
    pub video: usize,
    pub errors: Vec<Notice>,
}

impl CleanupReport {
    pub fn summary(&self) -> String {
        format!(
            "Cleanup complete: {} RAW, {} unedited JPG, {} video",
            self.raw, self.unedited_jpg, self.video
        )
    }
}
