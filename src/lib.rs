//! Core library for `renamer`.
//!
//! Batch renaming of a photo/video working directory:
//! - `folders`: reorder `A B C` folder names to `C-B-A`, merging into an existing target.
//! - `files`: classify camera files by name shape and rename them to `YYYYMMDD_HHMMSS - name`.
//! - `sweep`: send build/dependency folders to the trash.
//! - `cleanup`: send camera originals to the trash once edited copies exist.
//!
//! Every operation returns a report; a failing item becomes a notice and never
//! stops the batch. Deletion always goes through a `Trash`, never `remove_*`.

pub mod cleanup;
pub mod cli;
pub mod config;
pub mod errors;
pub mod files;
pub mod folders;
pub mod fs_ops;
pub mod media;
pub mod output;
pub mod platform;
pub mod report;
pub mod sweep;

pub use cleanup::{CleanupOptions, cleanup_originals};
pub use config::{
    Config, LoadResult, LogLevel, default_config_path, default_log_path,
    load_config_from_xml_path, load_or_init, path_has_symlink_ancestor, validate_and_normalize,
};
pub use errors::{RenamerError, Result};
pub use files::{FileOptions, rename_files};
pub use folders::{FolderOptions, SeparatorPair, rename_folders};
pub use fs_ops::{StagingTrash, SystemTrash, Trash};
pub use media::{FixedProbe, MediaProbe, Property, ShortcutResolver, SystemProbe, SystemShortcutResolver};
pub use report::{CleanupReport, FileReport, FolderReport, Notice, SweepReport};
pub use sweep::{SweepOptions, sweep_build_artifacts};

/// Convenience re-exports for callers driving the engines directly.
pub mod prelude {
    pub use crate::cleanup::{CleanupOptions, cleanup_originals};
    pub use crate::config::{Config, LogLevel};
    pub use crate::errors::{RenamerError as Error, Result as RnResult};
    pub use crate::files::{Device, FileOptions, rename_files};
    pub use crate::folders::{FolderOptions, SeparatorPair, rename_folders};
    pub use crate::fs_ops::{StagingTrash, SystemTrash, Trash};
    pub use crate::media::{FixedProbe, MediaProbe, Property, SystemProbe, SystemShortcutResolver};
    pub use crate::report::{CleanupReport, FileReport, FolderReport, SweepReport};
    pub use crate::sweep::{SweepOptions, sweep_build_artifacts};
}
