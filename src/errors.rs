//! Typed error definitions for renamer.
//! Provides the per-item failure kinds that batch drivers fold into reports.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenamerError {
    #[error("'{name}' does not split into {expected} parts on '{separator}' (found {found})")]
    NameShapeViolation {
        name: String,
        separator: char,
        expected: usize,
        found: usize,
    },

    #[error("'{name}' is too short to rename: needs at least {min} characters, has {found}")]
    StemTooShort { name: String, min: usize, found: usize },

    #[error("No {property} timestamp available in {path}")]
    MetadataUnavailable { path: PathBuf, property: &'static str },

    #[error("Cannot resolve shortcut target of {0}")]
    ShortcutUnresolved(PathBuf),

    #[error("Refusing to overwrite existing {0}")]
    DestinationExists(PathBuf),

    #[error("Cannot move {path} to trash: {reason}")]
    Trash { path: PathBuf, reason: String },

    #[error("Invalid separator: {0}")]
    InvalidSeparator(String),

    #[error("{}", crate::fs_ops::describe_io(.op, .path, .source))]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RenamerError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            RenamerError::NameShapeViolation { .. } => 10,
            RenamerError::StemTooShort { .. } => 11,
            RenamerError::MetadataUnavailable { .. } => 20,
            RenamerError::ShortcutUnresolved(_) => 21,
            RenamerError::DestinationExists(_) => 30,
            RenamerError::Trash { .. } => 40,
            RenamerError::InvalidSeparator(_) => 50,
            RenamerError::Io { .. } => 60,
        }
    }

    /// Short machine-friendly kind label, paired with `code()` in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            RenamerError::NameShapeViolation { .. } => "name_shape_violation",
            RenamerError::StemTooShort { .. } => "stem_too_short",
            RenamerError::MetadataUnavailable { .. } => "metadata_unavailable",
            RenamerError::ShortcutUnresolved(_) => "shortcut_unresolved",
            RenamerError::DestinationExists(_) => "destination_exists",
            RenamerError::Trash { .. } => "trash",
            RenamerError::InvalidSeparator(_) => "invalid_separator",
            RenamerError::Io { .. } => "io",
        }
    }

    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| RenamerError::Io { op, path, source }
    }
}

pub type Result<T, E = RenamerError> = std::result::Result<T, E>;
