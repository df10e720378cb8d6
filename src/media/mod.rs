//! Media capabilities: timestamps embedded in photos and videos, and shortcut
//! resolution. The classifier depends on these traits only, so tests can swap
//! in fixed answers instead of real media files.

mod container;
mod photo;
mod shortcut;

use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::{RenamerError, Result};

pub use container::{creation_seconds, mvhd_creation_seconds};
pub use photo::date_taken;
pub use shortcut::{ShortcutResolver, SystemShortcutResolver, lnk_target};

/// Which embedded timestamp a device rule wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    /// EXIF "date taken" of a photo.
    DateTaken,
    /// Container creation time of a video, as recorded (UTC).
    DateEncoded,
    /// Container creation time of a video, in local time.
    MediaCreated,
}

impl Property {
    pub fn label(self) -> &'static str {
        match self {
            Property::DateTaken => "date taken",
            Property::DateEncoded => "date encoded",
            Property::MediaCreated => "media created",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Photo or video, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
}

const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "heic", "png", "dng", "arw", "cr2", "tif", "tiff"];

impl MediaKind {
    pub fn of(path: &Path) -> Self {
        let is_photo = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| PHOTO_EXTENSIONS.iter().any(|p| e.eq_ignore_ascii_case(p)))
            .unwrap_or(false);
        if is_photo { MediaKind::Photo } else { MediaKind::Video }
    }
}

/// Capability: read an embedded timestamp from a media file.
pub trait MediaProbe {
    fn read(&self, property: Property, path: &Path) -> Result<NaiveDateTime>;
}

/// Reads timestamps from the files themselves (EXIF for photos, ISO-BMFF `mvhd` for videos).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl MediaProbe for SystemProbe {
    fn read(&self, property: Property, path: &Path) -> Result<NaiveDateTime> {
        let unavailable = || RenamerError::MetadataUnavailable {
            path: path.to_path_buf(),
            property: property.label(),
        };
        match property {
            Property::DateTaken => date_taken(path),
            Property::DateEncoded => {
                let secs = creation_seconds(path)?.ok_or_else(unavailable)?;
                chrono::DateTime::from_timestamp(secs, 0)
                    .map(|dt| dt.naive_utc())
                    .ok_or_else(unavailable)
            }
            Property::MediaCreated => {
                let secs = creation_seconds(path)?.ok_or_else(unavailable)?;
                chrono::DateTime::from_timestamp(secs, 0)
                    .map(|dt| dt.with_timezone(&chrono::Local).naive_local())
                    .ok_or_else(unavailable)
            }
        }
    }
}

/// Fixed answers keyed by path and property; anything else is unavailable.
#[derive(Debug, Default, Clone)]
pub struct FixedProbe {
    stamps: BTreeMap<(PathBuf, Property), NaiveDateTime>,
}

impl FixedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, property: Property, at: NaiveDateTime) -> Self {
        self.stamps.insert((path.into(), property), at);
        self
    }
}

impl MediaProbe for FixedProbe {
    fn read(&self, property: Property, path: &Path) -> Result<NaiveDateTime> {
        self.stamps
            .get(&(path.to_path_buf(), property))
            .copied()
            .ok_or_else(|| RenamerError::MetadataUnavailable {
                path: path.to_path_buf(),
                property: property.label(),
            })
    }
}
