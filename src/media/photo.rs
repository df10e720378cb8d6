//! EXIF "date taken" reader.

use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

use crate::errors::{RenamerError, Result};

const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Read `DateTimeOriginal` (falling back to `DateTime`) from a photo's EXIF block.
///
/// Works for every container kamadak-exif understands: JPEG, TIFF-based RAW
/// (CR2, ARW, DNG), HEIF, PNG and WebP.
pub fn date_taken(path: &Path) -> Result<NaiveDateTime> {
    let unavailable = || RenamerError::MetadataUnavailable {
        path: path.to_path_buf(),
        property: "date taken",
    };

    let file = File::open(path).map_err(RenamerError::io("open photo", path))?;
    let mut reader = BufReader::new(file);
    let exif = Reader::new().read_from_container(&mut reader).map_err(|e| {
        trace!(path = %path.display(), error = %e, "no readable EXIF block");
        unavailable()
    })?;

    let field = exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .or_else(|| exif.get_field(Tag::DateTime, In::PRIMARY))
        .ok_or_else(unavailable)?;

    // display_value() would wrap the text in quotes; read the raw ASCII instead.
    let text = match &field.value {
        Value::Ascii(values) if !values.is_empty() => String::from_utf8_lossy(&values[0]).into_owned(),
        _ => return Err(unavailable()),
    };
    parse_exif_datetime(&text).ok_or_else(unavailable)
}

/// Parse `YYYY:MM:DD HH:MM:SS`, tolerating surrounding whitespace and NULs.
pub(crate) fn parse_exif_datetime(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\0' || c == '"');
    NaiveDateTime::parse_from_str(trimmed, EXIF_DATETIME_FORMAT).ok()
}
