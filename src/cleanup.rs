//! Originals cleanup.
//!
//! After editing, camera originals (RAW files, JPGs never touched by an editor,
//! raw video) can be sent to the trash in one pass. Edited exports are
//! recognised by a `-` in the name, which every renamed file carries.

use std::path::Path;
use tracing::{info, warn};

use crate::errors::Result;
use crate::fs_ops::{Trash, snapshot};
use crate::report::{CleanupReport, Notice};

const RAW_EXTENSIONS: &[&str] = &[".CR2", ".ARW", ".dng", ".tif"];
const VIDEO_EXTENSIONS: &[&str] = &[".mp4"];

/// Which kinds of originals to trash.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanupOptions {
    pub raw: bool,
    pub unedited_jpg: bool,
    pub video: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginalKind {
    Raw,
    UneditedJpg,
    Video,
}

fn ends_with_ignore_case(name: &str, suffix: &str) -> bool {
    name.len() >= suffix.len()
        && name.is_char_boundary(name.len() - suffix.len())
        && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Kind of `name`, if it is one of the kinds selected in `opts`.
pub fn original_kind(name: &str, opts: &CleanupOptions) -> Option<OriginalKind> {
    if opts.raw && RAW_EXTENSIONS.iter().any(|e| ends_with_ignore_case(name, e)) {
        return Some(OriginalKind::Raw);
    }
    if opts.unedited_jpg && ends_with_ignore_case(name, ".jpg") && !name.contains('-') {
        return Some(OriginalKind::UneditedJpg);
    }
    if opts.video && VIDEO_EXTENSIONS.iter().any(|e| ends_with_ignore_case(name, e)) {
        return Some(OriginalKind::Video);
    }
    None
}

/// Trash the selected originals directly inside `root`.
pub fn cleanup_originals(root: &Path, opts: &CleanupOptions, trash: &dyn Trash) -> Result<CleanupReport> {
    let mut report = CleanupReport::default();

    for name in snapshot(root)?.files {
        let Some(kind) = original_kind(&name, opts) else {
            continue;
        };
        if let Err(error) = trash.send(&root.join(&name)) {
            warn!(file = %name, code = error.code(), error = %error, "Cannot trash original");
            report.errors.push(Notice { item: name, error });
            continue;
        }
        match kind {
            OriginalKind::Raw => report.raw += 1,
            OriginalKind::UneditedJpg => report.unedited_jpg += 1,
            OriginalKind::Video => report.video += 1,
        }
    }

    info!(raw = report.raw, jpg = report.unedited_jpg, video = report.video, "Cleanup finished");
    Ok(report)
}
