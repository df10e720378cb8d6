//! I/O helper utilities.
//!
//! Enriches io::Error with actionable hints (locked file, permission denied,
//! path too long) so per-item notices tell the user what to fix.
//!
//! Usage:
//!   // in functions returning anyhow::Result<_>
//!   fs::read_dir(dir).map_err(io_error_with_help("list directory", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Format a human-friendly message with op/path plus platform-aware hints.
pub fn describe_io(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" - permission denied; check ownership and write permissions.");
                }
                libc::EXDEV => {
                    msg.push_str(" - cross-filesystem; rename must stay on one volume.");
                }
                libc::EBUSY => {
                    msg.push_str(" - resource busy; close programs using this item.");
                }
                libc::ENOENT => {
                    msg.push_str(" - path not found; it may have been moved during the run.");
                }
                libc::EEXIST | libc::ENOTEMPTY => {
                    msg.push_str(" - already exists; the destination is taken.");
                }
                libc::EROFS => {
                    msg.push_str(" - read-only filesystem; cannot write here.");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" - filename or path too long; shorten path segments.");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" - access denied; check permissions."), // ERROR_ACCESS_DENIED
                17 => msg.push_str(" - not same device; rename must stay on one volume."), // ERROR_NOT_SAME_DEVICE
                32 | 33 => msg.push_str(" - file is locked by another process."), // SHARING / LOCK VIOLATION
                2 | 3 => msg.push_str(" - path not found; it may have been moved during the run."),
                80 | 183 => msg.push_str(" - already exists; the destination is taken."),
                206 => msg.push_str(" - filename or path too long (MAX_PATH exceeded)."), // ERROR_FILENAME_EXCED_RANGE
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" - permission denied; check ownership and write permissions.");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" - path not found; it may have been moved during the run.");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str(" - already exists; the destination is taken.");
            }
            _ => {}
        }
    }

    msg
}

/// Adapter for anyhow::Result code.
/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> anyhow::Error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(describe_io(op, path, &e))
}
