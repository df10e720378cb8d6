//! Reversible deletion.
//!
//! Nothing in renamer removes data permanently: every deletion goes through a
//! `Trash`. `SystemTrash` uses the OS recycle bin (freedesktop trash on Linux);
//! `StagingTrash` moves items into a holding directory, for systems without a
//! trash facility and for tests.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::duplicate::unique_in;
use crate::errors::{RenamerError, Result};

/// Capability: move a file or directory somewhere recoverable.
pub trait Trash {
    fn send(&self, path: &Path) -> Result<()>;
}

/// The platform recycle bin.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTrash;

impl Trash for SystemTrash {
    fn send(&self, path: &Path) -> Result<()> {
        trash::delete(path).map_err(|e| RenamerError::Trash {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        info!(path = %path.display(), "Moved to trash");
        Ok(())
    }
}

/// Holding directory used instead of the recycle bin.
///
/// Items keep their base name; repeated names get " (n)" suffixes. The holding
/// directory must live on the same volume as the items being trashed.
#[derive(Debug, Clone)]
pub struct StagingTrash {
    dir: PathBuf,
}

impl StagingTrash {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Trash for StagingTrash {
    fn send(&self, path: &Path) -> Result<()> {
        let name = path.file_name().ok_or_else(|| RenamerError::Trash {
            path: path.to_path_buf(),
            reason: "path has no file name".into(),
        })?;
        fs::create_dir_all(&self.dir).map_err(RenamerError::io("create staging trash", &self.dir))?;
        let dest = unique_in(&self.dir, name)?;
        fs::rename(path, &dest).map_err(RenamerError::io("move to staging trash", path))?;
        info!(path = %path.display(), staged = %dest.display(), "Moved to staging trash");
        Ok(())
    }
}
