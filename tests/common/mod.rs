//! Shared fixtures for the integration tests.

use std::path::Path;

use renamer::{RenamerError, StagingTrash, Trash};

/// Staging trash that refuses items with one of the given base names.
pub struct FailingTrash {
    inner: StagingTrash,
    refuse: Vec<String>,
}

impl FailingTrash {
    pub fn new(dir: &Path, refuse: &[&str]) -> Self {
        Self {
            inner: StagingTrash::new(dir),
            refuse: refuse.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Trash for FailingTrash {
    fn send(&self, path: &Path) -> renamer::Result<()> {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        if self.refuse.contains(&name) {
            return Err(RenamerError::Trash {
                path: path.to_path_buf(),
                reason: "item is in use".into(),
            });
        }
        self.inner.send(path)
    }
}
