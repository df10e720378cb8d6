//! Unix implementations of platform helpers.

use super::common_unix::atomic_write_0600;
use anyhow::{Result, bail};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

/// Open log file for appending; 0600 only when the file is new.
/// An existing file keeps its mode (e.g. group-readable for log shipping).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600)
        .custom_flags(libc::O_NOFOLLOW)
        .open(path)
}

/// Write a new config file atomically with mode 0600. Fails if it already exists.
pub fn write_config_secure_new_0600(path: &Path, contents: &[u8]) -> Result<()> {
    if fs::symlink_metadata(path).is_ok() {
        bail!("Config file already exists: {}", path.display());
    }
    atomic_write_0600(path, contents)
}

pub fn set_dir_mode_0700(path: &Path) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(0o700))
}

pub fn set_file_mode_0600(path: &Path) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(test)]
mod tests {
    use super::super::temp::TMP_PREFIX;
    use super::*;
    use tempfile::tempdir;

    fn mode(p: &Path) -> u32 {
        fs::metadata(p).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn existing_log_file_keeps_its_mode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("renamer.log");
        fs::write(&path, b"hello").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();
        let _f = open_log_file_secure_append(&path).unwrap();
        assert_eq!(mode(&path), 0o640);
    }

    #[test]
    fn new_log_file_is_private() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("renamer.log");
        let _f = open_log_file_secure_append(&path).unwrap();
        assert_eq!(mode(&path), 0o600);
    }

    #[test]
    fn log_file_symlink_is_refused() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real.log");
        fs::write(&real, b"").unwrap();
        let link = dir.path().join("link.log");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        assert!(open_log_file_secure_append(&link).is_err());
    }

    #[test]
    fn config_write_is_0600_and_leaves_no_temp() {
        let dir = tempdir().unwrap();
        let cfg = dir.path().join("config.xml");
        write_config_secure_new_0600(&cfg, b"<config/>").unwrap();
        assert_eq!(fs::read(&cfg).unwrap(), b"<config/>");
        assert_eq!(mode(&cfg), 0o600);
        for entry in fs::read_dir(dir.path()).unwrap() {
            let name = entry.unwrap().file_name();
            assert!(!name.to_string_lossy().starts_with(TMP_PREFIX));
        }
        assert!(write_config_secure_new_0600(&cfg, b"<config/>").is_err());
    }
}
