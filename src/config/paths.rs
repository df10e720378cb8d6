//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors for safety.

use anyhow::{Result, anyhow};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file (or a directory holding `config.xml`).
pub const CONFIG_ENV: &str = "RENAMER_CONFIG";

const APP_DIR: &str = "renamer";
const CONFIG_FILE: &str = "config.xml";
const LOG_FILE: &str = "renamer.log";

/// Config path: `RENAMER_CONFIG` when set, else the OS config dir.
///
/// A relative `RENAMER_CONFIG` is taken from the current directory; one naming
/// an existing directory means `config.xml` inside it.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(raw) = env::var_os(CONFIG_ENV) {
        let mut p = PathBuf::from(raw);
        if p.is_relative() {
            p = env::current_dir()?.join(p);
        }
        if p.is_dir() {
            p.push(CONFIG_FILE);
        }
        return Ok(p);
    }

    let base = config_dir()
        .or_else(|| env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok_or_else(|| anyhow!("cannot determine a config directory (no HOME)"))?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

/// Default log file path.
///
/// With `RENAMER_CONFIG` set the log sits next to that config file, so a
/// self-contained setup keeps everything in one place. Otherwise it goes to
/// the OS data dir.
pub fn default_log_path() -> Result<PathBuf> {
    if env::var_os(CONFIG_ENV).is_some() {
        let cfg = default_config_path()?;
        let dir = cfg.parent().unwrap_or_else(|| Path::new("."));
        return Ok(dir.join(LOG_FILE));
    }

    let base = data_dir()
        .or_else(|| env::var_os("HOME").map(|h| PathBuf::from(h).join(".local").join("share")))
        .ok_or_else(|| anyhow!("cannot determine a data directory (no HOME)"))?;
    let dir = base.join(APP_DIR);
    let _ = fs::create_dir_all(&dir);
    Ok(dir.join(LOG_FILE))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.as_os_str().is_empty() {
            break;
        }
        match fs::symlink_metadata(anc) {
            Ok(meta) if meta.file_type().is_symlink() => return Ok(true),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        p = anc.parent();
    }
    Ok(false)
}
