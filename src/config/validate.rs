//! Config validation logic.
//! Verifies the working directory and separators before any engine runs.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::fs_ops::io_error_with_help;

use super::types::Config;

/// Check the config and canonicalize the paths it carries.
///
/// The working directory must exist, be a directory and be readable. The
/// staging trash, when configured, is created if missing and must not be the
/// working directory itself.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<()> {
    ensure_dir_exists_and_is_dir(&cfg.working_dir, "working_dir")?;
    ensure_readable(&cfg.working_dir, "working_dir")?;
    cfg.working_dir = dunce::canonicalize(&cfg.working_dir)
        .map_err(io_error_with_help("canonicalize working_dir", &cfg.working_dir))?;

    cfg.separators().context("check separators")?;

    if let Some(stage) = cfg.staging_trash.as_mut() {
        if stage.is_relative() {
            *stage = cfg.working_dir.join(&*stage);
        }
        if stage.exists() && !stage.is_dir() {
            bail!("staging_trash exists but isn't a directory: {}", stage.display());
        }
        fs::create_dir_all(&*stage).map_err(io_error_with_help("create staging_trash", &*stage))?;
        *stage = dunce::canonicalize(&*stage).map_err(io_error_with_help("canonicalize staging_trash", &*stage))?;
        if *stage == cfg.working_dir {
            bail!("staging_trash must differ from working_dir: {}", stage.display());
        }
    }

    info!(
        working_dir = %cfg.working_dir.display(),
        separators = %format!("{:?} -> {:?}", cfg.from_separator, cfg.to_separator),
        staging_trash = %cfg.staging_trash.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<system>".into()),
        "Config validated"
    );
    Ok(())
}

/// Ensure path exists and is a directory; emit clear errors with path context.
fn ensure_dir_exists_and_is_dir(path: &Path, name: &str) -> Result<()> {
    if !path.exists() {
        bail!("{name} does not exist: {}", path.display());
    }
    if !path.is_dir() {
        bail!("{name} is not a directory: {}", path.display());
    }
    Ok(())
}

fn ensure_readable(path: &Path, name: &str) -> Result<()> {
    fs::read_dir(path).with_context(|| {
        format!("Cannot read {name} directory '{}'; check permissions", path.display())
    })?;
    debug!("{name} readable: {}", path.display());
    Ok(())
}
