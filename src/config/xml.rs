//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Creates a secure template if missing (unless RENAMER_CONFIG is set).
//!
//! Notes:
//! - This module only reads/writes the config file; directory validation happens elsewhere.
//! - Unknown XML fields are an error so misspelled settings never pass silently.
//! - Text values are trimmed by the parser; wrap a value in double quotes to keep
//!   leading or trailing spaces (`" - Shortcut.lnk"`).

use anyhow::{Context, Result, anyhow, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{CONFIG_ENV, default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel, parse_separator};
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    from_separator: Option<String>,
    to_separator: Option<String>,
    delete_duplicates: Option<bool>,
    shortcut_suffix: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    /// Comma-separated list
    sweep_skip: Option<String>,
    /// Comma-separated list
    sweep_targets: Option<String>,
    staging_trash: Option<String>,
}

/// Outcome of looking for the config file.
#[derive(Debug)]
pub enum LoadResult {
    /// File found and parsed.
    Loaded { path: PathBuf, config: Config },
    /// No file at the default location; a template was written there.
    CreatedTemplate(PathBuf),
    /// No file and nothing created (explicit `RENAMER_CONFIG` pointing nowhere).
    Missing(PathBuf),
}

impl LoadResult {
    /// The loaded config, or defaults when there was no file.
    pub fn into_config(self) -> Config {
        match self {
            LoadResult::Loaded { config, .. } => config,
            LoadResult::CreatedTemplate(_) | LoadResult::Missing(_) => Config::default(),
        }
    }
}

/// Strip one pair of surrounding double quotes, if present.
fn unquote(s: &str) -> &str {
    let t = s.trim();
    if t.len() >= 2 && t.starts_with('"') && t.ends_with('"') {
        &t[1..t.len() - 1]
    } else {
        t
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|v| !v.is_empty())
}

fn comma_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

// Map XmlConfig -> Config, on top of the built-in defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(raw) = parsed.from_separator.as_deref() {
        cfg.from_separator = parse_separator(unquote(raw)).map_err(|e| anyhow!("from_separator: {e}"))?;
    }
    if let Some(raw) = parsed.to_separator.as_deref() {
        cfg.to_separator = parse_separator(unquote(raw)).map_err(|e| anyhow!("to_separator: {e}"))?;
    }
    if let Some(d) = parsed.delete_duplicates {
        cfg.delete_duplicates = d;
    }
    if let Some(raw) = non_empty(parsed.shortcut_suffix.as_deref()) {
        cfg.shortcut_suffix = unquote(raw).to_string();
    }
    if let Some(raw) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = raw.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    cfg.log_file = non_empty(parsed.log_file.as_deref()).map(PathBuf::from);
    if let Some(raw) = parsed.sweep_skip.as_deref() {
        cfg.sweep_skip = comma_list(raw);
    }
    if let Some(raw) = non_empty(parsed.sweep_targets.as_deref()) {
        cfg.sweep_targets = comma_list(raw);
    }
    cfg.staging_trash = non_empty(parsed.staging_trash.as_deref()).map(PathBuf::from);

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in config xml '{}'", path.display()))
}

/// Find and load the config file, writing a template on first run.
///
/// A template is only written at the default location; an explicit
/// `RENAMER_CONFIG` that points at nothing is reported as `Missing`.
pub fn load_or_init() -> Result<LoadResult> {
    let path = default_config_path()?;
    if path.exists() {
        let config = load_config_from_xml_path(&path)?;
        debug!(path = %path.display(), "Loaded config");
        return Ok(LoadResult::Loaded { path, config });
    }
    if env::var_os(CONFIG_ENV).is_some() {
        return Ok(LoadResult::Missing(path));
    }
    create_template_config(&path)?;
    Ok(LoadResult::CreatedTemplate(path))
}

/// Create default template config file and parent directory (best-effort permissions).
/// Uses secure creation to avoid following attacker-controlled symlinks on Unix.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!("Refusing to create config: ancestor of {} is a symlink", path.display());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    write_config_secure_new_0600(path, template(&suggested_log).as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!("Created template config at {}", path.display());
    Ok(())
}

fn template(suggested_log: &str) -> String {
    format!(
        r#"<!--
  renamer configuration (XML)

  Folder renaming:
    from_separator     -> single character joining folder name parts today ("space" for ' ')
    to_separator       -> single character to rejoin them with; must differ from from_separator
    delete_duplicates  -> true/false; trash a merged folder even if it still holds colliding files

  File renaming:
    shortcut_suffix    -> name suffix that marks a shortcut; quote it to keep the leading space

  Sweep:
    sweep_skip         -> comma list; folders whose path contains any entry are never entered
    sweep_targets      -> comma list of folder names to send to the trash

  Other:
    staging_trash      -> move deleted items to this folder instead of the system trash
    log_level          -> quiet | normal | info | debug
    log_file           -> path to log file (optional; console output is kept)

  CLI flags override XML values.
-->
<config>
  <from_separator>space</from_separator>
  <to_separator>-</to_separator>
  <delete_duplicates>false</delete_duplicates>
  <shortcut_suffix>" - Shortcut.lnk"</shortcut_suffix>
  <sweep_skip>.git, .idea, .vs, .vscode</sweep_skip>
  <sweep_targets>bin, obj, node_modules, target, build, dist, packages</sweep_targets>
  <log_level>normal</log_level>
  <log_file>{suggested_log}</log_file>
</config>
"#
    )
}
