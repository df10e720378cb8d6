//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cleanup::CleanupOptions;
use crate::errors::Result;
use crate::files::{DEFAULT_SHORTCUT_SUFFIX, FileOptions};
use crate::folders::{FolderOptions, SeparatorPair};
use crate::sweep::{DEFAULT_SKIP, DEFAULT_TARGETS, SweepOptions};

pub const DEFAULT_FROM_SEPARATOR: char = ' ';
pub const DEFAULT_TO_SEPARATOR: char = '-';

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Parse a separator setting: exactly one character, or `space` / `tab`.
///
/// The keywords exist because XML values and shell arguments are easy to
/// trim into an empty string.
pub fn parse_separator(s: &str) -> Result<char, String> {
    match s {
        "space" => return Ok(' '),
        "tab" => return Ok('\t'),
        _ => {}
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        (None, _) => Err("separator must not be empty".into()),
        _ => Err(format!("separator must be a single character, got '{s}'")),
    }
}

/// Runtime configuration shared by every subcommand.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory the batch operates on
    pub working_dir: PathBuf,
    /// Separator folder names currently use
    pub from_separator: char,
    /// Separator folder names are rejoined with
    pub to_separator: char,
    /// Trash a merged folder even when it still holds colliding files
    pub delete_duplicates: bool,
    /// Name suffix marking a shortcut
    pub shortcut_suffix: String,
    /// Path fragments the sweep never descends into
    pub sweep_skip: Vec<String>,
    /// Folder names the sweep removes
    pub sweep_targets: Vec<String>,
    /// Move deleted items here instead of the system trash
    pub staging_trash: Option<PathBuf>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            from_separator: DEFAULT_FROM_SEPARATOR,
            to_separator: DEFAULT_TO_SEPARATOR,
            delete_duplicates: false,
            shortcut_suffix: DEFAULT_SHORTCUT_SUFFIX.to_string(),
            sweep_skip: DEFAULT_SKIP.iter().map(|s| s.to_string()).collect(),
            sweep_targets: DEFAULT_TARGETS.iter().map(|s| s.to_string()).collect(),
            staging_trash: None,
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}

impl Config {
    /// Config rooted at `working_dir`; other fields use defaults.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            ..Default::default()
        }
    }

    pub fn separators(&self) -> Result<SeparatorPair> {
        SeparatorPair::new(self.from_separator, self.to_separator)
    }

    pub fn folder_options(&self) -> Result<FolderOptions> {
        Ok(FolderOptions {
            separators: self.separators()?,
            delete_duplicates: self.delete_duplicates,
        })
    }

    pub fn file_options(&self) -> FileOptions {
        FileOptions {
            shortcut_suffix: self.shortcut_suffix.clone(),
        }
    }

    /// Sweep settings; a staging trash inside the working directory is never swept.
    pub fn sweep_options(&self) -> SweepOptions {
        let mut skip = self.sweep_skip.clone();
        if let Some(rel) = self
            .staging_trash
            .as_deref()
            .and_then(|s| s.strip_prefix(&self.working_dir).ok())
            .filter(|rel| !rel.as_os_str().is_empty())
        {
            skip.push(rel.to_string_lossy().into_owned());
        }
        SweepOptions {
            skip,
            targets: self.sweep_targets.clone(),
        }
    }

    /// Cleanup selection; with no kind requested every kind is selected.
    pub fn cleanup_options(&self, raw: bool, unedited_jpg: bool, video: bool) -> CleanupOptions {
        if !(raw || unedited_jpg || video) {
            return CleanupOptions {
                raw: true,
                unedited_jpg: true,
                video: true,
            };
        }
        CleanupOptions {
            raw,
            unedited_jpg,
            video,
        }
    }
}
