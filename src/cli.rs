//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - Flags only override config values that were actually given.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel, parse_separator};

/// Batch renamer for photo/video working folders.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Reorder dated folder names, rename camera files by timestamp, sweep build folders"
)]
pub struct Args {
    /// Directory to operate on (defaults to the current directory).
    #[arg(long, short = 'w', global = true, value_hint = ValueHint::DirPath)]
    pub working_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, value_parser = clap::value_parser!(LogLevel), help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<LogLevel>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Print the config file location used by renamer and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Move deleted items into this folder instead of the system trash.
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub staging_trash: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reorder `A B C` folder names to `C-B-A`, merging into existing folders.
    Folders(FolderArgs),
    /// Rename camera files to `YYYYMMDD_HHMMSS - name`.
    Files(FileArgs),
    /// Send build and dependency folders to the trash.
    Sweep(SweepArgs),
    /// Send camera originals (RAW, unedited JPG, video) to the trash.
    Cleanup(CleanupArgs),
}

#[derive(ClapArgs, Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderArgs {
    /// Separator the folder names use now (a single character, or `space`/`tab`).
    #[arg(long, value_parser = parse_separator)]
    pub from: Option<char>,
    /// Separator to rejoin the parts with.
    #[arg(long, value_parser = parse_separator)]
    pub to: Option<char>,
    /// Trash a merged folder even when it still holds colliding files.
    #[arg(long)]
    pub delete_duplicates: bool,
}

#[derive(ClapArgs, Debug, Clone, Default, PartialEq, Eq)]
pub struct FileArgs {
    /// Name suffix that marks a shortcut.
    #[arg(long, allow_hyphen_values = true)]
    pub shortcut_suffix: Option<String>,
}

#[derive(ClapArgs, Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepArgs {
    /// Path fragment never descended into (repeatable; replaces the configured list).
    #[arg(long = "skip", value_name = "FRAGMENT")]
    pub skip: Vec<String>,
    /// Folder name to sweep (repeatable; replaces the configured list).
    #[arg(long = "target", value_name = "NAME")]
    pub targets: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupArgs {
    /// RAW files (.CR2 .ARW .dng .tif).
    #[arg(long)]
    pub raw: bool,
    /// JPGs without a `-` in the name.
    #[arg(long)]
    pub unedited_jpg: bool,
    /// Videos (.mp4).
    #[arg(long)]
    pub video: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(dir) = &self.working_dir {
            cfg.working_dir = dir.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(stage) = &self.staging_trash {
            cfg.staging_trash = Some(stage.clone());
        }

        match &self.command {
            Some(Command::Folders(f)) => {
                if let Some(c) = f.from {
                    cfg.from_separator = c;
                }
                if let Some(c) = f.to {
                    cfg.to_separator = c;
                }
                if f.delete_duplicates {
                    cfg.delete_duplicates = true;
                }
            }
            Some(Command::Files(f)) => {
                if let Some(s) = &f.shortcut_suffix {
                    cfg.shortcut_suffix = s.clone();
                }
            }
            Some(Command::Sweep(s)) => {
                if !s.skip.is_empty() {
                    cfg.sweep_skip = s.skip.clone();
                }
                if !s.targets.is_empty() {
                    cfg.sweep_targets = s.targets.clone();
                }
            }
            Some(Command::Cleanup(_)) | None => {}
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
