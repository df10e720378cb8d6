//! Tracing initialization.
//! Builds a subscriber with EnvFilter, supports compact or JSON formats, and optional file logging.
//!
//! Behavior:
//! - Log level is driven by LogLevel (no RUST_LOG override here).
//! - Console logs go to stderr so report summaries on stdout stay clean.
//! - If `log_file` is provided and passes safety checks, a non-blocking file layer is added.
//! - File logging is refused if any ancestor of the file path is a symlink.

use anyhow::{Context, Result};
use chrono::Local;
use renamer::output as out;
use renamer::platform::open_log_file_secure_append;
use renamer::{LogLevel, default_log_path, path_has_symlink_ancestor};
use std::fmt as stdfmt;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry, registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

#[inline]
fn to_level_filter(lvl: LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

fn console_layer(json: bool) -> BoxedLayer {
    let base = tsfmt::layer()
        .with_timer(LocalHumanTime)
        .with_level(true)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json { base.json().boxed() } else { base.compact().boxed() }
}

fn file_layer(json: bool, writer: NonBlocking) -> BoxedLayer {
    let base = tsfmt::layer()
        .with_timer(LocalHumanTime)
        .with_level(true)
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer);
    if json { base.json().boxed() } else { base.compact().boxed() }
}

/// Open a non-blocking file writer, or explain on stderr why not.
fn maybe_open_non_blocking_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(true) => {
            eprintln!(
                "Refusing to enable file logging: ancestor of {} is a symlink; proceeding without file logging.",
                path.display()
            );
            return None;
        }
        Err(e) => {
            eprintln!(
                "Error checking log path {} for symlinks: {}; proceeding without file logging.",
                path.display(),
                e
            );
            return None;
        }
        Ok(false) => {}
    }

    match open_log_file_secure_append(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
            None
        }
    }
}

/// Initialize tracing. Returns the WorkerGuard of the file appender, if any;
/// it must be held until exit so buffered lines are flushed.
pub fn init_tracing(lvl: LogLevel, log_file: Option<&Path>, json: bool) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::default().add_directive(to_level_filter(lvl).into());
    let mut layers: Vec<BoxedLayer> = vec![console_layer(json)];
    let mut guard = None;

    if let Some(path) = log_file {
        if let Some((writer, g)) = maybe_open_non_blocking_writer(path) {
            layers.push(file_layer(json, writer));
            guard = Some(g);
        } else {
            out::print_warn(&format!(
                "Requested file logging to '{}' was not enabled. Check that the parent directory is writable and that no ancestor is a symlink. Logs will continue to the console.",
                path.display()
            ));
            if let Ok(def) = default_log_path() {
                out::print_info(&format!("You can try using the default log path instead: {}", def.display()));
            }
        }
    }

    registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .context("install tracing subscriber")?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use renamer::{FolderOptions, SeparatorPair, StagingTrash, rename_folders};
    use std::fs;
    use tempfile::tempdir;

    fn filter(lvl: LogLevel) -> EnvFilter {
        EnvFilter::default().add_directive(to_level_filter(lvl).into())
    }

    /// Run a folder pass with a scoped file subscriber and return the log text.
    fn folder_pass_logged(lvl: LogLevel) -> String {
        let td = tempdir().unwrap();
        let root = dunce::canonicalize(td.path()).unwrap();
        let work = root.join("work");
        fs::create_dir_all(work.join("2021 06 15")).unwrap();
        let log_path = root.join("renamer.log");

        let (writer, guard) = maybe_open_non_blocking_writer(&log_path).expect("file writer");
        let subscriber = Registry::default().with(file_layer(false, writer)).with(filter(lvl));
        let opts = FolderOptions {
            separators: SeparatorPair::new(' ', '-').unwrap(),
            delete_duplicates: false,
        };
        tracing::subscriber::with_default(subscriber, || {
            rename_folders(&work, &opts, &StagingTrash::new(root.join("bin"))).unwrap();
        });
        drop(guard);

        fs::read_to_string(&log_path).unwrap()
    }

    #[test]
    fn level_mapping_is_one_step_more_verbose() {
        assert_eq!(to_level_filter(LogLevel::Quiet), LevelFilter::ERROR);
        assert_eq!(to_level_filter(LogLevel::Normal), LevelFilter::INFO);
        assert_eq!(to_level_filter(LogLevel::Info), LevelFilter::DEBUG);
        assert_eq!(to_level_filter(LogLevel::Debug), LevelFilter::TRACE);
    }

    #[test]
    fn file_layer_records_folder_pass_events() {
        let text = folder_pass_logged(LogLevel::Normal);
        assert!(text.contains("Renamed folder"), "log was: {text}");
        assert!(text.contains("Folder pass finished"), "log was: {text}");
        assert!(!text.contains('\u{1b}'), "file log must not carry ANSI codes");
    }

    #[test]
    fn quiet_level_drops_info_events() {
        let text = folder_pass_logged(LogLevel::Quiet);
        assert!(!text.contains("Renamed folder"), "log was: {text}");
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_log_directory_is_refused() {
        let td = tempdir().unwrap();
        let root = dunce::canonicalize(td.path()).unwrap();
        fs::create_dir(root.join("real")).unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();

        assert!(maybe_open_non_blocking_writer(&root.join("link").join("renamer.log")).is_none());
        assert!(!root.join("real").join("renamer.log").exists());
    }
}
