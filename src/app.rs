//! Application orchestrator.
//! Loads/merges config, initializes logging, validates the working directory,
//! picks the trash, and dispatches to the selected operation.

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use renamer::cli::{Args, Command};
use renamer::config::{CONFIG_ENV, LoadResult, default_config_path, load_or_init, validate_and_normalize};
use renamer::output as out;
use renamer::{
    Config, StagingTrash, SystemProbe, SystemShortcutResolver, SystemTrash, Trash, cleanup_originals,
    rename_files, rename_folders, sweep_build_artifacts,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    let Some(command) = args.command.clone() else {
        out::print_error("No operation given. Use one of: folders, files, sweep, cleanup (see --help).");
        anyhow::bail!("no operation given");
    };

    // Before logging init, so template creation is reported plainly.
    let loaded = load_or_init().map_err(|e| {
        out::print_error(&format!("Cannot load config: {e:#}"));
        e
    })?;
    match &loaded {
        LoadResult::CreatedTemplate(path) => {
            out::print_success(&format!("A template renamer config was written to: {}", path.display()));
            out::print_info("Continuing with built-in defaults. Edit the file to change them; set RENAMER_CONFIG to use another location.");
        }
        LoadResult::Missing(path) => {
            out::print_warn(&format!("{CONFIG_ENV} points to {} which does not exist; using defaults.", path.display()));
        }
        LoadResult::Loaded { .. } => {}
    }

    let mut cfg = loaded.into_config();
    args.apply_overrides(&mut cfg);
    if args.working_dir.is_none() {
        cfg.working_dir = std::env::current_dir().context("determine current directory")?;
    }

    let _guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    debug!(?args, "Starting renamer");

    if let Err(e) = validate_and_normalize(&mut cfg) {
        error!(error = %format!("{e:#}"), "Cannot start");
        out::print_error(&format!("{e:#}"));
        return Err(e);
    }

    let trash: Box<dyn Trash> = match &cfg.staging_trash {
        Some(dir) => Box::new(StagingTrash::new(dir)),
        None => Box::new(SystemTrash),
    };

    dispatch(&command, &cfg, trash.as_ref()).inspect_err(|e| {
        error!(error = %format!("{e:#}"), "Operation failed");
        out::print_error(&format!("{e:#}"));
    })
}

fn dispatch(command: &Command, cfg: &Config, trash: &dyn Trash) -> Result<()> {
    let root = cfg.working_dir.as_path();
    match command {
        Command::Folders(_) => {
            let report = rename_folders(root, &cfg.folder_options()?, trash)?;
            out::print_notices(&report.notices);
            if let Some(alert) = report.conflict_alert() {
                out::print_alert(&alert);
            }
            out::print_success(&report.summary());
            info!(processed = report.processed, conflicts = report.conflicts.len(), "Folders done");
        }
        Command::Files(_) => {
            let report = rename_files(root, &cfg.file_options(), &SystemProbe, &SystemShortcutResolver)?;
            out::print_notices(&report.notices);
            out::print_success(&report.summary());
        }
        Command::Sweep(_) => {
            let report = sweep_build_artifacts(root, &cfg.sweep_options(), trash);
            out::print_notices(&report.errors);
            out::print_success(&report.summary());
        }
        Command::Cleanup(c) => {
            let opts = cfg.cleanup_options(c.raw, c.unedited_jpg, c.video);
            let report = cleanup_originals(root, &opts, trash)?;
            out::print_notices(&report.errors);
            out::print_success(&report.summary());
        }
    }
    Ok(())
}

fn print_config_location() {
    if let Some(cfg_env) = std::env::var_os(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {}\n", cfg_env.to_string_lossy()));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default renamer config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run any operation to create a template.");
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a default config path: {e}")),
    }
}
