//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler,
//! validates the directories and runs the organizer.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

use photo_by_date::cli::Args;
use photo_by_date::config::{
    CONFIG_ENV, Config, create_template_config, default_config_path, load_config_from_xml,
    validate_and_normalize,
};
use photo_by_date::output as out;
use photo_by_date::{OrganizeOptions, Organizer, RunReport, shutdown};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Config inspection flags run before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }
    if args.init_config {
        let path = default_config_path()?;
        create_template_config(&path).inspect_err(|e| {
            out::print_error(&format!("Could not write template config: {e:#}"));
        })?;
        out::print_success(&format!("A template config was written to: {}", path.display()));
        out::print_info("Edit it, then run with --source and --destination.");
        return Ok(());
    }

    // File values first, CLI flags win.
    let mut cfg = load_config_from_xml()
        .inspect_err(|e| out::print_error(&format!("Failed to load config: {e:#}")))?
        .unwrap_or_default();
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json)
        .inspect_err(|e| out::print_error(&format!("Failed to initialize logging: {e}")))?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        if let Err(e) = shutdown::install(move || {
            out::print_warn("Received interrupt; finishing the current file...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        }) {
            warn!(error = %e, "Could not install Ctrl-C handler");
        }
    }

    debug!("Starting photo_by_date: {:?}", args);

    let result = organize(&mut cfg);

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn organize(cfg: &mut Config) -> Result<()> {
    if let Err(e) = validate_and_normalize(cfg) {
        error!(code = e.code(), error = %e, "Invalid source or destination");
        out::print_error(&e.to_string());
        return Err(e.into());
    }

    let report = Organizer::new(OrganizeOptions::from(&*cfg)).run()?;
    print_summary(&report, cfg.dry_run);
    Ok(())
}

fn print_summary(report: &RunReport, dry_run: bool) {
    info!(
        copied = report.copied(),
        planned = report.planned(),
        no_exif = report.fallbacks(),
        collisions = report.collisions(),
        failed = report.failures(),
        interrupted = report.interrupted,
        "Run finished"
    );
    let done = if dry_run {
        format!("{} planned", report.planned())
    } else {
        format!("{} copied", report.copied())
    };
    let summary = format!(
        "{done} ({} to NoExif), {} already present, {} failed",
        report.fallbacks(),
        report.collisions(),
        report.failures()
    );
    if report.interrupted {
        out::print_warn(&format!("Interrupted: {summary}"));
    } else {
        out::print_info(&summary);
    }
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
        out::print_info(&format!(
            "To override, unset {CONFIG_ENV} or set it to another file."
        ));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run with --init-config to create a template.");
            }
        }
        Err(e) => {
            out::print_error(&format!("Could not determine a default config path: {e}"));
        }
    }
}
