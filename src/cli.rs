//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --source and --destination are required unless only inspecting config.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Copy JPEGs into a dated folder tree.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Copy JPEG photos into YYYY/MM/DD folders by EXIF capture date"
)]
pub struct Args {
    /// Directory holding the pictures (only its top level is scanned).
    #[arg(
        short = 's',
        long,
        value_name = "DIR",
        value_hint = ValueHint::DirPath,
        required_unless_present_any = ["print_config", "init_config"]
    )]
    pub source: Option<PathBuf>,

    /// Root of the dated tree; must already exist.
    #[arg(
        short = 'd',
        long,
        value_name = "DIR",
        value_hint = ValueHint::DirPath,
        required_unless_present_any = ["print_config", "init_config"]
    )]
    pub destination: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Dry-run: report destinations but do not create or copy anything.
    #[arg(long, help = "Show where each file would go, but do not copy")]
    pub dry_run: bool,

    /// Copy access/modification times onto each copy.
    #[arg(long, help = "Give each copy the source file's timestamps")]
    pub preserve_timestamps: bool,

    /// Extra chrono pattern for the capture date, tried after the built-ins.
    /// May be date-only (`%Y:%m:%d`). Repeatable.
    #[arg(long = "date-format", value_name = "PATTERN")]
    pub date_formats: Vec<String>,

    /// Print where the config file is looked up (or PHOTO_BY_DATE_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,

    /// Write a template config file at the config location, then exit.
    #[arg(long, help = "Write a template config file and exit")]
    pub init_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(src) = &self.source {
            cfg.source = src.clone();
        }
        if let Some(dst) = &self.destination {
            cfg.destination = dst.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.preserve_timestamps {
            cfg.preserve_timestamps = true;
        }
        // File formats first, then the command line ones.
        cfg.extra_date_formats.extend(self.date_formats.iter().cloned());
    }
}

pub fn parse() -> Args {
    Args::parse()
}
