//! Source/destination validation.
//! Both must exist, both must be directories, and they must not resolve to the
//! same place. Nothing is created here: an invalid pair aborts the run.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::types::Config;
use crate::errors::ConfigError;

/// Check the source/destination pair and report the first problem found.
pub fn check_directories(source: &Path, destination: &Path) -> Result<(), ConfigError> {
    if !source.exists() {
        return Err(ConfigError::SourceMissing(source.to_path_buf()));
    }
    if !source.is_dir() {
        return Err(ConfigError::SourceNotDirectory(source.to_path_buf()));
    }
    if !destination.exists() {
        return Err(ConfigError::DestinationMissing(destination.to_path_buf()));
    }
    if !destination.is_dir() {
        return Err(ConfigError::DestinationNotDirectory(destination.to_path_buf()));
    }

    let src_real = resolve(source);
    let dst_real = resolve(destination);
    if src_real == dst_real {
        return Err(ConfigError::SameDirectory(src_real));
    }

    debug!(
        source = %src_real.display(),
        destination = %dst_real.display(),
        "Directories validated"
    );
    Ok(())
}

/// True only for two distinct, existing directories.
pub fn directories_are_valid(source: &Path, destination: &Path) -> bool {
    check_directories(source, destination).is_ok()
}

// Canonical form with symlinks resolved; falls back to an absolute path if the
// directory vanished between the checks above and here.
fn resolve(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    })
}

impl Config {
    /// Validate the configured directories.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_directories(&self.source, &self.destination)?;
        info!(
            "Config validated: source='{}' destination='{}' log_file='{}'",
            self.source.display(),
            self.destination.display(),
            self.log_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<none>".into())
        );
        Ok(())
    }
}

/// Replace the configured directories with their canonical form.
/// Call after `validate` so reported paths are absolute.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<(), ConfigError> {
    cfg.validate()?;
    cfg.source = resolve(&cfg.source);
    cfg.destination = resolve(&cfg.destination);
    ensure_readable(&cfg.source)
}

/// Ensure directory is readable by attempting to open its entries.
fn ensure_readable(path: &Path) -> Result<(), ConfigError> {
    fs::read_dir(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("source readable: {}", path.display());
    Ok(())
}
