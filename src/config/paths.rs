//! Default path helpers and symlink checks.
//! Determines the OS-appropriate config path and detects symlinked ancestors for safety.

use anyhow::{Context, Result};
use dirs::config_dir;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PHOTO_BY_DATE_CONFIG";

/// Config file location.
///
/// `$PHOTO_BY_DATE_CONFIG` wins (relative values are resolved against the
/// working directory); otherwise `<config_dir>/photo_by_date/config.xml`.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(explicit) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        let p = PathBuf::from(explicit);
        if p.is_absolute() {
            return Ok(p);
        }
        let cwd = env::current_dir().context("resolve current directory")?;
        return Ok(cwd.join(p));
    }

    if let Some(mut base) = config_dir() {
        base.push("photo_by_date");
        base.push("config.xml");
        return Ok(base);
    }

    env::var_os("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("photo_by_date")
                .join("config.xml")
        })
        .context("no config directory and HOME is not set")
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
