//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Writes a commented template on request (`--init-config`).
//!
//! Notes:
//! - Source and destination are always given on the command line; the file only
//!   carries defaults for logging and copy behavior.
//! - Unknown XML fields are rejected to surface misconfigurations early.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, path_has_symlink_ancestor};
use crate::config::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "dry_run", default, deserialize_with = "de_bool_trimmed_opt")]
    dry_run: Option<bool>,
    #[serde(
        rename = "preserve_timestamps",
        default,
        deserialize_with = "de_bool_trimmed_opt"
    )]
    preserve_timestamps: Option<bool>,
    /// Extra accepted date patterns, tried in document order after the built-ins.
    #[serde(rename = "date_format", default)]
    date_formats: Vec<String>,
}

// Tolerate surrounding whitespace in boolean elements; anything unparsable is "unset".
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| s.trim().parse::<bool>().ok()))
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = parsed.log_level.as_deref() {
        cfg.log_level = s
            .parse::<LogLevel>()
            .map_err(|e| anyhow::anyhow!(e))
            .context("log_level")?;
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }
    cfg.dry_run = parsed.dry_run.unwrap_or(false);
    cfg.preserve_timestamps = parsed.preserve_timestamps.unwrap_or(false);
    cfg.extra_date_formats = parsed
        .date_formats
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(cfg)
}

/// Load a Config from a specific XML file path (quick_xml).
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in '{}'", path.display()))
}

/// Load the config file from its default location.
/// Returns Ok(None) if the file does not exist; a malformed file is an error.
pub fn load_config_from_xml() -> Result<Option<Config>> {
    let path = default_config_path()?;
    if !path.exists() {
        debug!("No config file at {}; using defaults", path.display());
        return Ok(None);
    }
    let cfg = load_config_from_xml_path(&path)?;
    debug!("Loaded config from {}", path.display());
    Ok(Some(cfg))
}

const TEMPLATE: &str = r#"<!--
  photo_by_date configuration (XML)

  Fields (all optional):
    log_level            -> quiet | normal | info | debug
    log_file             -> append logs to this file as well as stderr
    dry_run              -> true/false; report destinations without copying
    preserve_timestamps  -> true/false; copy mtime/atime onto each copy
    date_format          -> extra chrono pattern for DateTimeOriginal, repeatable;
                            tried after "%Y:%m:%d %H:%M:%S" and "%Y-%m-%d %H:%M:%S";
                            date-only patterns such as "%Y:%m:%d" are accepted

  CLI flags override values in this file.
-->
<config>
  <log_level>normal</log_level>
  <dry_run>false</dry_run>
  <preserve_timestamps>false</preserve_timestamps>
</config>
"#;

/// Create a template config file. Refuses to overwrite an existing file or to
/// write below a symlinked ancestor.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
    }

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("create config file '{}'", path.display()))?;
    file.write_all(TEMPLATE.as_bytes())
        .with_context(|| format!("write config file '{}'", path.display()))?;

    info!("Created template config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn template_round_trips_through_loader() {
        let td = tempdir().unwrap();
        let path = td.path().join("nested").join("config.xml");
        create_template_config(&path).unwrap();
        let cfg = load_config_from_xml_path(&path).unwrap();
        assert_eq!(cfg.log_level, LogLevel::Normal);
        assert!(!cfg.dry_run);
        assert!(cfg.extra_date_formats.is_empty());
    }

    #[test]
    fn template_never_overwrites() {
        let td = tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(&path, "<config/>").unwrap();
        assert!(create_template_config(&path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "<config/>");
    }

    #[test]
    fn repeated_date_formats_keep_order() {
        let td = tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(
            &path,
            "<config>\n  <date_format>%Y/%m/%d %H:%M:%S</date_format>\n  <date_format> %d.%m.%Y %H:%M:%S </date_format>\n  <preserve_timestamps> true </preserve_timestamps>\n</config>\n",
        )
        .unwrap();
        let cfg = load_config_from_xml_path(&path).unwrap();
        assert_eq!(
            cfg.extra_date_formats,
            vec!["%Y/%m/%d %H:%M:%S".to_string(), "%d.%m.%Y %H:%M:%S".to_string()]
        );
        assert!(cfg.preserve_timestamps);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let td = tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(&path, "<config><colour>blue</colour></config>").unwrap();
        let err = load_config_from_xml_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parse config xml"), "{err:#}");
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let td = tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(&path, "<config><log_level>loud</log_level></config>").unwrap();
        assert!(load_config_from_xml_path(&path).is_err());
    }
}
