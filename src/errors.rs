//! Typed error definitions for photo_by_date.
//! Provides a small set of well-known failure modes for better logs and tests.
//!
//! Only `ConfigError` is fatal to a run; the others describe a single file.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::metadata::ContainerKind;

/// Invalid source/destination pair. Aborts the run before any file is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Source directory does not exist: {0}")]
    SourceMissing(PathBuf),

    #[error("Source is not a directory: {0}")]
    SourceNotDirectory(PathBuf),

    #[error("Destination directory does not exist: {0}")]
    DestinationMissing(PathBuf),

    #[error("Destination is not a directory: {0}")]
    DestinationNotDirectory(PathBuf),

    #[error("Source and destination resolve to the same directory: {0}")]
    SameDirectory(PathBuf),

    #[error("Cannot list source directory {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    /// Stable numeric code, logged as a structured field.
    pub fn code(&self) -> u16 {
        match self {
            ConfigError::SourceMissing(_) => 10,
            ConfigError::SourceNotDirectory(_) => 11,
            ConfigError::DestinationMissing(_) => 12,
            ConfigError::DestinationNotDirectory(_) => 13,
            ConfigError::SameDirectory(_) => 14,
            ConfigError::Unreadable { .. } => 15,
        }
    }
}

/// Failure to obtain a capture date for one image.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported metadata in {path}: expected JPEG/EXIF but found {kind}")]
    UnsupportedMetadata { path: PathBuf, kind: ContainerKind },

    #[error("Error reading metadata on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error decoding metadata on {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

impl ExtractError {
    pub fn code(&self) -> u16 {
        match self {
            ExtractError::UnsupportedMetadata { .. } => 20,
            ExtractError::Io { .. } => 21,
            ExtractError::Decode { .. } => 22,
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            ExtractError::UnsupportedMetadata { path, .. }
            | ExtractError::Io { path, .. }
            | ExtractError::Decode { path, .. } => path,
        }
    }
}

/// Any per-file failure the Organizer reports and then moves past.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Failed to create destination directory: {0}")]
    CreateDir(#[source] io::Error),

    #[error("Failed to copy file: {0}")]
    Copy(#[source] io::Error),

    #[error("Source file has no file name: {0}")]
    NoFileName(PathBuf),
}

impl ProcessError {
    pub fn code(&self) -> u16 {
        match self {
            ProcessError::Extract(e) => e.code(),
            ProcessError::CreateDir(_) => 30,
            ProcessError::Copy(_) => 31,
            ProcessError::NoFileName(_) => 32,
        }
    }

    /// Short machine-friendly label for the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ProcessError::Extract(ExtractError::UnsupportedMetadata { .. }) => "unsupported_metadata",
            ProcessError::Extract(ExtractError::Io { .. }) => "read_error",
            ProcessError::Extract(ExtractError::Decode { .. }) => "decode_error",
            ProcessError::CreateDir(_) => "create_dir",
            ProcessError::Copy(_) => "copy",
            ProcessError::NoFileName(_) => "no_file_name",
        }
    }
}
