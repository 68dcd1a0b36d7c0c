//! Core library for `photo_by_date`.
//!
//! Copies the `.jpg` files of a source directory into a destination tree laid
//! out by capture date (`YYYY/MM/DD/`), read from the EXIF `DateTimeOriginal`
//! tag. Images without a usable date go to `NoExif/`. Existing destination
//! files are never overwritten and sources are never modified.
//!
//! Layout:
//! - `metadata`: EXIF reading, date parsing and sub-path derivation
//! - `config`: Config type, XML loading and directory validation
//! - `fs_ops`: directory creation and no-clobber copying
//! - `organizer`: the per-file pipeline and run report

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod metadata;
pub mod organizer;
pub mod output;
pub mod shutdown;

pub use config::{
    CONFIG_ENV, Config, LogLevel, check_directories, default_config_path, directories_are_valid,
    path_has_symlink_ancestor,
};
pub use errors::{ConfigError, ExtractError, ProcessError};
pub use metadata::{DateParser, NO_EXIF_DIR, SubPath, extract_sub_path};
pub use organizer::{FileOutcome, OrganizeOptions, Organizer, RunReport, list_candidates};
