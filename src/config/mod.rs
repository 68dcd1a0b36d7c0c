//! Config module.
//! Provides configuration types, the default config path, XML loading, and the
//! source/destination validator.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{CONFIG_ENV, default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::{check_directories, directories_are_valid, validate_and_normalize};
pub use xml::{create_template_config, load_config_from_xml, load_config_from_xml_path};
