//! Config module.
//! Provides configuration types, the config file location, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{CONFIG_ENV, default_config_path, path_has_symlink_ancestor};
pub use types::{Config, FileSettings, LogLevel};
pub use validate::normalize_extension;
pub use xml::{load_config_file, load_config_from_xml, parse_config_xml};
