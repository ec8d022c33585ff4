//! XML configuration support.
//! Loads optional defaults from config.xml (quick_xml + serde):
//!
//! <config>
//!   <source_dir>/path/to/scan</source_dir>
//!   <target_dir>/path/to/copy/into</target_dir>
//!   <extension>txt</extension>
//!   <log_level>normal</log_level>
//!   <log_file>/path/to/zfsl.log</log_file>
//! </config>
//!
//! Notes:
//! - A missing file is not an error; nothing is written on the user's behalf.
//! - Unknown elements are rejected so typos surface early.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::paths::default_config_path;
use super::types::{FileSettings, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    source_dir: Option<String>,
    target_dir: Option<String>,
    extension: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

/// Trim and drop blank values.
fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse config.xml content into FileSettings.
pub fn parse_config_xml(content: &str) -> Result<FileSettings> {
    let parsed: XmlConfig = from_xml_str(content).context("parse config.xml")?;

    let log_level = match non_blank(parsed.log_level) {
        Some(raw) => match LogLevel::parse(&raw) {
            Some(lvl) => Some(lvl),
            None => {
                warn!(value = %raw, "Ignoring unknown log_level in config");
                None
            }
        },
        None => None,
    };

    Ok(FileSettings {
        source_dir: non_blank(parsed.source_dir).map(PathBuf::from),
        target_dir: non_blank(parsed.target_dir).map(PathBuf::from),
        extension: non_blank(parsed.extension),
        log_level,
        log_file: non_blank(parsed.log_file).map(PathBuf::from),
    })
}

/// Read settings from `path`. Returns None if the file does not exist.
pub fn load_config_file(path: &Path) -> Result<Option<FileSettings>> {
    if !path.exists() {
        debug!(path = %path.display(), "No config file present");
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    let settings = parse_config_xml(&content)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    debug!(path = %path.display(), ?settings, "Loaded config file");
    Ok(Some(settings))
}

/// Load settings from the default location (see [`default_config_path`]).
pub fn load_config_from_xml() -> Result<Option<FileSettings>> {
    match default_config_path() {
        Some(path) => load_config_file(&path),
        None => Ok(None),
    }
}
