//! CLI definition and parsing.
//! Defines Args and helpers to merge flags with config-file values.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - No positional arguments are accepted; clap rejects strays before any filesystem access.

use clap::{Parser, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{FileSettings, LogLevel};

/// Recursively find files by extension, preview each, and choose which to copy.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Preview files by extension and interactively copy the ones you pick"
)]
pub struct Args {
    /// Directory to scan recursively (defaults to the current directory).
    #[arg(short = 's', long = "source", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Directory to copy chosen files into (prompted for when absent).
    #[arg(short = 't', long = "target", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub target: Option<PathBuf>,

    /// File extension to match, with or without the leading dot (prompted for when absent).
    #[arg(short = 'e', long = "extension", value_name = "EXT")]
    pub extension: Option<String>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Also write logs to this file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Print the config file location used by zfsl and exit.
    #[arg(long)]
    pub print_config: bool,
}

/// Source/target/extension after merging flags with the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSettings {
    pub source: Option<PathBuf>,
    pub target: Option<PathBuf>,
    pub extension: Option<String>,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config/default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.clone()
    }

    /// Flags win over config-file values; unset on both sides stays None.
    pub fn merged_with(&self, file: Option<&FileSettings>) -> RawSettings {
        let file = file.cloned().unwrap_or_default();
        RawSettings {
            source: self.source.as_deref().map(sanitize_path).or(file.source_dir),
            target: self.target.as_deref().map(sanitize_path).or(file.target_dir),
            extension: self.extension.clone().or(file.extension),
        }
    }
}

/// Strip quotes users often paste around paths, e.g. `"/my dir"` or `'C:\x\'`.
pub fn sanitize_path(p: &Path) -> PathBuf {
    sanitize_str(&p.to_string_lossy())
}

/// String form of [`sanitize_path`], used for prompted values.
pub fn sanitize_str(s: &str) -> PathBuf {
    let trimmed = s.trim();
    let quoted = trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')));
    let inner = if quoted {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };
    PathBuf::from(inner)
}

pub fn parse() -> Result<Args, clap::Error> {
    Args::try_parse()
}
