//! Config validation logic.
//! Verifies the source is a readable directory, the target is (or can become) a
//! writable directory, and normalizes the extension.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::errors::ConfigError;
use crate::fs_ops::unique_temp_path;

use super::types::Config;

impl Config {
    /// Validate raw settings and build an immutable Config.
    pub fn validate(
        source_dir: impl Into<PathBuf>,
        target_dir: impl Into<PathBuf>,
        extension: &str,
    ) -> Result<Config, ConfigError> {
        let source_dir = source_dir.into();
        let target_dir = target_dir.into();

        ensure_readable_dir(&source_dir)?;
        ensure_target_usable(&target_dir)?;
        let extension = normalize_extension(extension)?;

        info!(
            source = %source_dir.display(),
            target = %target_dir.display(),
            extension = %extension,
            "Config validated"
        );
        Ok(Config {
            source_dir,
            target_dir,
            extension,
        })
    }
}

/// Prefix '.' when absent; reject anything without a character after the dot.
pub fn normalize_extension(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{trimmed}")
    };
    if normalized.len() <= 1 {
        error!(extension = raw, "Rejected empty extension");
        return Err(ConfigError::InvalidExtension(raw.to_string()));
    }
    Ok(normalized)
}

/// Source must exist, be a directory and be listable.
fn ensure_readable_dir(path: &Path) -> Result<(), ConfigError> {
    let invalid = |reason: String| {
        error!(path = %path.display(), %reason, "Invalid source directory");
        ConfigError::InvalidSource {
            path: path.to_path_buf(),
            reason,
        }
    };
    if !path.exists() {
        return Err(invalid("does not exist".into()));
    }
    if !path.is_dir() {
        return Err(invalid("is not a directory".into()));
    }
    fs::read_dir(path).map_err(|e| invalid(format!("cannot be read ({e})")))?;
    debug!(path = %path.display(), "Source readable");
    Ok(())
}

/// Target must be a writable directory, or missing with a writable parent.
fn ensure_target_usable(path: &Path) -> Result<(), ConfigError> {
    let invalid = |reason: String| {
        error!(path = %path.display(), %reason, "Invalid target directory");
        ConfigError::InvalidTarget {
            path: path.to_path_buf(),
            reason,
        }
    };

    if path.exists() {
        if !path.is_dir() {
            return Err(invalid("exists but is not a directory".into()));
        }
        is_writable_probe(path).map_err(|e| invalid(format!("is not writable ({e})")))?;
        debug!(path = %path.display(), "Target writable");
        return Ok(());
    }

    let parent = match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => return Err(invalid("has no parent directory".into())),
    };
    if !parent.is_dir() {
        return Err(invalid(format!(
            "does not exist and parent '{}' is missing",
            parent.display()
        )));
    }
    is_writable_probe(parent).map_err(|e| {
        invalid(format!(
            "does not exist and parent '{}' is not writable ({e})",
            parent.display()
        ))
    })?;
    debug!(path = %path.display(), "Target will be created on first copy");
    Ok(())
}

/// Quick writable probe: create and remove a small file in `dir`.
/// Uses create_new to avoid clobbering existing files; the name is fresh per call.
fn is_writable_probe(dir: &Path) -> io::Result<()> {
    let probe = unique_temp_path(dir, "probe");
    fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)?;
    let _ = fs::remove_file(&probe);
    Ok(())
}
