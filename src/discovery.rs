//! Candidate file discovery.
//! Walks the source tree (sorted by file name so runs are reproducible) and keeps
//! regular files whose name ends with the configured extension.
//!
//! Any traversal failure aborts the whole scan: callers get the error and no
//! partial list.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::Config;
use crate::errors::DiscoveryError;
use crate::fs_ops::describe_io_error;

/// Case-sensitive suffix match on the raw file name.
pub fn matches_extension(file_name: &OsStr, extension: &str) -> bool {
    file_name
        .as_encoded_bytes()
        .ends_with(extension.as_bytes())
}

/// Recursively collect candidate files under the configured source directory.
pub fn discover(config: &Config) -> Result<Vec<PathBuf>, DiscoveryError> {
    discover_in(config.source_dir(), config.extension())
}

/// Same as [`discover`] for an explicit root and normalized extension.
pub fn discover_in(root: &Path, extension: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if matches_extension(entry.file_name(), extension) {
            debug!(path = %entry.path().display(), "Candidate file");
            found.push(entry.into_path());
        }
    }
    info!(root = %root.display(), %extension, count = found.len(), "Discovery finished");
    Ok(found)
}

fn walk_error(root: &Path, e: walkdir::Error) -> DiscoveryError {
    let path = e.path().unwrap_or(root).to_path_buf();
    let looped = e.loop_ancestor().is_some();
    match e.into_io_error() {
        Some(io) => {
            let detail = describe_io_error("scan", &path, &io);
            DiscoveryError::from_io(&path, detail, io)
        }
        None => DiscoveryError::GenericIO {
            detail: if looped {
                "filesystem loop detected".to_string()
            } else {
                "traversal failed".to_string()
            },
            path,
            cause: None,
        },
    }
}
