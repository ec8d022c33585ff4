//! Typed error definitions for zfsl.
//! One enum per pipeline stage so callers can tell fatal configuration problems
//! apart from recoverable per-file failures.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration-time failures. Always fatal; the process exits non-zero.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid source directory '{path}': {reason}")]
    InvalidSource { path: PathBuf, reason: String },

    #[error("Invalid target directory '{path}': {reason}")]
    InvalidTarget { path: PathBuf, reason: String },

    #[error("Invalid file extension '{0}': expected at least one character after the dot")]
    InvalidExtension(String),

    #[error("Missing required value: {0}")]
    MissingRequiredValue(&'static str),
}

impl ConfigError {
    /// Stable short code for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::InvalidSource { .. } => "invalid_source",
            ConfigError::InvalidTarget { .. } => "invalid_target",
            ConfigError::InvalidExtension(_) => "invalid_extension",
            ConfigError::MissingRequiredValue(_) => "missing_value",
        }
    }

    /// One-line hint printed after the error message.
    pub fn guidance(&self) -> &'static str {
        match self {
            ConfigError::InvalidSource { .. } => {
                "Pass an existing, readable directory with -s/--source."
            }
            ConfigError::InvalidTarget { .. } => {
                "Pass a writable directory with -t/--target, or a new one whose parent is writable."
            }
            ConfigError::InvalidExtension(_) => "Pass an extension such as 'txt' or '.txt' with -e/--extension.",
            ConfigError::MissingRequiredValue(_) => "Provide the value as a flag or answer the prompt.",
        }
    }
}

/// Failures while walking the source tree. Fatal to discovery only.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Access denied while scanning {path}: {detail}")]
    AccessDenied {
        path: PathBuf,
        detail: String,
        #[source]
        cause: io::Error,
    },

    #[error("Path not found while scanning {path}: {detail}")]
    NotFound {
        path: PathBuf,
        detail: String,
        #[source]
        cause: io::Error,
    },

    #[error("File system unavailable while scanning {path}: {detail}")]
    FileSystemUnavailable {
        path: PathBuf,
        detail: String,
        #[source]
        cause: io::Error,
    },

    #[error("I/O error while scanning {path}: {detail}")]
    GenericIO {
        path: PathBuf,
        detail: String,
        #[source]
        cause: Option<io::Error>,
    },
}

impl DiscoveryError {
    /// Classify an I/O failure observed at `path` during the walk.
    pub fn from_io(path: &Path, detail: String, cause: io::Error) -> Self {
        let path = path.to_path_buf();
        match IoCategory::of(&cause) {
            IoCategory::AccessDenied => DiscoveryError::AccessDenied { path, detail, cause },
            IoCategory::NotFound => DiscoveryError::NotFound { path, detail, cause },
            IoCategory::Unavailable => DiscoveryError::FileSystemUnavailable { path, detail, cause },
            IoCategory::Other => DiscoveryError::GenericIO {
                path,
                detail,
                cause: Some(cause),
            },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DiscoveryError::AccessDenied { .. } => "access_denied",
            DiscoveryError::NotFound { .. } => "not_found",
            DiscoveryError::FileSystemUnavailable { .. } => "fs_unavailable",
            DiscoveryError::GenericIO { .. } => "io_error",
        }
    }
}

/// Per-file copy failures. Recorded as an error result; never abort the run.
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("{detail}")]
    AccessDenied {
        path: PathBuf,
        detail: String,
        #[source]
        cause: io::Error,
    },

    #[error("{detail}")]
    FileSystemUnavailable {
        path: PathBuf,
        detail: String,
        #[source]
        cause: io::Error,
    },

    #[error("{detail}")]
    GenericIO {
        path: PathBuf,
        detail: String,
        #[source]
        cause: io::Error,
    },
}

impl CopyError {
    /// Classify an I/O failure observed at `path` while copying.
    pub fn from_io(path: &Path, detail: String, cause: io::Error) -> Self {
        let path = path.to_path_buf();
        match IoCategory::of(&cause) {
            IoCategory::AccessDenied => CopyError::AccessDenied { path, detail, cause },
            IoCategory::Unavailable => CopyError::FileSystemUnavailable { path, detail, cause },
            IoCategory::NotFound | IoCategory::Other => CopyError::GenericIO { path, detail, cause },
        }
    }

    /// Human-readable message selected by failure category.
    pub fn user_message(&self) -> &'static str {
        match self {
            CopyError::AccessDenied { .. } => "Permission denied while copying file",
            CopyError::FileSystemUnavailable { .. } => "File system unavailable while copying file",
            CopyError::GenericIO { .. } => "I/O error while copying file",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CopyError::AccessDenied { .. } => "access_denied",
            CopyError::FileSystemUnavailable { .. } => "fs_unavailable",
            CopyError::GenericIO { .. } => "io_error",
        }
    }
}

/// Coarse I/O failure buckets shared by discovery and copy classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IoCategory {
    AccessDenied,
    NotFound,
    Unavailable,
    Other,
}

impl IoCategory {
    pub(crate) fn of(e: &io::Error) -> Self {
        #[cfg(unix)]
        if let Some(code) = e.raw_os_error() {
            match code {
                libc::EACCES | libc::EPERM => return IoCategory::AccessDenied,
                libc::ENOENT => return IoCategory::NotFound,
                libc::ENOSPC
                | libc::EROFS
                | libc::EIO
                | libc::ENODEV
                | libc::ENXIO
                | libc::ESTALE
                | libc::ENOTCONN => return IoCategory::Unavailable,
                _ => {}
            }
        }
        match e.kind() {
            io::ErrorKind::PermissionDenied => IoCategory::AccessDenied,
            io::ErrorKind::NotFound => IoCategory::NotFound,
            io::ErrorKind::StorageFull | io::ErrorKind::ReadOnlyFilesystem => IoCategory::Unavailable,
            _ => IoCategory::Other,
        }
    }
}
