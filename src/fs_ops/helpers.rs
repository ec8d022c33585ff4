//! I/O helper utilities.
//!
//! Enriches io::Error text with the operation, the path and a platform-aware hint,
//! so error results shown in the summary are actionable.
//!
//! Usage:
//!   let detail = describe_io_error("copy to temporary file", &tmp, &e);

use std::io;
use std::path::Path;

/// Format a human-friendly message with op/path plus platform-aware hints.
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" (permission denied; check ownership and write permissions)");
                }
                libc::ENOENT => {
                    msg.push_str(" (path not found; verify it exists)");
                }
                libc::ENOSPC => {
                    msg.push_str(" (insufficient space on device)");
                }
                libc::EROFS => {
                    msg.push_str(" (read-only filesystem; cannot write here)");
                }
                libc::EIO => {
                    msg.push_str(" (low-level I/O error; the device may be failing or detached)");
                }
                libc::ESTALE | libc::ENOTCONN => {
                    msg.push_str(" (network filesystem unavailable; check the mount)");
                }
                libc::ELOOP => {
                    msg.push_str(" (too many symbolic link levels; possible symlink cycle)");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" (filename or path too long; shorten path segments)");
                }
                libc::EMFILE => {
                    msg.push_str(" (process file descriptor limit reached)");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" (access denied; check permissions)"),
                32 => msg.push_str(" (sharing violation; file is in use)"),
                2 | 3 => msg.push_str(" (path not found; verify it exists)"),
                112 => msg.push_str(" (insufficient disk space)"),
                19 => msg.push_str(" (write protected / read-only media)"),
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" (permission denied; check ownership and write permissions)");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" (path not found; verify it exists)");
            }
            io::ErrorKind::UnexpectedEof => {
                msg.push_str(" (input closed)");
            }
            _ => {}
        }
    }

    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notfound_fallback_hint_includes_path() {
        let p = Path::new("/nonexistent/path/for/test");
        let msg = describe_io_error("open", p, &io::Error::from(io::ErrorKind::NotFound));
        assert!(msg.contains("open"));
        assert!(msg.contains("/nonexistent/path/for/test"));
        assert!(msg.contains("path not found"));
    }

    #[cfg(unix)]
    #[test]
    fn enospc_hint_and_code_present() {
        let msg = describe_io_error(
            "write",
            Path::new("/tmp"),
            &io::Error::from_raw_os_error(libc::ENOSPC),
        );
        assert!(msg.contains("insufficient space"), "msg was: {msg}");
        assert!(msg.contains("os code"));
    }

    #[cfg(unix)]
    #[test]
    fn erofs_hint_present() {
        let msg = describe_io_error(
            "write",
            Path::new("/tmp"),
            &io::Error::from_raw_os_error(libc::EROFS),
        );
        assert!(msg.contains("read-only filesystem"), "msg was: {msg}");
    }
}
