//! User-facing console text.
//!
//! Status prefixes (`info:`, `warn:`, ...) and the per-file result lines
//! (`Copied:`, `Skipped:`, `Error:`) share one palette. Colors are only used when
//! the stream being written is a TTY.

use owo_colors::OwoColorize;

use crate::state::OperationResult;

pub fn stdout_is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Info,
    Warn,
    Error,
    Ok,
}

impl Tone {
    fn paint(self, label: &str, color: bool) -> String {
        if !color {
            return label.to_string();
        }
        match self {
            Tone::Info => label.cyan().bold().to_string(),
            Tone::Warn => label.yellow().bold().to_string(),
            Tone::Error => label.red().bold().to_string(),
            Tone::Ok => label.green().bold().to_string(),
        }
    }
}

pub fn print_info(msg: &str) {
    println!("{} {}", Tone::Info.paint("info:", stdout_is_tty()), msg);
}

pub fn print_warn(msg: &str) {
    eprintln!("{} {}", Tone::Warn.paint("warn:", stderr_is_tty()), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", Tone::Error.paint("error:", stderr_is_tty()), msg);
}

pub fn print_success(msg: &str) {
    println!("{} {}", Tone::Ok.paint("ok:", stdout_is_tty()), msg);
}

/// Tool name and underline, printed once at startup.
pub fn print_banner(title: &str) {
    let rule = "=".repeat(title.chars().count());
    if stdout_is_tty() {
        println!("{}\n{}", title.bold(), rule);
    } else {
        println!("{title}\n{rule}");
    }
}

/// One line telling the user what happened to a candidate file.
pub fn result_line(result: &OperationResult, color: bool) -> String {
    match result {
        OperationResult::Success { source, target } => format!(
            "{} {} -> {}",
            Tone::Ok.paint("Copied:", color),
            source.display(),
            target.display()
        ),
        OperationResult::Skip { source, reason } => format!(
            "{} {} ({})",
            Tone::Warn.paint("Skipped:", color),
            source.display(),
            reason
        ),
        OperationResult::Error {
            source, message, ..
        } => format!(
            "{} {}: {}",
            Tone::Error.paint("Error:", color),
            source.display(),
            message
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CopyError;
    use std::io;
    use std::path::{Path, PathBuf};

    #[test]
    fn plain_result_lines() {
        let ok = OperationResult::Success {
            source: PathBuf::from("/s/a.txt"),
            target: PathBuf::from("/t/a.txt"),
        };
        assert_eq!(result_line(&ok, false), "Copied: /s/a.txt -> /t/a.txt");

        let skip = OperationResult::Skip {
            source: PathBuf::from("/s/b.txt"),
            reason: "user declined".into(),
        };
        assert_eq!(result_line(&skip, false), "Skipped: /s/b.txt (user declined)");

        let e = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let fail = OperationResult::Error {
            source: PathBuf::from("/s/c.txt"),
            message: "Permission denied while copying file".into(),
            cause: CopyError::from_io(Path::new("/s/c.txt"), "detail".into(), e),
        };
        assert_eq!(
            result_line(&fail, false),
            "Error: /s/c.txt: Permission denied while copying file"
        );
    }

    #[test]
    fn colored_label_keeps_text() {
        let skip = OperationResult::Skip {
            source: PathBuf::from("b.txt"),
            reason: "user declined".into(),
        };
        let line = result_line(&skip, true);
        assert!(line.contains("\u{1b}["));
        assert!(line.contains("Skipped:"));
        assert!(line.ends_with("b.txt (user declined)"));
    }
}
