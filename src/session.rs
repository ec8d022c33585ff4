//! The interactive run: discover, then preview/decide/copy each file in order,
//! then print the summary.
//!
//! Discovering -> (no files: Finished) -> for each file: Previewing -> Deciding ->
//! Copying | Skipping | Aborted -> next file or Finished. Quit leaves the remaining
//! files unvisited; they get no result.

use std::io::{self, BufRead, Write};
use tracing::{error, info, info_span, warn};

use crate::config::Config;
use crate::discovery::discover;
use crate::fs_ops::copy_to_target;
use crate::output::result_line;
use crate::preview::render_preview;
use crate::prompt::{Console, UserAction};
use crate::state::{OperationResult, ProcessingState, SKIP_USER_DECLINED};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Discovery produced nothing (or failed); no summary printed.
    NoFiles,
    /// Every discovered file was visited.
    Completed,
    /// The user chose quit.
    Aborted,
    /// Input ended while waiting for a decision.
    InputClosed,
}

#[derive(Debug)]
pub struct SessionReport {
    pub outcome: RunOutcome,
    pub state: ProcessingState,
}

/// Run the whole interactive flow against `console`.
///
/// Only console I/O failures (other than end of input) are returned as errors;
/// discovery and copy failures are reported inline and in the summary.
pub fn run_session<R: BufRead, W: Write>(
    config: &Config,
    console: &mut Console<R, W>,
) -> io::Result<SessionReport> {
    let files = match discover(config) {
        Ok(files) => files,
        Err(e) => {
            error!(code = e.code(), error = %e, "Discovery failed");
            writeln!(console.output(), "Discovery failed: {e}")?;
            Vec::new()
        }
    };

    if files.is_empty() {
        writeln!(
            console.output(),
            "No files with extension '{}' found in {}.",
            config.extension(),
            config.source_dir().display()
        )?;
        return Ok(SessionReport {
            outcome: RunOutcome::NoFiles,
            state: ProcessingState::new(0),
        });
    }

    writeln!(
        console.output(),
        "Found {} file(s) with extension '{}'.\n",
        files.len(),
        config.extension()
    )?;

    let mut state = ProcessingState::new(files.len());
    let mut outcome = RunOutcome::Completed;

    for (index, file) in files.iter().enumerate() {
        let _span = info_span!("file", n = index + 1, path = %file.display()).entered();

        writeln!(console.output(), "[{}/{}]", index + 1, files.len())?;
        write!(console.output(), "{}", render_preview(file))?;

        let action = match console.read_decision(file) {
            Ok(action) => action,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                warn!("Input closed; stopping before remaining files");
                writeln!(console.output(), "Input closed; stopping.")?;
                outcome = RunOutcome::InputClosed;
                break;
            }
            Err(e) => return Err(e),
        };

        let result = match action {
            UserAction::Copy(path) => copy_to_target(&path, config.target_dir(), &mut *console),
            UserAction::Skip(path) => OperationResult::Skip {
                source: path,
                reason: SKIP_USER_DECLINED.to_string(),
            },
            UserAction::Quit(_) => {
                info!(visited = index, total = files.len(), "Quit requested");
                outcome = RunOutcome::Aborted;
                break;
            }
        };

        let line = result_line(&result, console.colored());
        writeln!(console.output(), "{line}\n")?;
        state.record(result);
    }

    write!(console.output(), "{}", state.format_summary())?;
    if let Some(details) = state.format_error_details() {
        write!(console.output(), "\n{details}")?;
    }
    Ok(SessionReport { outcome, state })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(c: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(c.into_parts().1).unwrap()
    }

    #[test]
    fn yes_then_no_copies_one_and_skips_one() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/a.txt").write_str("A").unwrap();
        temp.child("src/b.txt").write_str("B").unwrap();
        temp.child("src/c.md").write_str("C").unwrap();
        let cfg = Config::validate(temp.path().join("src"), temp.path().join("out"), "txt").unwrap();

        let mut c = console("y\nn\n");
        let report = run_session(&cfg, &mut c).unwrap();

        assert_eq!(report.outcome, RunOutcome::Completed);
        assert_eq!(report.state.total_files(), 2);
        assert_eq!(report.state.copied_files(), 1);
        assert_eq!(report.state.skipped_files(), 1);
        assert_eq!(report.state.error_files(), 0);
        temp.child("out/a.txt").assert("A");
        assert!(!temp.path().join("out/b.txt").exists());

        let out = output(c);
        assert!(out.contains("Operation Summary:"));
        assert!(out.contains("Skipped: "));
        assert!(out.contains("(user declined)"));
    }

    #[test]
    fn quit_leaves_remaining_files_unvisited() {
        let temp = assert_fs::TempDir::new().unwrap();
        for n in ["a.log", "b.log", "c.log"] {
            temp.child("src").child(n).write_str(n).unwrap();
        }
        let cfg = Config::validate(temp.path().join("src"), temp.path().join("out"), ".log").unwrap();

        let mut c = console("n\nq\ny\n");
        let report = run_session(&cfg, &mut c).unwrap();

        assert_eq!(report.outcome, RunOutcome::Aborted);
        assert_eq!(report.state.total_files(), 3);
        assert_eq!(report.state.processed_files(), 1);
        let out = output(c);
        assert!(out.contains("Total files found: 3"));
        assert!(!out.contains("c.log"), "third file must never be previewed");
    }

    #[test]
    fn no_matching_files_skips_summary() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/readme.md").write_str("x").unwrap();
        let cfg = Config::validate(temp.path().join("src"), temp.path().join("out"), "txt").unwrap();

        let mut c = console("");
        let report = run_session(&cfg, &mut c).unwrap();

        assert_eq!(report.outcome, RunOutcome::NoFiles);
        let out = output(c);
        assert!(out.contains("No files with extension '.txt'"));
        assert!(!out.contains("Operation Summary:"));
    }

    #[test]
    fn closed_input_stops_and_still_summarizes() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/a.txt").write_str("A").unwrap();
        temp.child("src/b.txt").write_str("B").unwrap();
        let cfg = Config::validate(temp.path().join("src"), temp.path().join("out"), "txt").unwrap();

        let mut c = console("y\n");
        let report = run_session(&cfg, &mut c).unwrap();

        assert_eq!(report.outcome, RunOutcome::InputClosed);
        assert_eq!(report.state.copied_files(), 1);
        assert!(output(c).contains("Files copied: 1"));
    }

    #[test]
    fn vanished_source_reports_discovery_failure() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/a.txt").write_str("A").unwrap();
        let cfg = Config::validate(temp.path().join("src"), temp.path().join("out"), "txt").unwrap();
        std::fs::remove_dir_all(temp.path().join("src")).unwrap();

        let mut c = console("y\n");
        let report = run_session(&cfg, &mut c).unwrap();

        assert_eq!(report.outcome, RunOutcome::NoFiles);
        assert_eq!(report.state.total_files(), 0);
        let out = output(c);
        assert!(out.contains("Discovery failed: "), "{out}");
        assert!(out.contains("No files with extension '.txt'"));
        assert!(!out.contains("Operation Summary:"));
    }

    #[test]
    fn undecodable_answer_does_not_end_the_run() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/a.txt").write_str("A").unwrap();
        temp.child("src/b.txt").write_str("B").unwrap();
        let cfg = Config::validate(temp.path().join("src"), temp.path().join("out"), "txt").unwrap();

        let mut c = Console::new(Cursor::new(b"y\n\xff\nn\n".to_vec()), Vec::new());
        let report = run_session(&cfg, &mut c).unwrap();

        assert_eq!(report.outcome, RunOutcome::Completed);
        assert_eq!(report.state.copied_files(), 1);
        assert_eq!(report.state.skipped_files(), 1);
        let out = output(c);
        assert!(out.contains("Please enter y/yes, n/no, or q/quit."));
        assert!(out.contains("Files skipped: 1"));
    }

    #[test]
    fn same_name_collision_asks_before_overwrite() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/one/notes.txt").write_str("first").unwrap();
        temp.child("src/two/notes.txt").write_str("second").unwrap();
        let cfg = Config::validate(temp.path().join("src"), temp.path().join("out"), "txt").unwrap();

        // copy first, copy second -> collision, decline overwrite
        let mut c = console("y\ny\nn\n");
        let report = run_session(&cfg, &mut c).unwrap();

        assert_eq!(report.state.copied_files(), 1);
        assert_eq!(report.state.skipped_files(), 1);
        temp.child("out/notes.txt").assert("first");
        assert!(output(c).contains("existing file, overwrite declined"));
    }
}
