//! Line-oriented console prompts.
//!
//! `Console` is the only place that reads user input. It wraps any `BufRead`
//! (stdin in the binary, an in-memory buffer in tests) and any `Write` for the
//! prompt text. Invalid answers re-prompt forever; there is no default action.
//! A closed input stream surfaces as `io::ErrorKind::UnexpectedEof`. Bytes that
//! are not UTF-8 are decoded lossily, so they read as an unrecognized answer.

use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Usage reminder printed after an unrecognized decision.
pub const DECISION_USAGE: &str = "Please enter y/yes, n/no, or q/quit.";
/// Usage reminder printed after an unrecognized overwrite answer.
pub const CONFIRM_USAGE: &str = "Please enter y/yes or n/no.";

/// What the user wants done with one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Copy(PathBuf),
    Skip(PathBuf),
    Quit(PathBuf),
}

/// Map one line of input to an action for `path`. None means "ask again".
pub fn parse_decision(input: &str, path: &Path) -> Option<UserAction> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(UserAction::Copy(path.to_path_buf())),
        "n" | "no" => Some(UserAction::Skip(path.to_path_buf())),
        "q" | "quit" => Some(UserAction::Quit(path.to_path_buf())),
        _ => None,
    }
}

/// Map one line of input to yes/no. None means "ask again".
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Asked by the copy executor before replacing an existing destination.
pub trait OverwritePrompt {
    /// Ok(true) to replace `dest`, Ok(false) to keep it.
    fn confirm_overwrite(&mut self, dest: &Path) -> io::Result<bool>;
}

/// Prompt reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process's stdin/stdout.
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Console::new(stdin.lock(), io::stdout()).with_color(crate::output::stdout_is_tty())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Plain (uncolored) console over `input`/`output`.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Whether status lines written to this console may carry ANSI colors.
    pub fn colored(&self) -> bool {
        self.color
    }

    /// Writer used for prompts; also where the session prints previews.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print `prompt` (no newline) and read one line without its terminator.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            writeln!(self.output)?;
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Ask for a free-form value; blank answers yield None.
    pub fn read_value(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let answer = self.ask(prompt)?;
        let answer = answer.trim();
        Ok(if answer.is_empty() {
            None
        } else {
            Some(answer.to_string())
        })
    }

    /// Ask what to do with `path` until a recognized answer is given.
    pub fn read_decision(&mut self, path: &Path) -> io::Result<UserAction> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        loop {
            let answer = self.ask(&format!("Copy {name}? [y]es / [n]o / [q]uit: "))?;
            if let Some(action) = parse_decision(&answer, path) {
                debug!(path = %path.display(), ?action, "Decision read");
                return Ok(action);
            }
            debug!(input = %answer, "Unrecognized decision");
            writeln!(self.output, "{DECISION_USAGE}")?;
        }
    }
}

impl<R: BufRead, W: Write> OverwritePrompt for Console<R, W> {
    fn confirm_overwrite(&mut self, dest: &Path) -> io::Result<bool> {
        loop {
            let answer = self.ask(&format!(
                "File {} already exists. Overwrite? [y]es / [n]o: ",
                dest.display()
            ))?;
            if let Some(yes) = parse_yes_no(&answer) {
                return Ok(yes);
            }
            writeln!(self.output, "{CONFIRM_USAGE}")?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn all_case_variants_map_correctly() {
        let p = Path::new("a.txt");
        for (word, expected) in [
            ("y", UserAction::Copy(p.into())),
            ("yes", UserAction::Copy(p.into())),
            ("n", UserAction::Skip(p.into())),
            ("no", UserAction::Skip(p.into())),
            ("q", UserAction::Quit(p.into())),
            ("quit", UserAction::Quit(p.into())),
        ] {
            let upper = word.to_uppercase();
            let mut mixed: String = word.chars().take(1).flat_map(char::to_uppercase).collect();
            mixed.push_str(&word[1..]);
            for variant in [word.to_string(), upper, mixed] {
                assert_eq!(parse_decision(&variant, p), Some(expected.clone()), "{variant}");
            }
        }
    }

    #[test]
    fn anything_else_is_rejected() {
        let p = Path::new("a.txt");
        for bad in ["", " ", "ye", "yess", "nope", "qq", "1", "copy", "y n"] {
            assert_eq!(parse_decision(bad, p), None, "{bad:?}");
        }
    }

    #[test]
    fn invalid_input_reprompts_until_valid() {
        let mut c = console("\nmaybe\nQUIT\n");
        let action = c.read_decision(Path::new("/src/a.txt")).unwrap();
        assert_eq!(action, UserAction::Quit(PathBuf::from("/src/a.txt")));
        let (_, out) = c.into_parts();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches(DECISION_USAGE).count(), 2);
        assert_eq!(out.matches("Copy a.txt?").count(), 3);
    }

    #[test]
    fn undecodable_bytes_reprompt_instead_of_failing() {
        let mut c = Console::new(Cursor::new(b"\xff\xfe\n y\n".to_vec()), Vec::new());
        let action = c.read_decision(Path::new("a.txt")).unwrap();
        assert_eq!(action, UserAction::Copy(PathBuf::from("a.txt")));
        let (_, out) = c.into_parts();
        assert_eq!(String::from_utf8(out).unwrap().matches(DECISION_USAGE).count(), 1);
    }

    #[test]
    fn undecodable_overwrite_answer_reprompts() {
        let mut c = Console::new(Cursor::new(b"\x80\nn\n".to_vec()), Vec::new());
        assert!(!c.confirm_overwrite(Path::new("/out/a.txt")).unwrap());
    }

    #[test]
    fn closed_input_is_unexpected_eof() {
        let mut c = console("what\n");
        let err = c.read_decision(Path::new("a.txt")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn overwrite_prompt_is_yes_no_only() {
        let mut c = console("q\nYes\n");
        assert!(c.confirm_overwrite(Path::new("/out/a.txt")).unwrap());
        let (_, out) = c.into_parts();
        assert!(String::from_utf8(out).unwrap().contains(CONFIRM_USAGE));
    }

    #[test]
    fn read_value_treats_blank_as_missing() {
        let mut c = console("   \n  /tmp/out \n");
        assert_eq!(c.read_value("Target: ").unwrap(), None);
        assert_eq!(c.read_value("Target: ").unwrap().as_deref(), Some("/tmp/out"));
    }
}
