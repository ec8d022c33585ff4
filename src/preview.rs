//! Candidate preview: path, size, modification time and the head of the file.
//!
//! Only the first [`PREVIEW_LINES`] lines are decoded, each cut to at most
//! [`MAX_LINE_BYTES`]. The rest of the file is scanned chunk by chunk for
//! newlines to report how many lines were left out; no line is ever held whole.

use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Number of lines shown in a preview.
pub const PREVIEW_LINES: usize = 20;
/// Longest slice of a single line kept for display.
pub const MAX_LINE_BYTES: usize = 512;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Bytes below 1 KiB, one-decimal KB below 1 MiB, one-decimal MB above.
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} bytes")
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

/// One displayed line; `truncated` is set when the line went past [`MAX_LINE_BYTES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadLine {
    pub text: String,
    pub truncated: bool,
}

/// Head of a text file plus the count of lines not shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextHead {
    pub lines: Vec<HeadLine>,
    pub remaining: usize,
}

/// Read up to `max` lines as UTF-8 and count the lines after them.
pub fn read_head<R: BufRead>(mut reader: R, max: usize) -> io::Result<TextHead> {
    let mut lines = Vec::with_capacity(max);
    let mut raw = Vec::with_capacity(MAX_LINE_BYTES);
    while lines.len() < max {
        raw.clear();
        let n = (&mut reader)
            .take(MAX_LINE_BYTES as u64)
            .read_until(b'\n', &mut raw)?;
        if n == 0 {
            return Ok(TextHead {
                lines,
                remaining: 0,
            });
        }
        let hit_cap = n == MAX_LINE_BYTES && raw.last() != Some(&b'\n');
        let truncated = hit_cap && skip_line(&mut reader)?;
        lines.push(HeadLine {
            text: decode_line(&raw, truncated)?,
            truncated,
        });
    }

    let remaining = count_lines(&mut reader)?;
    Ok(TextHead { lines, remaining })
}

/// Consume the rest of the current line. Returns true if any bytes besides the
/// terminator were dropped.
fn skip_line<R: BufRead>(reader: &mut R) -> io::Result<bool> {
    let mut dropped = false;
    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            return Ok(dropped);
        }
        match chunk.iter().position(|&b| b == b'\n') {
            Some(i) => {
                dropped |= i > 0;
                reader.consume(i + 1);
                return Ok(dropped);
            }
            None => {
                let len = chunk.len();
                dropped = true;
                reader.consume(len);
            }
        }
    }
}

/// Number of lines left in `reader`; a final line without a newline counts.
fn count_lines<R: BufRead>(reader: &mut R) -> io::Result<usize> {
    let mut count = 0;
    let mut open_line = false;
    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            break;
        }
        count += chunk.iter().filter(|&&b| b == b'\n').count();
        open_line = chunk.last() != Some(&b'\n');
        let len = chunk.len();
        reader.consume(len);
    }
    Ok(count + usize::from(open_line))
}

/// Strict UTF-8, except that a character split by truncation is dropped.
fn decode_line(raw: &[u8], truncated: bool) -> io::Result<String> {
    let mut bytes = raw;
    while let [rest @ .., b'\n' | b'\r'] = bytes {
        bytes = rest;
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_string()),
        Err(e) if truncated && e.error_len().is_none() => {
            Ok(String::from_utf8_lossy(&bytes[..e.valid_up_to()]).into_owned())
        }
        Err(e) => Err(io::Error::new(io::ErrorKind::InvalidData, e)),
    }
}

/// Render the preview block for `path`. Never fails: unreadable parts are reported inline.
pub fn render_preview(path: &Path) -> String {
    let shown = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = format!("File: {}\n", shown.display());

    match fs::metadata(path) {
        Ok(meta) => {
            out.push_str(&format!("Size: {}\n", format_size(meta.len())));
            let modified = meta
                .modified()
                .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|_| "unknown".to_string());
            out.push_str(&format!("Modified: {modified}\n"));
        }
        Err(e) => {
            out.push_str(&format!("Size: unavailable ({e})\nModified: unavailable\n"));
        }
    }

    out.push_str(&format!("--- Preview (first {PREVIEW_LINES} lines) ---\n"));
    match File::open(path).and_then(|f| read_head(BufReader::new(f), PREVIEW_LINES)) {
        Ok(head) => {
            for (i, line) in head.lines.iter().enumerate() {
                let cut = if line.truncated { " [...]" } else { "" };
                out.push_str(&format!("{:03}: {}{}\n", i + 1, line.text, cut));
            }
            if head.remaining > 0 {
                out.push_str(&format!("... ({} more lines)\n", head.remaining));
            }
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Preview content unavailable");
            out.push_str(&format!("[content preview unavailable: {e}]\n"));
        }
    }
    out.push_str("-------------------------------\n");
    out
}
