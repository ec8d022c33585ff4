//! Per-file outcomes and the running tally rendered at the end of a run.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::CopyError;

/// Skip reason when the user answers "no" at the decision prompt.
pub const SKIP_USER_DECLINED: &str = "user declined";
/// Skip reason when the destination exists and the user keeps it.
pub const SKIP_OVERWRITE_DECLINED: &str = "existing file, overwrite declined";

/// Outcome of processing one candidate file. Created once, never mutated.
#[derive(Debug)]
pub enum OperationResult {
    Success { source: PathBuf, target: PathBuf },
    Skip { source: PathBuf, reason: String },
    Error {
        source: PathBuf,
        message: String,
        cause: CopyError,
    },
}

impl OperationResult {
    pub fn source(&self) -> &Path {
        match self {
            OperationResult::Success { source, .. }
            | OperationResult::Skip { source, .. }
            | OperationResult::Error { source, .. } => source,
        }
    }
}

/// Counts plus the ordered results, one per visited file.
#[derive(Debug, Default)]
pub struct ProcessingState {
    total_files: usize,
    copied_files: usize,
    skipped_files: usize,
    error_files: usize,
    results: Vec<OperationResult>,
}

impl ProcessingState {
    /// Fresh state for a run that discovered `total_files` candidates.
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            ..Self::default()
        }
    }

    /// Append exactly one result and bump the matching counter.
    pub fn record(&mut self, result: OperationResult) {
        match &result {
            OperationResult::Success { .. } => self.copied_files += 1,
            OperationResult::Skip { .. } => self.skipped_files += 1,
            OperationResult::Error { .. } => self.error_files += 1,
        }
        self.results.push(result);
    }

    pub fn total_files(&self) -> usize {
        self.total_files
    }

    pub fn copied_files(&self) -> usize {
        self.copied_files
    }

    pub fn skipped_files(&self) -> usize {
        self.skipped_files
    }

    pub fn error_files(&self) -> usize {
        self.error_files
    }

    /// Number of files that received a result.
    pub fn processed_files(&self) -> usize {
        self.copied_files + self.skipped_files + self.error_files
    }

    pub fn results(&self) -> &[OperationResult] {
        &self.results
    }

    /// Summary block printed at the end of every run that found files.
    pub fn format_summary(&self) -> String {
        format!(
            "\nOperation Summary:\n================\nTotal files found: {}\nFiles copied: {}\nFiles skipped: {}\nFiles with errors: {}\n",
            self.total_files, self.copied_files, self.skipped_files, self.error_files
        )
    }

    /// One line per failed file, or None when nothing failed.
    pub fn format_error_details(&self) -> Option<String> {
        let mut out = String::new();
        for result in &self.results {
            if let OperationResult::Error {
                source,
                message,
                cause,
            } = result
            {
                out.push_str(&format!("  {}: {} ({})\n", source.display(), message, cause));
            }
        }
        if out.is_empty() {
            None
        } else {
            Some(format!("Errors:\n{out}"))
        }
    }
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_summary())
    }
}
