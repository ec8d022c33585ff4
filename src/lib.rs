//! Core library for `zfsl`.
//!
//! Finds files under a source directory by extension, previews each one, and lets
//! the user decide, file by file, whether to copy it into a target directory.
//! Everything runs on one thread: a file is previewed, decided and copied before
//! the next one is looked at.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod preview;
pub mod prompt;
pub mod session;
pub mod state;

pub use config::{Config, FileSettings, LogLevel, default_config_path, path_has_symlink_ancestor};
pub use discovery::discover;
pub use errors::{ConfigError, CopyError, DiscoveryError};
pub use fs_ops::copy_to_target;
pub use preview::render_preview;
pub use prompt::{Console, OverwritePrompt, UserAction};
pub use session::{RunOutcome, SessionReport, run_session};
pub use state::{OperationResult, ProcessingState};
