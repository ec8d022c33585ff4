//! Application orchestrator.
//! Loads the optional config file, initializes logging, fills in missing values
//! (flags, then config file, then prompts), validates, and runs the interactive session.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, error, info};

use zfsl::cli::{Args, RawSettings, sanitize_str};
use zfsl::config::{CONFIG_ENV, load_config_from_xml};
use zfsl::output as out;
use zfsl::{
    Config, ConfigError, Console, RunOutcome, SessionReport, default_config_path, run_session,
};

use crate::logging::init_tracing;

const BANNER: &str = "ZFSL - File Selection and Copy Tool";

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    let file_settings = load_config_from_xml()?;

    let log_level = args
        .effective_log_level()
        .or_else(|| file_settings.as_ref().and_then(|f| f.log_level.clone()))
        .unwrap_or_default();
    let log_file = args
        .log_file
        .clone()
        .or_else(|| file_settings.as_ref().and_then(|f| f.log_file.clone()));

    // Held until the end of run so the file appender flushes.
    let _guard = init_tracing(&log_level, log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    debug!("Starting zfsl: {:?}", args);
    out::print_banner(BANNER);

    let raw = args.merged_with(file_settings.as_ref());
    let mut console = Console::stdio();

    let config = match build_config(raw, &mut console) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(code = e.code(), error = %e, "Configuration rejected");
            return Err(e.into());
        }
    };

    let report = interactive(&config, &mut console)?;
    let state = &report.state;
    info!(
        outcome = ?report.outcome,
        total = state.total_files(),
        copied = state.copied_files(),
        skipped = state.skipped_files(),
        errors = state.error_files(),
        "Run finished"
    );

    match report.outcome {
        RunOutcome::InputClosed => out::print_warn("Input ended before every file was decided."),
        RunOutcome::Aborted => out::print_info("Stopped at user request."),
        RunOutcome::Completed if state.error_files() == 0 && state.copied_files() > 0 => {
            out::print_success(&format!("Copied {} file(s).", state.copied_files()))
        }
        RunOutcome::Completed | RunOutcome::NoFiles => {}
    }
    Ok(())
}

/// Run the session; a console that cannot be read or written ends the run.
fn interactive<R: BufRead, W: Write>(
    config: &Config,
    console: &mut Console<R, W>,
) -> Result<SessionReport> {
    run_session(config, console).context("interactive session failed on console I/O")
}

/// Fill gaps in `raw` (cwd for source, prompts for target/extension) and validate.
fn build_config<R: BufRead, W: Write>(
    raw: RawSettings,
    console: &mut Console<R, W>,
) -> Result<Config, ConfigError> {
    let source = match raw.source {
        Some(p) => p,
        None => std::env::current_dir().map_err(|e| ConfigError::InvalidSource {
            path: PathBuf::from("."),
            reason: format!("current directory unavailable ({e})"),
        })?,
    };

    let target = match raw.target {
        Some(p) => p,
        None => prompt_value(console, "Enter target directory: ", "target directory")
            .map(|s| sanitize_str(&s))?,
    };

    let extension = match raw.extension {
        Some(e) => e,
        None => prompt_value(console, "Enter file extension (e.g. txt): ", "file extension")?,
    };

    Config::validate(source, target, &extension)
}

fn prompt_value<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
    what: &'static str,
) -> Result<String, ConfigError> {
    match console.read_value(prompt) {
        Ok(Some(v)) => Ok(v),
        Ok(None) => Err(ConfigError::MissingRequiredValue(what)),
        Err(e) => {
            debug!(error = %e, "No answer for {what}");
            Err(ConfigError::MissingRequiredValue(what))
        }
    }
}

fn print_config_location() {
    if let Some(cfg_env) = std::env::var_os(CONFIG_ENV) {
        out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}\n",
            PathBuf::from(cfg_env).display()
        ));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default zfsl config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; flags and prompts will be used.");
            }
        }
        None => out::print_error("Could not determine a default config path."),
    }
}
