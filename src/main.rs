use std::process::ExitCode;

use zfsl::ConfigError;
use zfsl::output as out;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = match zfsl::cli::parse() {
        Ok(args) => args,
        Err(e) => {
            // --help / --version render to stdout and are not failures.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            if let Some(cfg_err) = e.downcast_ref::<ConfigError>() {
                out::print_info(cfg_err.guidance());
            }
            ExitCode::FAILURE
        }
    }
}
