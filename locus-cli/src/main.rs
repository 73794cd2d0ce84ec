//! Entry point for the `locus` binary.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use locus_cli::{CliError, EXIT_INVALID, EXIT_SUCCESS};

fn main() -> ExitCode {
    match locus_cli::run() {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError::ArgumentParsing(err)) => {
            // Help and version requests render through the same path.
            let status = if err.use_stderr() {
                EXIT_INVALID
            } else {
                EXIT_SUCCESS
            };
            if err.print().is_err() {
                return ExitCode::from(EXIT_INVALID);
            }
            ExitCode::from(status)
        }
        Err(err) => {
            report(&err);
            ExitCode::from(err.exit_code())
        }
    }
}

#[expect(clippy::print_stderr, reason = "the binary reports failures on stderr")]
fn report(err: &CliError) {
    if err.is_unexpected() && !matches!(err, CliError::InstallLogger(_)) {
        log::error!("{err}");
        eprintln!("locus: an unexpected error occurred");
    } else {
        eprintln!("locus: {err}");
    }
}
