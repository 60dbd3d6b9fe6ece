//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use waypath_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on standard error"
)]
fn main() -> ExitCode {
    match waypath_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("waypath: {err}");
            ExitCode::FAILURE
        }
    }
}
