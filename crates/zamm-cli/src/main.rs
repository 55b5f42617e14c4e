//! CLI entrypoint for the ZAMM command bridge.
//!
//! The binary delegates to [`zamm_cli::run`], which loads configuration,
//! parses the method name and JSON arguments, dispatches the call, and writes
//! the encoded response to stdout.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    zamm_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
