//! Command-line runtime for the ZAMM command bridge.
//!
//! `zamm [CONFIG FLAGS] <METHOD> <ARGS_JSON>` calls one method and prints its
//! JSON response as a single line on stdout. Diagnostics and errors go to
//! stderr, and the exit status tells caller mistakes (2) from handler
//! failures (1) and broken responses (70).
//!
//! The runtime is exercised both from the binary and from tests, where the
//! configuration loader, the registry, and the IO streams are substituted.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use zamm_api::{Dispatcher, MethodRegistry, RegistryError};
use zamm_config::Config;

mod cli;
mod config;
mod errors;
mod telemetry;

use cli::Cli;
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
use config::split_config_arguments;
use errors::AppError;

/// Tracing target for the CLI runtime.
const CLI_TARGET: &str = env!("CARGO_CRATE_NAME");

/// CLI flags recognised by the configuration loader.
///
/// Keep in sync with the fields of `zamm_config::Config`.
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--log-filter",
    "--log-format",
    "--openai-base-url",
    "--request-timeout-secs",
];

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self { stdout, stderr }
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    run_with_loader(args, &mut io, &OrthoConfigLoader, MethodRegistry::standard)
}

/// Runs the CLI with a custom configuration loader and registry factory.
#[must_use]
pub(crate) fn run_with_loader<I, W, E, L, R>(
    args: I,
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
    build_registry: R,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
    R: FnOnce(&Config) -> Result<MethodRegistry, RegistryError>,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&args);

    let cli = match Cli::try_parse_from(&split.command) {
        Ok(cli) => cli,
        Err(error) if !error.use_stderr() => {
            // --help and --version are not failures.
            let _ = write!(io.stdout, "{error}");
            return ExitCode::SUCCESS;
        }
        Err(error) => return report(io, &AppError::CliUsage(error)),
    };

    match execute(&cli, &split.config, io, loader, build_registry) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(io, &error),
    }
}

fn execute<W, E, L, R>(
    cli: &Cli,
    config_arguments: &[OsString],
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
    build_registry: R,
) -> Result<(), AppError>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
    R: FnOnce(&Config) -> Result<MethodRegistry, RegistryError>,
{
    let config = loader.load(config_arguments)?;
    telemetry::initialise(&config)?;
    let registry = build_registry(&config)?;
    debug!(
        target: CLI_TARGET,
        method = %cli.method,
        methods = registry.len(),
        "dispatching command"
    );

    let line = Dispatcher::new(&registry).dispatch(&cli.method, &cli.arguments)?;
    writeln!(io.stdout, "{line}").map_err(AppError::WriteResponse)?;
    io.stdout.flush().map_err(AppError::WriteResponse)
}

fn report<W: Write, E: Write>(io: &mut IoStreams<'_, W, E>, error: &AppError) -> ExitCode {
    match error {
        AppError::CliUsage(usage) => {
            let _ = write!(io.stderr, "{usage}");
        }
        other => {
            let _ = writeln!(io.stderr, "error: {other}");
        }
    }
    ExitCode::from(error.exit_status())
}

#[cfg(test)]
mod tests;
