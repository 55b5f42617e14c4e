//! CLI argument definitions.

use clap::Parser;

/// Calls one ZAMM method and prints its JSON response.
#[derive(Parser, Debug)]
#[command(name = "zamm", version)]
pub(crate) struct Cli {
    /// Method to call (for example `greet`).
    #[arg(value_name = "METHOD")]
    pub(crate) method: String,
    /// JSON object holding the method's arguments.
    #[arg(value_name = "ARGS_JSON", allow_hyphen_values = true)]
    pub(crate) arguments: String,
}
