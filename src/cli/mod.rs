//! CLI module
//!
//! Provides command-line interface for:
//! - init: Create an empty collection document
//! - serve: Serve the HTTP API
//! - import: Build the collection from a CSV file

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{import, init, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}
