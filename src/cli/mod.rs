//! CLI module for writeWave
//!
//! Provides command-line interface for:
//! - serve: connect to the database and run the HTTP API
//! - ping: check database connectivity

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{ping, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
