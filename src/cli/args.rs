//! CLI argument definitions using clap
//!
//! Commands:
//! - writewave serve [--env-file <path>] [--port <port>] [--in-memory]
//! - writewave ping [--env-file <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// writeWave - REST backend for the writeWave blogging application
#[derive(Parser, Debug)]
#[command(name = "writewave")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect to the database and serve the HTTP API
    Serve {
        /// Env file to load before reading the environment (default: ./.env if present)
        #[arg(long)]
        env_file: Option<PathBuf>,

        /// Port to listen on, overriding PORT
        #[arg(long)]
        port: Option<u16>,

        /// Keep data in process memory instead of connecting to the database
        #[arg(long)]
        in_memory: bool,
    },

    /// Check that the database is reachable and exit
    Ping {
        /// Env file to load before reading the environment (default: ./.env if present)
        #[arg(long)]
        env_file: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
