//! CLI command implementations
//!
//! Boot sequence for `serve`:
//! 1. Load `.env` and read configuration
//! 2. Connect to the database and ping it
//! 3. Build the router around the single store handle
//! 4. Bind and serve until shutdown
//!
//! A failure at any step aborts the process with a non-zero exit; the server
//! never listens without a working database.

use std::path::Path;
use std::sync::Arc;

use tokio::runtime::Runtime;
use tracing::{error, info, warn};

use crate::auth::{CookiePolicy, TokenConfig, TokenManager};
use crate::config::{self, Config};
use crate::http_server::{AppState, HttpServer, HttpServerConfig};
use crate::logging;
use crate::store::{DocumentStore, MemoryStore, MongoStore};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments, install logging and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    logging::init(cli.log_json);
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            env_file,
            port,
            in_memory,
        } => serve(env_file.as_deref(), port, in_memory),
        Command::Ping { env_file } => ping(env_file.as_deref()),
    }
}

fn load_config(env_file: Option<&Path>) -> CliResult<Config> {
    config::load_env_file(env_file)?;
    Ok(Config::from_env()?)
}

fn runtime() -> CliResult<Runtime> {
    Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {e}")))
}

/// Connect to the configured database, logging the failure if it is down
async fn connect(config: &Config) -> CliResult<MongoStore> {
    let uri = config.database.uri()?;
    MongoStore::connect(&uri, &config.database.name)
        .await
        .map_err(|e| {
            error!(error = %e, "error connecting to database");
            CliError::database_unreachable(e.to_string())
        })
}

/// Start the HTTP server
pub fn serve(env_file: Option<&Path>, port: Option<u16>, in_memory: bool) -> CliResult<()> {
    let mut config = load_config(env_file)?;
    if let Some(port) = port {
        config.port = port;
    }

    runtime()?.block_on(async {
        let store: Arc<dyn DocumentStore> = if in_memory {
            warn!("serving from process memory; data is lost on exit");
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(connect(&config).await?)
        };

        let state = AppState::new(
            store,
            TokenManager::new(TokenConfig::new(config.token_secret.clone())),
            CookiePolicy::new(config.production),
        );

        HttpServer::new(HttpServerConfig::from(&config), state)
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {e}")))
    })
}

/// Check database connectivity and exit
pub fn ping(env_file: Option<&Path>) -> CliResult<()> {
    let config = load_config(env_file)?;

    runtime()?.block_on(async {
        connect(&config).await?;
        info!(database = %config.database.name, "database reachable");
        Ok::<(), CliError>(())
    })
}
