//! CLI module for cubby
//!
//! One command for now: `serve`, which boots the gateway. Logging is
//! initialized here so library consumers can install their own
//! subscriber.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::http_server::{GatewayConfig, HttpServer};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "cubby", version, about = "Multi-tenant file storage gateway")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the gateway server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Root directory for the local object store
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            host,
            port,
            data_dir,
        } => serve(host, port, data_dir),
    }
}

fn serve(host: Option<String>, port: Option<u16>, data_dir: Option<PathBuf>) -> CliResult<()> {
    init_logging();

    let mut config = GatewayConfig::from_env();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(data_dir) = data_dir {
        config.data_dir = data_dir;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(HttpServer::with_config(config).start())?;

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_args_parse() {
        let cli = Cli::parse_from(["cubby", "serve", "--port", "8080", "--host", "127.0.0.1"]);
        match cli.command {
            Command::Serve { host, port, .. } => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(8080));
            }
        }
    }
}
