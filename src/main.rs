//! item-service - CRUD API with concurrent batch processing
//!
//! Loads configuration, sets up logging, and runs the HTTP server until it
//! is stopped.

#![allow(missing_docs)]

use clap::Parser;
use item_service::server;
use item_service::server::builder::{DEFAULT_CONFIG_PATH, load_config};
use item_service::utils::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "item-service", version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "ITEM_SERVICE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = match load_config(&cli.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(host) = cli.host {
        config.service.server.host = host;
    }
    if let Some(port) = cli.port {
        config.service.server.port = port;
    }

    if let Err(e) = init_logging(config.logging()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps multi-line messages readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
