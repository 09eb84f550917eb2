//! Memodex - content-addressed memory store server
//!
//! Stores text snippets deduplicated by content hash, indexed by tag, and
//! mirrored to an on-disk snapshot after every mutation.

use anyhow::Result;
use clap::{Parser, Subcommand};
use memodex::api::build_app;
use memodex::config::MemodexConfig;
use memodex::memory::{MemoryService, MemoryState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "memodex")]
#[command(version)]
#[command(about = "Content-addressed memory store with tag search")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "MEMODEX_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the memory store server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Directory holding the persisted snapshot
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("memodex={},tower_http=debug", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config: MemodexConfig = if let Some(config_path) = cli.config {
        let content = std::fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        MemodexConfig::default()
    };

    match cli.command {
        Commands::Serve {
            host,
            port,
            data_dir,
        } => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(data_dir) = data_dir {
                config.storage.data_dir = data_dir;
            }
            run_server(config).await?;
        }
        Commands::Config { default } => {
            show_config(if default { None } else { Some(&config) })?;
        }
    }

    Ok(())
}

async fn run_server(config: MemodexConfig) -> Result<()> {
    tracing::info!(
        data_dir = %config.storage.data_dir.display(),
        "Opening memory store"
    );

    // A corrupt snapshot aborts startup here; nothing is served against
    // partially loaded state.
    let service = Arc::new(MemoryService::open(&config.storage.data_dir).await?);

    let app = build_app(MemoryState { service }, &config.server.cors_origins);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Memodex listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}

fn show_config(config: Option<&MemodexConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    let toml = toml::to_string_pretty(&config)?;
    println!("{}", toml);
    Ok(())
}
