//! WinCC Unified MCP server.
//!
//! Exposes tags, alarms and logged history of a WinCC Unified runtime to MCP
//! clients over streamable HTTP. One shared session is kept fresh in the
//! background and used by every tool call.

mod server;
mod tools;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use winccua_core::{Bridge, Config, CredentialStore, GraphQlClient, SessionManager};

/// File name prefix for the daily rolling log
const LOG_FILE_PREFIX: &str = "winccua-mcp.log";

#[derive(Parser, Debug)]
#[command(name = "winccua-mcp", version, about = "MCP server for WinCC Unified")]
struct Args {
    /// Path to config.json (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides bindAddress
    #[arg(short, long)]
    bind: Option<String>,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr, filtered by RUST_LOG (default `info`). The returned
/// guard flushes the file writer and must live until exit.
fn init_tracing(log_dir: Option<&PathBuf>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    config.apply_env().context("Invalid environment override")?;
    if let Some(bind) = &args.bind {
        config.bind_address = bind.clone();
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Resolves on Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let _log_guard = init_tracing(args.log_dir.as_ref());
    info!("WinCC Unified MCP server starting");

    let config = load_config(&args)?;
    info!(endpoint = %config.graphql_url, bind = %config.bind_address, "Configuration loaded");

    let client = GraphQlClient::with_options(
        &config.graphql_url,
        config.request_timeout(),
        config.accept_invalid_certs,
    )
    .context("Failed to build HTTP client")?;
    if config.accept_invalid_certs {
        warn!("TLS certificate verification is disabled");
    }

    let session = SessionManager::new(
        Arc::new(client.clone()),
        CredentialStore::new(config.credentials()),
        config.refresh_interval(),
    );
    if !session.start() {
        info!("Waiting for the login-user tool to open a session");
    }

    let bridge = Bridge::new(client, session.clone());

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown requested");
        trigger.cancel();
    });

    let result = server::serve(bridge, &config.bind_address, shutdown).await;

    session.stop();
    info!("WinCC Unified MCP server stopped");
    result
}
