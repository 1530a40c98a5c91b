//! turtle-relayd - store-and-forward message relay for in-game computers

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;
use turtle_relay_daemon::server;

/// Store-and-forward message relay for in-game computers
#[derive(Parser, Debug)]
#[command(name = "turtle-relayd")]
#[command(about = "Store-and-forward message relay for in-game computers")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the configured listen port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .init();
    } else {
        turtle_relay_core::logging::init();
    }

    info!("turtle-relayd starting...");

    let mut config = turtle_relay_core::config::resolve_config(args.config.as_deref())
        .context("Failed to resolve configuration")?;

    if let Some(path) = args.config {
        info!("Loaded config from: {}", path.display());
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    // Create cancellation token for graceful shutdown
    let cancel_token = CancellationToken::new();

    // Set up signal handlers
    let cancel_for_signals = cancel_token.clone();
    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            let mut sigterm =
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                    .expect("Failed to create SIGTERM handler");

            tokio::select! {
                _ = ctrl_c => {
                    info!("Received SIGINT (Ctrl+C)");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM");
                }
            }
        }

        #[cfg(not(unix))]
        {
            ctrl_c.await.expect("Failed to listen for Ctrl+C");
            info!("Received Ctrl+C");
        }

        cancel_for_signals.cancel();
    });

    server::serve(&config, cancel_token)
        .await
        .context("Relay server failed")?;

    info!("turtle-relayd shutdown complete");
    Ok(())
}
