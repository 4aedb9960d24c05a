//! Lambda Bridge Gateway
//!
//! A small gateway built with Tokio and Axum. Every inbound request is
//! forwarded to an internal proxy path (`<prefix>` + original URI) and the
//! backend's JSON envelope reply is unwrapped into the client response.
//!
//! ```text
//!     Client Request            ┌──────────────────────────────────────┐
//!     ──────────────────────────┼─▶ http server ──▶ subrequest          │
//!                               │      │            dispatcher ─────────┼──▶ internal
//!                               │      │                │               │    proxy
//!     Client Response           │      ▼                ▼               │
//!     ◀─────────────────────────┼─ envelope  ◀──── completed reply      │
//!                               │  unwrapper                            │
//!                               └──────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use lambda_bridge::config::{load_config, GatewayConfig};
use lambda_bridge::observability::logging;
use lambda_bridge::{HttpServer, Shutdown};

#[derive(Parser, Debug)]
#[command(
    name = "lambda-bridge",
    about = "Gateway that unwraps Lambda envelope responses"
)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        path_prefix = %config.upstream.path_prefix,
        upstream_timeout_secs = config.upstream.timeout_secs,
        "configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
