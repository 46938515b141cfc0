//! Edge API Proxy
//!
//! Forwards API calls to upstream AI providers by path prefix.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────────┐
//!                         │                   EDGE PROXY                      │
//!    Client Request       │  ┌─────────┐   ┌──────────┐   ┌──────────────┐   │
//!    ─────────────────────┼─▶│  http   │──▶│ preflight│──▶│   routing    │   │
//!                         │  │ server  │   │  (CORS)  │   │ prefix table │   │
//!                         │  └─────────┘   └──────────┘   └──────┬───────┘   │
//!                         │       ▲ no route: /healthz, 404      │           │
//!                         │       └──────────────────────────────┤           │
//!                         │                                      ▼           │
//!    Client Response      │  ┌──────────┐   ┌──────────┐   ┌──────────────┐  │
//!    ◀────────────────────┼──│ response │◀──│forwarder │◀──│ target URL + │  │
//!                         │  │ assembler│   │ (stream) │   │ header filter│  │
//!                         │  └──────────┘   └────┬─────┘   └──────────────┘  │
//!                         └──────────────────────┼───────────────────────────┘
//!                                                ▼
//!                                        Upstream provider
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use edge_api_proxy::config::{load_config, validation::validate_config, ConfigError, ProxyConfig};
use edge_api_proxy::lifecycle::{signals::shutdown_signal, Shutdown};
use edge_api_proxy::observability::{logging::init_logging, metrics::init_metrics};
use edge_api_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "edge-api-proxy")]
#[command(about = "Prefix-routed streaming proxy for upstream API providers", long_about = None)]
struct Cli {
    /// TOML configuration file. The stock provider table is used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Validate the configuration, print the route table, and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    if cli.check {
        for route in &config.routes {
            println!("{:<16} {} ({:?})", route.prefix, route.target, route.rewrite);
        }
        return Ok(());
    }

    init_logging(&config.observability.log_level);
    tracing::info!("edge-api-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        header_policy = ?config.headers.policy,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(&config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
