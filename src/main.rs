//! F1 telemetry bridge: UDP frames in, WebSocket and OSC out.
//!
//! ```bash
//! # defaults: UDP 127.0.0.1:20777, WebSocket ws://127.0.0.1:1337/ws
//! f1-telem-bridge
//!
//! # load settings and tables from a document
//! f1-telem-bridge --config bridge.yaml
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use f1_telem_bridge::config::BridgeConfig;
use f1_telem_bridge::sinks::websocket::{self, WS_PATH};
use f1_telem_bridge::Bridge;

#[derive(Parser, Debug)]
#[command(name = "f1-telem-bridge")]
#[command(about = "Forward F1 25 UDP telemetry to WebSocket clients and OSC")]
#[command(version)]
struct Args {
    /// JSON or YAML configuration document
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log raw frames and every emitted field
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => BridgeConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => BridgeConfig::default(),
    };
    config.settings.debug_output |= args.debug;

    let default_level = if config.settings.debug_output { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    info!("F1 telemetry bridge v{}", env!("CARGO_PKG_VERSION"));

    let http = config.settings.http_endpoint()?;
    let bridge = Bridge::start(config).await.context("starting telemetry listener")?;

    let app = websocket::router(bridge.broadcaster());
    let listener = tokio::net::TcpListener::bind(http)
        .await
        .with_context(|| format!("binding WebSocket server on {http}"))?;
    info!("WebSocket endpoint: ws://{}{}", http, WS_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    bridge.shutdown().await;
    Ok(())
}
