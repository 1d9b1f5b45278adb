//! Pitboard receiver
//!
//! Listens for simulator telemetry and prints gear and speed at the
//! configured refresh rate.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin pitboard -- --port 9999 --interval-ms 50
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use pitboard::{Config, ConsoleSink, IngestionLoop, PacketDecoder, UdpTransport};

#[derive(Parser, Debug)]
#[command(name = "pitboard", version, about = "Racing simulator telemetry dashboard")]
struct Cli {
    /// YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Local address to receive on
    #[arg(long)]
    bind: Option<IpAddr>,

    /// UDP port the simulator sends to
    #[arg(long)]
    port: Option<u16>,

    /// Minimum milliseconds between displayed records
    #[arg(long)]
    interval_ms: Option<u64>,
}

impl Cli {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.min_interval_ms = interval_ms;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    let decoder = PacketDecoder::dash().context("building the Dash schema")?;
    info!(
        "Dash layout: {} fields, {}-byte datagrams",
        decoder.schema().len(),
        decoder.datagram_size()
    );

    let transport = UdpTransport::bind_with_buffer(config.socket_addr(), config.recv_buffer)
        .await
        .context("binding telemetry socket")?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            return;
        }
        info!("Shutting down");
        ctrl_c.cancel();
    });

    let stats = IngestionLoop::new(decoder, config.min_interval())
        .with_sink(ConsoleSink::stdout())
        .run(transport, cancel)
        .await
        .context("telemetry transport failed")?;

    info!("Displayed {} records", stats.accepted);
    Ok(())
}
