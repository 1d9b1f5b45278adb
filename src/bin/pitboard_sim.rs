//! Synthetic telemetry sender
//!
//! Emits Dash datagrams with a sweeping rev counter so the receiver can be
//! exercised without running the simulator.
//!
//! # Usage
//!
//! ```text
//! cargo run --bin pitboard-sim -- --target 127.0.0.1:9999 --rate-hz 240
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::info;

use pitboard::{Field, PacketDecoder, Value, WireType};

const MAX_RPM: f32 = 8000.0;
const IDLE_RPM: f32 = 900.0;

#[derive(Parser, Debug)]
#[command(name = "pitboard-sim", version, about = "Send synthetic Dash telemetry")]
struct Cli {
    /// Receiver address
    #[arg(long, default_value = "127.0.0.1:9999")]
    target: SocketAddr,

    /// Datagrams per second
    #[arg(long, default_value_t = 240)]
    rate_hz: u32,

    /// Stop after this many datagrams (runs forever when omitted)
    #[arg(long)]
    count: Option<u64>,
}

/// Car state for datagram `n`: revs climb through each gear, then shift.
fn synthetic_values(n: u64) -> Vec<Value> {
    let steps_per_gear = 400;
    let gear = (n / steps_per_gear % 6 + 1) as u8;
    let progress = (n % steps_per_gear) as f32 / steps_per_gear as f32;
    let rpm = IDLE_RPM + (MAX_RPM - IDLE_RPM) * progress;
    let speed = (f32::from(gear) - 1.0 + progress) * 12.0;

    Field::ALL
        .iter()
        .map(|field| match field {
            Field::IsRaceOn => Value::Int32(1),
            Field::TimestampMs => Value::UInt32(n as u32),
            Field::EngineMaxRpm => Value::Float32(MAX_RPM),
            Field::EngineIdleRpm => Value::Float32(IDLE_RPM),
            Field::CurrentEngineRpm => Value::Float32(rpm),
            Field::Speed => Value::Float32(speed),
            Field::Gear => Value::UInt8(gear),
            other => match other.wire_type() {
                WireType::Int32 => Value::Int32(0),
                WireType::UInt32 => Value::UInt32(0),
                WireType::Float32 => Value::Float32(0.0),
                WireType::UInt16 => Value::UInt16(0),
                WireType::UInt8 => Value::UInt8(0),
                WireType::Int8 => Value::Int8(0),
            },
        })
        .collect()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.rate_hz > 0, "--rate-hz must be positive");

    let decoder = PacketDecoder::dash()?;
    let socket = UdpSocket::bind("0.0.0.0:0").await.context("binding sender socket")?;
    info!("Sending {}-byte datagrams to {} at {}Hz", decoder.datagram_size(), cli.target, cli.rate_hz);

    let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(cli.rate_hz)));
    let mut sent = 0u64;

    while cli.count.is_none_or(|count| sent < count) {
        ticker.tick().await;
        let datagram = decoder.encode(&synthetic_values(sent))?;
        socket.send_to(&datagram, cli.target).await.context("sending datagram")?;
        sent += 1;
    }

    info!("Sent {} datagrams", sent);
    Ok(())
}
