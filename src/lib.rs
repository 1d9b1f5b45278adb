//! Rate-limited decoder for racing simulator UDP telemetry.
//!
//! The simulator streams fixed-layout little-endian datagrams, often at
//! hundreds of Hz. Pitboard decodes them against a fixed schema, drops the
//! undocumented pad region the producer injects mid-record, and forwards at
//! most one record per configured interval to render sinks such as a console
//! line or a small bitmap display.
//!
//! # Features
//!
//! - **Exact wire layout**: precomputed field offsets with a verified pad location
//! - **Typed access**: a closed [`Field`] enumeration and strict [`Scalar`] reads
//! - **Cheap throttling**: the rate gate rejects datagrams before they are decoded
//! - **Robust ingestion**: malformed datagrams are dropped, never fatal
//!
//! ## Example
//!
//! ```rust,no_run
//! use pitboard::{ConsoleSink, IngestionLoop, PacketDecoder, UdpTransport};
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> pitboard::Result<()> {
//!     let transport = UdpTransport::bind("0.0.0.0:9999".parse().unwrap()).await?;
//!     let stats = IngestionLoop::new(PacketDecoder::dash()?, Duration::from_millis(50))
//!         .with_sink(ConsoleSink::stdout())
//!         .run(transport, CancellationToken::new())
//!         .await?;
//!     println!("{} records shown", stats.accepted);
//!     Ok(())
//! }
//! ```

// Core types and error handling
pub mod config;
mod error;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Wire protocol
pub mod protocol;

// Ingestion pipeline
pub mod ingest;
pub mod sinks;
pub mod stream;
pub mod transport;
pub mod transports;

// Core exports
pub use error::*;
pub use types::{FieldDescriptor, Scalar, Schema, TelemetryRecord, Value, WireType};

// Protocol exports
pub use protocol::{Field, PacketDecoder, dash_schema};

// Pipeline exports
pub use config::Config;
pub use ingest::IngestionLoop;
pub use sinks::{BitmapSink, ConsoleSink, DisplayDriver, Sink};
pub use stream::{GateStats, RateGate};
pub use transport::Transport;
pub use transports::UdpTransport;
