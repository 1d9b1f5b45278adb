//! Test utilities for synthesizing telemetry traffic
//!
//! Helpers shared by unit tests and benchmarks: Dash datagram builders, a
//! scripted transport that replays datagrams at fixed time offsets, and
//! recording sinks and display drivers.

#![cfg(any(test, feature = "benchmark"))]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

use crate::protocol::{Field, PacketDecoder};
use crate::sinks::{DisplayDriver, Rect, Sink};
use crate::transport::Transport;
use crate::types::{TelemetryRecord, Value, WireType};
use crate::{Result, TelemetryError};

/// Dash values with every field zeroed except RPM, gear and speed.
///
/// `engine_max_rpm` is 8000, `is_race_on` is 1 and `num_cylinders` is 8.
pub fn dash_values(current_rpm: f32, gear: u8, speed: f32) -> Vec<Value> {
    Field::ALL
        .iter()
        .map(|field| match field {
            Field::IsRaceOn => Value::Int32(1),
            Field::EngineMaxRpm => Value::Float32(8000.0),
            Field::CurrentEngineRpm => Value::Float32(current_rpm),
            Field::NumCylinders => Value::Int32(8),
            Field::Gear => Value::UInt8(gear),
            Field::Speed => Value::Float32(speed),
            other => zero(other.wire_type()),
        })
        .collect()
}

fn zero(wire_type: WireType) -> Value {
    match wire_type {
        WireType::Int32 => Value::Int32(0),
        WireType::UInt32 => Value::UInt32(0),
        WireType::Float32 => Value::Float32(0.0),
        WireType::UInt16 => Value::UInt16(0),
        WireType::UInt8 => Value::UInt8(0),
        WireType::Int8 => Value::Int8(0),
    }
}

/// Encode Dash values into a datagram.
///
/// # Panics
///
/// Panics if `values` does not match the Dash schema.
pub fn encode_dash(values: &[Value]) -> Vec<u8> {
    PacketDecoder::dash()
        .and_then(|decoder| decoder.encode(values))
        .unwrap_or_else(|e| panic!("invalid Dash values: {e}"))
}

/// Transport replaying datagrams at fixed offsets from its creation time.
///
/// Intended for tokio's paused clock, where offsets are hit exactly.
pub struct ScriptedTransport {
    start: Instant,
    script: VecDeque<(Duration, Vec<u8>)>,
    failure: Option<TelemetryError>,
}

impl ScriptedTransport {
    /// Script of `(offset, datagram)` pairs in arrival order.
    pub fn new(script: Vec<(Duration, Vec<u8>)>) -> Self {
        Self { start: Instant::now(), script: script.into(), failure: None }
    }

    /// Return `error` once the script is exhausted instead of ending.
    pub fn fail_after(mut self, error: TelemetryError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Instant the offsets are measured from.
    pub fn start(&self) -> Instant {
        self.start
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn recv(&mut self) -> Result<Option<Vec<u8>>> {
        match self.script.pop_front() {
            Some((offset, datagram)) => {
                tokio::time::sleep_until(self.start + offset).await;
                Ok(Some(datagram))
            }
            None => match self.failure.take() {
                Some(error) => Err(error),
                None => Ok(None),
            },
        }
    }
}

/// Shared log of `(sink name, record)` deliveries.
pub type RecordingLog = Arc<Mutex<Vec<(&'static str, TelemetryRecord)>>>;

/// Create an empty delivery log.
pub fn recording_log() -> RecordingLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Sink appending every record it receives to a shared log.
pub struct RecordingSink {
    name: &'static str,
    log: RecordingLog,
}

impl RecordingSink {
    pub fn new(name: &'static str, log: &RecordingLog) -> Self {
        Self { name, log: Arc::clone(log) }
    }
}

impl Sink for RecordingSink {
    fn accept(&mut self, record: &TelemetryRecord) {
        if let Ok(mut log) = self.log.lock() {
            log.push((self.name, record.clone()));
        }
    }
}

/// One drawing primitive issued to a [`RecordingDisplay`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Clear,
    FillRect(Rect),
    Text(u32, u32, String),
    Flush,
}

/// Display driver that records primitives instead of drawing them.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub ops: Vec<DrawOp>,
    fail: bool,
}

impl RecordingDisplay {
    /// A driver whose every call fails.
    pub fn failing() -> Self {
        Self { ops: Vec::new(), fail: true }
    }

    fn record(&mut self, op: DrawOp) -> Result<()> {
        if self.fail {
            return Err(TelemetryError::display("bus not responding"));
        }
        self.ops.push(op);
        Ok(())
    }
}

impl DisplayDriver for RecordingDisplay {
    fn clear(&mut self) -> Result<()> {
        self.record(DrawOp::Clear)
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<()> {
        self.record(DrawOp::FillRect(rect))
    }

    fn draw_text(&mut self, x: u32, y: u32, text: &str) -> Result<()> {
        self.record(DrawOp::Text(x, y, text.to_string()))
    }

    fn flush(&mut self) -> Result<()> {
        self.record(DrawOp::Flush)
    }
}
