//! Console sink

use std::io::Write;
use tracing::warn;

use super::Sink;
use super::format::{format_gear, format_speed};
use crate::protocol::Field;
use crate::types::TelemetryRecord;
use crate::{Result, TelemetryError};

/// Writes one `"{gear} {speed}"` line per record.
pub struct ConsoleSink<W> {
    out: W,
}

impl ConsoleSink<std::io::Stdout> {
    /// Console sink on standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    /// Console sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the sink and return its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, record: &TelemetryRecord) -> Result<()> {
        let gear = record.read::<u8>(Field::Gear)?;
        let speed = record.read::<f32>(Field::Speed)?;
        writeln!(self.out, "{} {}", format_gear(gear), format_speed(speed))
            .and_then(|()| self.out.flush())
            .map_err(|e| TelemetryError::output("console write failed", e))
    }
}

impl<W: Write + Send> Sink for ConsoleSink<W> {
    fn accept(&mut self, record: &TelemetryRecord) {
        if let Err(e) = self.write_line(record) {
            warn!("Console sink failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PacketDecoder;
    use crate::test_utils::{dash_values, encode_dash};

    fn record(gear: u8, speed: f32) -> TelemetryRecord {
        PacketDecoder::dash().unwrap().decode(&encode_dash(&dash_values(0.0, gear, speed))).unwrap()
    }

    #[test]
    fn writes_gear_and_speed() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.accept(&record(0, 27.78));
        sink.accept(&record(4, 50.0));

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "R 100\n4 180\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "reader gone"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_are_output_errors() {
        let mut sink = ConsoleSink::new(BrokenPipe);
        match sink.write_line(&record(3, 10.0)) {
            Err(TelemetryError::Output { source, .. }) => {
                assert_eq!(source.kind(), std::io::ErrorKind::BrokenPipe);
            }
            other => panic!("Expected Output error, got {other:?}"),
        }

        sink.accept(&record(3, 10.0));
    }

    #[test]
    fn records_without_dash_fields_are_skipped() {
        use crate::types::{Schema, WireType};
        use std::sync::Arc;

        let schema = Arc::new(Schema::new([("rpm", WireType::Float32)], 0, 0).unwrap());
        let decoder = PacketDecoder::new(schema);
        let record = decoder.decode(&1.0f32.to_le_bytes()).unwrap();

        let mut sink = ConsoleSink::new(Vec::new());
        sink.accept(&record);
        assert!(sink.into_inner().is_empty());
    }
}
