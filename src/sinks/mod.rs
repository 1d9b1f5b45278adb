//! Render sinks consuming decoded records.
//!
//! A sink turns each accepted [`TelemetryRecord`] into observable output.
//! Sinks own their error handling: a failing sink logs and the ingestion
//! loop carries on with the next record.

pub mod console;
pub mod display;
pub mod format;

pub use console::ConsoleSink;
pub use display::{BitmapSink, DisplayDriver, Rect};

use crate::types::TelemetryRecord;

/// A consumer of decoded telemetry records.
pub trait Sink: Send {
    /// Consume one record.
    fn accept(&mut self, record: &TelemetryRecord);
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn accept(&mut self, record: &TelemetryRecord) {
        (**self).accept(record);
    }
}
