//! Ingestion loop: transport to gate to decoder to sinks

use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, trace};

use crate::protocol::PacketDecoder;
use crate::sinks::Sink;
use crate::stream::{GateExt, GateStats};
use crate::transport::{Transport, into_stream};
use crate::Result;

/// Receives datagrams, rate-gates them, decodes them and forwards records to
/// every registered sink.
///
/// Everything runs on one task with a single suspension point, waiting for
/// the next datagram, so records reach sinks strictly in arrival order.
pub struct IngestionLoop {
    decoder: PacketDecoder,
    min_interval: Duration,
    sinks: Vec<Box<dyn Sink>>,
}

impl IngestionLoop {
    /// Create a loop that decodes at most one datagram per `min_interval`.
    pub fn new(decoder: PacketDecoder, min_interval: Duration) -> Self {
        Self { decoder, min_interval, sinks: Vec::new() }
    }

    /// Register a sink. Sinks receive records in registration order.
    pub fn with_sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Run until the transport fails, the transport ends, or `cancel` fires.
    ///
    /// Malformed datagrams are dropped and never end the loop.
    ///
    /// # Errors
    ///
    /// Returns the transport's error when receiving fails.
    pub async fn run<T: Transport>(
        mut self,
        transport: T,
        cancel: CancellationToken,
    ) -> Result<GateStats> {
        info!(
            "Ingestion loop started (min interval {:?}, {} sinks)",
            self.min_interval,
            self.sinks.len()
        );

        let mut records =
            std::pin::pin!(into_stream(transport).gate(self.decoder.clone(), self.min_interval));

        loop {
            let next = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Ingestion loop cancelled");
                    break;
                }
                next = records.next() => next,
            };

            match next {
                Some(Ok(record)) => {
                    trace!("Forwarding record to {} sinks", self.sinks.len());
                    for sink in &mut self.sinks {
                        sink.accept(&record);
                    }
                }
                Some(Err(e)) => {
                    error!("Transport failed: {}", e);
                    return Err(e);
                }
                None => {
                    info!("Transport ended");
                    break;
                }
            }
        }

        let stats = records.stats();
        info!(
            "Ingestion loop ended ({} accepted, {} throttled, {} malformed)",
            stats.accepted, stats.throttled, stats.malformed
        );
        Ok(stats)
    }

    /// Run the loop on a tokio task.
    pub fn spawn<T: Transport>(
        self,
        transport: T,
        cancel: CancellationToken,
    ) -> JoinHandle<Result<GateStats>> {
        tokio::spawn(self.run(transport, cancel))
    }
}
