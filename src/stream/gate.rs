//! Rate gate applied in front of the decoder

use futures::{Stream, ready};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::protocol::PacketDecoder;
use crate::types::TelemetryRecord;
use crate::Result;

/// Minimum-interval throttle on the monotonic clock.
///
/// Holds the time of the last accepted datagram. The timestamp only moves
/// forward and is never reset.
#[derive(Debug, Clone)]
pub struct RateGate {
    min_interval: Duration,
    last_accepted: Option<Instant>,
}

impl RateGate {
    /// Create a gate that admits at most one datagram per `min_interval`.
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval, last_accepted: None }
    }

    /// Whether a datagram arriving at `now` may be decoded.
    pub fn is_open(&self, now: Instant) -> bool {
        match self.last_accepted {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.min_interval,
        }
    }

    /// Record a successful decode at `now`.
    pub fn accept(&mut self, now: Instant) {
        let next = match self.last_accepted {
            Some(last) => last.max(now),
            None => now,
        };
        self.last_accepted = Some(next);
    }

    /// Time of the last accepted datagram.
    pub fn last_accepted(&self) -> Option<Instant> {
        self.last_accepted
    }

    /// Configured minimum interval.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Counters kept by a [`Gate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateStats {
    /// Datagrams decoded and yielded
    pub accepted: u64,
    /// Datagrams dropped by the rate gate without decoding
    pub throttled: u64,
    /// Datagrams dropped because they failed to decode
    pub malformed: u64,
    /// Arrival time of the last accepted datagram
    pub last_accepted: Option<Instant>,
}

/// Extension trait to gate and decode any stream of datagrams
pub trait GateExt: Stream<Item = Result<Vec<u8>>> {
    /// Decode at most one datagram per `min_interval`.
    ///
    /// Datagrams arriving while the gate is closed are dropped before
    /// decoding. Malformed datagrams are dropped and leave the gate as it was.
    /// Upstream errors are passed through.
    fn gate(self, decoder: PacketDecoder, min_interval: Duration) -> Gate<Self>
    where
        Self: Sized,
    {
        Gate::new(self, decoder, min_interval)
    }
}

impl<T: Stream<Item = Result<Vec<u8>>>> GateExt for T {}

pin_project! {
    /// A stream combinator that rate-gates and decodes datagrams
    pub struct Gate<S> {
        #[pin]
        stream: S,
        decoder: PacketDecoder,
        gate: RateGate,
        stats: GateStats,
    }
}

impl<S> Gate<S> {
    /// Create a new gated stream
    pub fn new(stream: S, decoder: PacketDecoder, min_interval: Duration) -> Self {
        Self { stream, decoder, gate: RateGate::new(min_interval), stats: GateStats::default() }
    }

    /// Snapshot of the counters so far.
    pub fn stats(&self) -> GateStats {
        self.stats
    }
}

impl<S> Stream for Gate<S>
where
    S: Stream<Item = Result<Vec<u8>>>,
{
    type Item = Result<TelemetryRecord>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            let datagram = match ready!(this.stream.as_mut().poll_next(cx)) {
                Some(Ok(datagram)) => datagram,
                Some(Err(e)) => return Poll::Ready(Some(Err(e))),
                None => return Poll::Ready(None),
            };

            let now = Instant::now();
            if !this.gate.is_open(now) {
                this.stats.throttled += 1;
                trace!("Throttled {}-byte datagram", datagram.len());
                continue;
            }

            match this.decoder.decode(&datagram) {
                Ok(record) => {
                    this.gate.accept(now);
                    this.stats.accepted += 1;
                    this.stats.last_accepted = this.gate.last_accepted();
                    return Poll::Ready(Some(Ok(record)));
                }
                Err(e) => {
                    this.stats.malformed += 1;
                    debug!("Dropping datagram: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ScriptedTransport, dash_values, encode_dash};
    use crate::transport::into_stream;
    use crate::{Field, TelemetryError};
    use futures::StreamExt;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn gate_admits_first_and_spaced_arrivals() {
        let base = Instant::now();
        let mut gate = RateGate::new(ms(50));
        let mut forwarded = Vec::new();

        for offset in [0, 10, 10, 60, 61] {
            let now = base + ms(offset);
            if gate.is_open(now) {
                gate.accept(now);
                forwarded.push(offset);
            }
        }

        assert_eq!(forwarded, [0, 60]);
        assert_eq!(gate.last_accepted(), Some(base + ms(60)));
    }

    #[test]
    fn gate_timestamp_never_moves_backwards() {
        let base = Instant::now();
        let mut gate = RateGate::new(ms(50));
        gate.accept(base + ms(100));
        gate.accept(base + ms(40));
        assert_eq!(gate.last_accepted(), Some(base + ms(100)));
        assert!(!gate.is_open(base + ms(120)));
    }

    #[test]
    fn zero_interval_admits_everything() {
        let base = Instant::now();
        let mut gate = RateGate::new(Duration::ZERO);
        gate.accept(base);
        assert!(gate.is_open(base));
    }

    #[tokio::test(start_paused = true)]
    async fn gated_stream_forwards_spaced_records() {
        let packets = [0u64, 10, 10, 60, 61]
            .into_iter()
            .map(|offset| (ms(offset), encode_dash(&dash_values(1000.0 + offset as f32, 2, 10.0))))
            .collect();
        let transport = ScriptedTransport::new(packets);
        let start = transport.start();

        let mut gated = std::pin::pin!(
            into_stream(transport).gate(crate::PacketDecoder::dash().unwrap(), ms(50))
        );

        let mut rpms = Vec::new();
        while let Some(record) = gated.next().await {
            rpms.push(record.unwrap().read::<f32>(Field::CurrentEngineRpm).unwrap());
        }

        assert_eq!(rpms, [1000.0, 1060.0]);
        let stats = gated.stats();
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.throttled, 3);
        assert_eq!(stats.malformed, 0);
        assert_eq!(stats.last_accepted, Some(start + ms(60)));
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_datagrams_leave_the_gate_open() {
        let transport = ScriptedTransport::new(vec![
            (ms(0), vec![0u8; 17]),
            (ms(10), encode_dash(&dash_values(3000.0, 4, 20.0))),
            (ms(30), encode_dash(&dash_values(3100.0, 4, 20.0))),
        ]);
        let start = transport.start();

        let mut gated = std::pin::pin!(
            into_stream(transport).gate(crate::PacketDecoder::dash().unwrap(), ms(50))
        );

        let mut count = 0;
        while let Some(record) = gated.next().await {
            assert_eq!(record.unwrap().read::<f32>(Field::CurrentEngineRpm).unwrap(), 3000.0);
            count += 1;
        }

        assert_eq!(count, 1);
        let stats = gated.stats();
        assert_eq!(stats.malformed, 1);
        assert_eq!(stats.throttled, 1);
        assert_eq!(stats.last_accepted, Some(start + ms(10)));
    }

    #[tokio::test(start_paused = true)]
    async fn closed_gate_drops_garbage_without_decoding() {
        let transport = ScriptedTransport::new(vec![
            (ms(0), encode_dash(&dash_values(2500.0, 3, 15.0))),
            (ms(10), vec![0xff; 5]),
        ]);

        let mut gated = std::pin::pin!(
            into_stream(transport).gate(crate::PacketDecoder::dash().unwrap(), ms(50))
        );

        assert!(gated.next().await.unwrap().is_ok());
        assert!(gated.next().await.is_none());

        let stats = gated.stats();
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.throttled, 1);
        assert_eq!(stats.malformed, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_errors_pass_through() {
        let transport = ScriptedTransport::new(vec![(ms(0), encode_dash(&dash_values(0.0, 1, 0.0)))])
            .fail_after(TelemetryError::transport("socket closed"));

        let mut gated = std::pin::pin!(
            into_stream(transport).gate(crate::PacketDecoder::dash().unwrap(), ms(50))
        );

        assert!(gated.next().await.unwrap().is_ok());
        assert!(matches!(gated.next().await, Some(Err(TelemetryError::Transport { .. }))));
        assert!(gated.next().await.is_none());
    }
}
