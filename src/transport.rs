//! Transport trait for datagram sources

use futures::Stream;

use crate::Result;

/// A source of raw telemetry datagrams.
///
/// One call to [`recv`](Transport::recv) yields exactly one datagram; the
/// datagram boundary is the only framing the protocol has.
#[async_trait::async_trait]
pub trait Transport: Send + 'static {
    /// Wait for the next datagram.
    ///
    /// Returns:
    /// - `Ok(Some(bytes))` - One datagram received
    /// - `Ok(None)` - Source ended (normal termination)
    /// - `Err(e)` - Transport failure, fatal to the consumer
    async fn recv(&mut self) -> Result<Option<Vec<u8>>>;
}

/// Adapt a transport into a stream of datagrams.
///
/// The stream ends when the transport ends or after yielding its first error.
pub fn into_stream<T: Transport>(transport: T) -> impl Stream<Item = Result<Vec<u8>>> + Send {
    futures::stream::unfold(Some(transport), |state| async move {
        let mut transport = state?;
        match transport.recv().await {
            Ok(Some(datagram)) => Some((Ok(datagram), Some(transport))),
            Ok(None) => None,
            Err(e) => Some((Err(e), None)),
        }
    })
}
