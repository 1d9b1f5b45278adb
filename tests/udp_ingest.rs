//! End-to-end ingestion over a loopback UDP socket.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;

use pitboard::{
    Field, IngestionLoop, PacketDecoder, Sink, TelemetryError, TelemetryRecord, Transport,
    UdpTransport, Value, WireType,
};

#[derive(Clone, Default)]
struct SharedSink {
    records: Arc<Mutex<Vec<TelemetryRecord>>>,
}

impl Sink for SharedSink {
    fn accept(&mut self, record: &TelemetryRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

fn datagram(decoder: &PacketDecoder, gear: u8, speed: f32) -> Vec<u8> {
    let values: Vec<Value> = Field::ALL
        .iter()
        .map(|field| match field {
            Field::Gear => Value::UInt8(gear),
            Field::Speed => Value::Float32(speed),
            Field::EngineMaxRpm => Value::Float32(8000.0),
            other => match other.wire_type() {
                WireType::Int32 => Value::Int32(0),
                WireType::UInt32 => Value::UInt32(0),
                WireType::Float32 => Value::Float32(0.0),
                WireType::UInt16 => Value::UInt16(0),
                WireType::UInt8 => Value::UInt8(0),
                WireType::Int8 => Value::Int8(0),
            },
        })
        .collect();
    decoder.encode(&values).unwrap()
}

async fn wait_for(records: &Arc<Mutex<Vec<TelemetryRecord>>>, count: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while records.lock().unwrap().len() < count {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("records did not arrive in time");
}

#[tokio::test]
async fn udp_transport_receives_exact_datagrams() {
    let mut transport = UdpTransport::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = transport.local_addr().unwrap();

    let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    sender.send_to(&[1, 2, 3, 4, 5], addr).await.unwrap();

    let received = transport.recv().await.unwrap().unwrap();
    assert_eq!(received, [1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn trailing_byte_is_not_truncated_away() {
    let decoder = PacketDecoder::dash().unwrap();
    let size = decoder.datagram_size();
    let mut transport =
        UdpTransport::bind_with_buffer("127.0.0.1:0".parse().unwrap(), size).await.unwrap();
    let addr = transport.local_addr().unwrap();

    let mut oversized = datagram(&decoder, 3, 20.0);
    oversized.push(0);
    assert_eq!(oversized.len(), size + 1);

    let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    sender.send_to(&oversized, addr).await.unwrap();

    let received = transport.recv().await.unwrap().unwrap();
    assert_eq!(received.len(), size + 1);
    assert!(matches!(
        decoder.decode(&received),
        Err(TelemetryError::MalformedPacket { actual, .. }) if actual == size + 1
    ));
}

#[tokio::test]
async fn decoded_records_reach_the_sink_and_garbage_is_dropped() {
    let decoder = PacketDecoder::dash().unwrap();
    let transport = UdpTransport::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = transport.local_addr().unwrap();

    let sink = SharedSink::default();
    let records = Arc::clone(&sink.records);
    let cancel = CancellationToken::new();

    let handle = IngestionLoop::new(decoder.clone(), Duration::ZERO)
        .with_sink(sink)
        .spawn(transport, cancel.clone());

    let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    sender.send_to(b"not telemetry", addr).await.unwrap();
    sender.send_to(&datagram(&decoder, 5, 27.78), addr).await.unwrap();

    wait_for(&records, 1).await;
    cancel.cancel();

    let stats = handle.await.unwrap().unwrap();
    assert_eq!(stats.accepted, 1);
    assert_eq!(stats.malformed, 1);

    let records = records.lock().unwrap();
    assert_eq!(records[0].read::<u8>(Field::Gear).unwrap(), 5);
    assert_eq!(records[0].read::<f32>(Field::Speed).unwrap(), 27.78);
}

#[tokio::test]
async fn burst_is_thinned_by_the_gate() {
    let decoder = PacketDecoder::dash().unwrap();
    let transport = UdpTransport::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = transport.local_addr().unwrap();

    let sink = SharedSink::default();
    let records = Arc::clone(&sink.records);
    let cancel = CancellationToken::new();

    let handle = IngestionLoop::new(decoder.clone(), Duration::from_secs(60))
        .with_sink(sink)
        .spawn(transport, cancel.clone());

    let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    for gear in 1..=5 {
        sender.send_to(&datagram(&decoder, gear, 10.0), addr).await.unwrap();
    }

    wait_for(&records, 1).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    cancel.cancel();

    let stats = handle.await.unwrap().unwrap();
    assert_eq!(stats.accepted, 1);
    assert_eq!(records.lock().unwrap()[0].read::<u8>(Field::Gear).unwrap(), 1);
}
