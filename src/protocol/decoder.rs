//! Packet decoder: raw datagram to [`TelemetryRecord`]

use std::sync::Arc;

use crate::types::{Schema, TelemetryRecord, Value};
use crate::{Result, TelemetryError};

/// Decodes raw datagrams against a fixed [`Schema`].
///
/// The pad offset and datagram size are computed once here; decoding is a
/// pure function of the input bytes.
#[derive(Debug, Clone)]
pub struct PacketDecoder {
    schema: Arc<Schema>,
    split: usize,
    pad_len: usize,
    datagram_size: usize,
}

impl PacketDecoder {
    /// Create a decoder for `schema`.
    pub fn new(schema: Arc<Schema>) -> Self {
        let split = schema.pad_offset();
        let pad_len = schema.pad_len();
        let datagram_size = schema.datagram_size();
        Self { schema, split, pad_len, datagram_size }
    }

    /// Decoder for the simulator's Dash format.
    pub fn dash() -> Result<Self> {
        Ok(Self::new(super::dash_schema()?))
    }

    /// Schema this decoder reads.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Exact length of a well-formed datagram.
    pub fn datagram_size(&self) -> usize {
        self.datagram_size
    }

    /// Decode one datagram.
    ///
    /// The pad region is skipped without being read. Values are passed
    /// through as received: NaN or out-of-range numbers are not rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::MalformedPacket`] when `raw` is not exactly
    /// [`datagram_size`](Self::datagram_size) bytes long.
    pub fn decode(&self, raw: &[u8]) -> Result<TelemetryRecord> {
        if raw.len() != self.datagram_size {
            return Err(TelemetryError::malformed_packet(self.datagram_size, raw.len()));
        }

        let (head, rest) = raw.split_at(self.split);
        let tail = &rest[self.pad_len..];

        let mut values = Vec::with_capacity(self.schema.len());
        for field in self.schema.fields() {
            let bytes = if field.offset < self.split {
                &head[field.offset..]
            } else {
                &tail[field.offset - self.split..]
            };

            let value = field
                .wire_type
                .decode(bytes)
                .ok_or_else(|| TelemetryError::malformed_packet(self.datagram_size, raw.len()))?;
            values.push(value);
        }

        Ok(TelemetryRecord::new(Arc::clone(&self.schema), values))
    }

    /// Encode values into a datagram, inserting a zeroed pad region.
    ///
    /// This is the producer side of [`decode`](Self::decode), used to
    /// synthesize traffic.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::TypeConversion`] when the number of values or
    /// any value's wire type does not match the schema.
    pub fn encode(&self, values: &[Value]) -> Result<Vec<u8>> {
        if values.len() != self.schema.len() {
            return Err(TelemetryError::TypeConversion {
                details: format!(
                    "Expected {} values, got {}",
                    self.schema.len(),
                    values.len()
                ),
            });
        }

        let mut buf = Vec::with_capacity(self.datagram_size);
        for (index, (field, value)) in self.schema.fields().iter().zip(values).enumerate() {
            if index == self.schema.pad_index() {
                buf.resize(buf.len() + self.pad_len, 0);
            }
            if value.wire_type() != field.wire_type {
                return Err(TelemetryError::TypeConversion {
                    details: format!(
                        "Field '{}' expects {:?}, got {:?}",
                        field.name,
                        field.wire_type,
                        value.wire_type()
                    ),
                });
            }
            value.write_le(&mut buf);
        }
        if self.schema.pad_index() == self.schema.len() {
            buf.resize(buf.len() + self.pad_len, 0);
        }

        Ok(buf)
    }
}
