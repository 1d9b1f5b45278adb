//! Schema registry: field layout of a telemetry datagram

use serde::Serialize;
use std::collections::HashMap;

use super::WireType;

/// Ordered field layout of a telemetry datagram.
///
/// Offsets are computed once at construction and the schema is never mutated
/// afterwards. A fixed-size region of unused bytes is injected by the producer
/// after the field at `pad_index - 1`; offsets reported here are payload
/// offsets, i.e. with that region already removed.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
    /// Prefix sums of byte widths, `fields.len() + 1` entries
    offsets: Vec<usize>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    pad_index: usize,
    pad_len: usize,
}

impl Schema {
    /// Build a schema from `(name, wire_type)` pairs in wire order.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::Configuration`](crate::TelemetryError::Configuration)
    /// when two fields share a name or `pad_index` is greater than the field count.
    pub fn new<I, S>(fields: I, pad_index: usize, pad_len: usize) -> crate::Result<Self>
    where
        I: IntoIterator<Item = (S, WireType)>,
        S: Into<String>,
    {
        let mut descriptors = Vec::new();
        let mut offsets = vec![0];
        let mut index = HashMap::new();
        let mut offset = 0;

        for (position, (name, wire_type)) in fields.into_iter().enumerate() {
            let name = name.into();
            if index.insert(name.clone(), position).is_some() {
                return Err(crate::TelemetryError::configuration(format!(
                    "duplicate field name '{name}' at index {position}"
                )));
            }

            descriptors.push(FieldDescriptor { name, wire_type, offset });
            offset += wire_type.size();
            offsets.push(offset);
        }

        if pad_index > descriptors.len() {
            return Err(crate::TelemetryError::configuration(format!(
                "pad boundary index {pad_index} is outside [0, {}]",
                descriptors.len()
            )));
        }

        Ok(Self { fields: descriptors, offsets, index, pad_index, pad_len })
    }

    /// Size in bytes of all fields, excluding the pad region.
    pub fn total_wire_size(&self) -> usize {
        self.offsets.last().copied().unwrap_or(0)
    }

    /// Payload byte offset of the field at `field_index`.
    ///
    /// Defined for `0..=len()`; `offset_of(len())` is the total wire size.
    pub fn offset_of(&self, field_index: usize) -> Option<usize> {
        self.offsets.get(field_index).copied()
    }

    /// Byte width of a wire type.
    pub const fn byte_width(wire_type: WireType) -> usize {
        wire_type.size()
    }

    /// Field index after which the producer injects the pad region.
    pub fn pad_index(&self) -> usize {
        self.pad_index
    }

    /// Length in bytes of the pad region.
    pub fn pad_len(&self) -> usize {
        self.pad_len
    }

    /// Byte offset at which the pad region starts in a raw datagram.
    pub fn pad_offset(&self) -> usize {
        self.offsets[self.pad_index]
    }

    /// Exact size in bytes of a well-formed datagram.
    pub fn datagram_size(&self) -> usize {
        self.total_wire_size() + self.pad_len
    }

    /// Field descriptor at `field_index`.
    pub fn field(&self, field_index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(field_index)
    }

    /// Index of the field called `name` (O(1) lookup).
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// All fields in wire order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A named field of the wire layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field name, unique within its schema
    pub name: String,
    /// On-the-wire encoding
    pub wire_type: WireType,
    /// Payload byte offset (pad region excluded)
    pub offset: usize,
}

impl FieldDescriptor {
    /// Number of bytes this field occupies on the wire.
    pub const fn byte_width(&self) -> usize {
        self.wire_type.size()
    }
}
