//! Wire type definitions

use serde::{Deserialize, Serialize};

/// Scalar encodings used by the telemetry wire format.
///
/// Every multi-byte type is little-endian on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireType {
    /// 32-bit signed integer
    Int32,
    /// 32-bit unsigned integer
    UInt32,
    /// 32-bit IEEE 754 floating point
    Float32,
    /// 16-bit unsigned integer
    UInt16,
    /// 8-bit unsigned integer
    UInt8,
    /// 8-bit signed integer
    Int8,
}

impl WireType {
    /// Every supported wire type.
    pub const ALL: [WireType; 6] = [
        WireType::Int32,
        WireType::UInt32,
        WireType::Float32,
        WireType::UInt16,
        WireType::UInt8,
        WireType::Int8,
    ];

    /// Returns the size in bytes of this wire type.
    pub const fn size(&self) -> usize {
        match self {
            WireType::Int32 | WireType::UInt32 | WireType::Float32 => 4,
            WireType::UInt16 => 2,
            WireType::UInt8 | WireType::Int8 => 1,
        }
    }

    /// Read one little-endian scalar from the head of `bytes`.
    ///
    /// Returns `None` when fewer than [`size`](Self::size) bytes are available.
    pub fn decode(&self, bytes: &[u8]) -> Option<Value> {
        let value = match self {
            WireType::Int32 => Value::Int32(i32::from_le_bytes(head(bytes)?)),
            WireType::UInt32 => Value::UInt32(u32::from_le_bytes(head(bytes)?)),
            WireType::Float32 => Value::Float32(f32::from_le_bytes(head(bytes)?)),
            WireType::UInt16 => Value::UInt16(u16::from_le_bytes(head(bytes)?)),
            WireType::UInt8 => Value::UInt8(u8::from_le_bytes(head(bytes)?)),
            WireType::Int8 => Value::Int8(i8::from_le_bytes(head(bytes)?)),
        };
        Some(value)
    }
}

fn head<const N: usize>(bytes: &[u8]) -> Option<[u8; N]> {
    bytes.get(..N)?.try_into().ok()
}

/// One decoded scalar, tagged with the wire type it was read as.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int32(i32),
    UInt32(u32),
    Float32(f32),
    UInt16(u16),
    UInt8(u8),
    Int8(i8),
}

impl Value {
    /// The wire type this value is encoded as.
    pub const fn wire_type(&self) -> WireType {
        match self {
            Value::Int32(_) => WireType::Int32,
            Value::UInt32(_) => WireType::UInt32,
            Value::Float32(_) => WireType::Float32,
            Value::UInt16(_) => WireType::UInt16,
            Value::UInt8(_) => WireType::UInt8,
            Value::Int8(_) => WireType::Int8,
        }
    }

    /// Widen to `f64`. Lossless for every wire type.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Value::Int32(v) => f64::from(v),
            Value::UInt32(v) => f64::from(v),
            Value::Float32(v) => f64::from(v),
            Value::UInt16(v) => f64::from(v),
            Value::UInt8(v) => f64::from(v),
            Value::Int8(v) => f64::from(v),
        }
    }

    /// Append the little-endian encoding of this value to `buf`.
    pub fn write_le(&self, buf: &mut Vec<u8>) {
        match *self {
            Value::Int32(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Value::UInt32(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Value::Float32(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Value::UInt16(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Value::UInt8(v) => buf.push(v),
            Value::Int8(v) => buf.extend_from_slice(&v.to_le_bytes()),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int32(v) => write!(f, "{v}"),
            Value::UInt32(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::UInt16(v) => write!(f, "{v}"),
            Value::UInt8(v) => write!(f, "{v}"),
            Value::Int8(v) => write!(f, "{v}"),
        }
    }
}
