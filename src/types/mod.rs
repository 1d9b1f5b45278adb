//! Core types for telemetry data representation.
//!
//! ## Architecture
//!
//! - [`WireType`] is the on-the-wire scalar encoding of a field, with its byte width
//! - [`Value`] is one decoded scalar tagged with its wire type
//! - [`Schema`] is the ordered field layout with precomputed offsets and the pad region
//! - [`TelemetryRecord`] is one decoded datagram
//! - [`Scalar`] provides strict typed reads out of a record
//!
//! ## Usage Example
//!
//! ```rust
//! use pitboard::types::{Schema, WireType};
//!
//! let schema = Schema::new(
//!     [("rpm", WireType::Float32), ("gear", WireType::UInt8), ("lap", WireType::UInt16)],
//!     1, // pad region after "rpm"
//!     12,
//! )
//! .unwrap();
//!
//! assert_eq!(schema.total_wire_size(), 7);
//! assert_eq!(schema.offset_of(2), Some(5));
//! assert_eq!(schema.pad_offset(), 4);
//! assert_eq!(schema.datagram_size(), 19);
//! ```

mod record;
mod scalar;
mod schema;
mod wire_type;

pub use record::TelemetryRecord;
pub use scalar::Scalar;
pub use schema::{FieldDescriptor, Schema};
pub use wire_type::{Value, WireType};
