//! Wire protocol of the simulator's data-out stream.
//!
//! A datagram is a little-endian record of fixed fields with no header,
//! length prefix or checksum; one receive is one packet. The producer injects
//! [`PAD_LEN`] undocumented bytes after the field at index `PAD_INDEX - 1`,
//! which the [`PacketDecoder`] discards before reading the rest.
//!
//! ```rust
//! use pitboard::protocol::{Field, PacketDecoder};
//!
//! let decoder = PacketDecoder::dash().unwrap();
//! let datagram = vec![0u8; decoder.datagram_size()];
//! let record = decoder.decode(&datagram).unwrap();
//! assert_eq!(record.read::<u8>(Field::Gear).unwrap(), 0);
//! ```

mod dash;
mod decoder;

pub use dash::{Field, PAD_INDEX, PAD_LEN, PAD_OFFSET, dash_schema};
pub use decoder::PacketDecoder;
