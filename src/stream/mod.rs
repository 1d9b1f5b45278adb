//! Stream combinators for datagram processing

pub mod gate;

pub use gate::{Gate, GateExt, GateStats, RateGate};
