//! Typed access to decoded values

use super::{Value, WireType};

/// Trait for Rust types that can be read out of a decoded [`Value`].
///
/// Reads are strict: a value is only converted to the Rust type matching its
/// wire type. Use [`Value::as_f64`] when any numeric type will do.
pub trait Scalar: Sized {
    /// The wire type this Rust type corresponds to.
    const WIRE_TYPE: WireType;

    /// Convert a decoded value into this type.
    fn from_value(value: Value) -> crate::Result<Self>;
}

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const WIRE_TYPE: WireType = WireType::$variant;

                fn from_value(value: Value) -> crate::Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(crate::TelemetryError::TypeConversion {
                            details: format!(
                                "Expected {:?}, got {:?}",
                                WireType::$variant,
                                other.wire_type()
                            ),
                        }),
                    }
                }
            }
        )*
    };
}

impl_scalar! {
    i32 => Int32,
    u32 => UInt32,
    f32 => Float32,
    u16 => UInt16,
    u8 => UInt8,
    i8 => Int8,
}
