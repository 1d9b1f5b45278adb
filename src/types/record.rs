//! Decoded telemetry record

use std::sync::Arc;

use super::{Scalar, Schema, Value};
use crate::protocol::Field;

/// One decoded datagram: an immutable mapping from field name to value.
///
/// Values are stored in schema order; name lookups go through the schema's
/// index.
#[derive(Debug, Clone)]
pub struct TelemetryRecord {
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl TelemetryRecord {
    pub(crate) fn new(schema: Arc<Schema>, values: Vec<Value>) -> Self {
        debug_assert_eq!(schema.len(), values.len());
        Self { schema, values }
    }

    /// Value of the field called `name`.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.schema.index_of(name).and_then(|index| self.values.get(index)).copied()
    }

    /// Value of a Dash field.
    pub fn field(&self, field: Field) -> Option<Value> {
        self.get(field.name())
    }

    /// Read a Dash field as its Rust type.
    pub fn read<T: Scalar>(&self, field: Field) -> crate::Result<T> {
        self.read_named(field.name())
    }

    /// Read the field called `name` as its Rust type.
    pub fn read_named<T: Scalar>(&self, name: &str) -> crate::Result<T> {
        let value = self
            .get(name)
            .ok_or_else(|| crate::TelemetryError::FieldNotFound { field: name.to_string() })?;
        T::from_value(value)
    }

    /// `(name, value)` pairs in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> + '_ {
        self.schema.fields().iter().map(|f| f.name.as_str()).zip(self.values.iter().copied())
    }

    /// Values in wire order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Schema the record was decoded with.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
