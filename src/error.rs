//! Error types for telemetry ingestion.
//!
//! All errors implement the `std::error::Error` trait and carry enough context
//! to decide whether the ingestion loop can keep going.
//!
//! ## Error Categories
//!
//! - **Configuration Errors**: malformed schema or configuration, fatal at startup
//! - **Packet Errors**: a datagram whose length does not match the wire layout
//! - **Transport Errors**: the datagram source failed, fatal to the ingestion loop
//! - **Access Errors**: missing fields or wire-type mismatches on typed reads
//! - **Display Errors**: failures reported by a display driver
//! - **Output Errors**: I/O failures while a sink writes its output
//!
//! ## Recovery
//!
//! ```rust
//! use pitboard::TelemetryError;
//!
//! let error = TelemetryError::malformed_packet(323, 12);
//! assert!(error.is_retryable());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for telemetry operations.
pub type Result<T, E = TelemetryError> = std::result::Result<T, E>;

/// Main error type for telemetry operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TelemetryError {
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("Malformed packet: expected {expected} bytes, received {actual}")]
    MalformedPacket { expected: usize, actual: usize },

    #[error("Transport failure: {reason}")]
    Transport {
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Config file error: {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Field '{field}' not found in telemetry record")]
    FieldNotFound { field: String },

    #[error("Type conversion error: {details}")]
    TypeConversion { details: String },

    #[error("Display error: {reason}")]
    Display { reason: String },

    #[error("Output error: {reason}")]
    Output {
        reason: String,
        #[source]
        source: std::io::Error,
    },
}

impl TelemetryError {
    /// Returns whether processing can continue after this error.
    ///
    /// A malformed datagram is dropped and the next one simply arrives; the
    /// other categories need operator action.
    pub fn is_retryable(&self) -> bool {
        match self {
            TelemetryError::MalformedPacket { .. } => true,
            TelemetryError::Display { .. } => true,
            TelemetryError::Output { .. } => true,
            TelemetryError::Transport { .. } => false,
            TelemetryError::Configuration { .. } => false,
            TelemetryError::Config { .. } => false,
            TelemetryError::Parse { .. } => false,
            TelemetryError::FieldNotFound { .. } => false,
            TelemetryError::TypeConversion { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            TelemetryError::Configuration { .. } => vec![
                "Check the field table for duplicate names",
                "Verify the pad boundary index is within the field count",
                "Review the configuration values against their documented ranges",
            ],
            TelemetryError::MalformedPacket { .. } => vec![
                "Verify the simulator is sending the Dash data format",
                "Check that no other application sends to the telemetry port",
            ],
            TelemetryError::Transport { .. } => vec![
                "Check the bind address belongs to this host",
                "Ensure the port is not used by another process",
                "Restart the receiver once the network is available",
            ],
            TelemetryError::Config { .. } => vec![
                "Check the config file exists and is readable",
                "Check file permissions",
            ],
            TelemetryError::Parse { .. } => vec![
                "Check the config file is valid YAML",
                "Compare the keys against the documented configuration",
            ],
            TelemetryError::FieldNotFound { .. } => vec![
                "Check field name spelling",
                "Verify the record was decoded with the expected schema",
            ],
            TelemetryError::TypeConversion { .. } => vec![
                "Read the field with the type matching its wire type",
                "Use Value::as_f64 for type-agnostic numeric access",
            ],
            TelemetryError::Display { .. } => vec![
                "Check the display bus wiring and address",
                "Verify the display geometry in the configuration",
            ],
            TelemetryError::Output { .. } => vec![
                "Check the output stream is still open",
                "Check the pipe reader has not exited",
            ],
        }
    }

    /// Helper constructor for configuration errors.
    pub fn configuration(reason: impl Into<String>) -> Self {
        TelemetryError::Configuration { reason: reason.into() }
    }

    /// Helper constructor for length mismatches.
    pub fn malformed_packet(expected: usize, actual: usize) -> Self {
        TelemetryError::MalformedPacket { expected, actual }
    }

    /// Helper constructor for transport failures without an I/O cause.
    pub fn transport(reason: impl Into<String>) -> Self {
        TelemetryError::Transport { reason: reason.into(), source: None }
    }

    /// Helper constructor for transport failures caused by an I/O error.
    pub fn transport_io(reason: impl Into<String>, source: std::io::Error) -> Self {
        TelemetryError::Transport { reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for config file errors with path context.
    pub fn config_file(path: PathBuf, source: std::io::Error) -> Self {
        TelemetryError::Config { path, source }
    }

    /// Helper constructor for sink output failures.
    pub fn output(reason: impl Into<String>, source: std::io::Error) -> Self {
        TelemetryError::Output { reason: reason.into(), source }
    }

    /// Helper constructor for display driver errors.
    pub fn display(reason: impl Into<String>) -> Self {
        TelemetryError::Display { reason: reason.into() }
    }
}

impl From<std::io::Error> for TelemetryError {
    fn from(err: std::io::Error) -> Self {
        TelemetryError::Transport { reason: "I/O failure".to_string(), source: Some(err) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn error_messages_carry_their_context(
            reason in ".*",
            field_name in "\\w+",
            expected in 0usize..2048,
            actual in 0usize..2048,
        ) {
            let config = TelemetryError::configuration(reason.clone());
            prop_assert!(config.to_string().contains(&reason));

            let field = TelemetryError::FieldNotFound { field: field_name.clone() };
            prop_assert!(field.to_string().contains(&field_name));

            let packet = TelemetryError::malformed_packet(expected, actual);
            let msg = packet.to_string();
            prop_assert!(msg.contains(&expected.to_string()));
            prop_assert!(msg.contains(&actual.to_string()));
        }
    }

    #[test]
    fn error_traits_validation() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<TelemetryError>();

        let error = TelemetryError::transport("socket closed");
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn only_packet_and_display_errors_are_retryable() {
        assert!(TelemetryError::malformed_packet(323, 0).is_retryable());
        assert!(TelemetryError::display("bus busy").is_retryable());
        let broken = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(TelemetryError::output("stdout", broken).is_retryable());
        assert!(!TelemetryError::transport("closed").is_retryable());
        assert!(!TelemetryError::configuration("duplicate").is_retryable());
    }

    #[test]
    fn recovery_suggestions_are_descriptive() {
        let errors = [
            TelemetryError::configuration("x"),
            TelemetryError::malformed_packet(1, 2),
            TelemetryError::transport("x"),
            TelemetryError::display("x"),
        ];
        for error in &errors {
            let suggestions = error.recovery_suggestions();
            assert!(!suggestions.is_empty());
            assert!(suggestions.iter().all(|s| s.len() > 5));
        }
    }

    #[test]
    fn io_errors_become_transport_errors() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let converted: TelemetryError = io_err.into();

        match converted {
            TelemetryError::Transport { source: Some(source), .. } => {
                assert_eq!(source.to_string(), "port taken");
            }
            other => panic!("Expected Transport error, got {other:?}"),
        }
    }
}
