//! Runtime configuration.
//!
//! Loaded once at startup from YAML and immutable afterwards. Every key is
//! optional:
//!
//! ```yaml
//! bind_address: 0.0.0.0
//! port: 9999
//! min_interval_ms: 50
//! recv_buffer: 1024
//! display:
//!   width: 128
//!   height: 64
//! ```

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use crate::sinks::display::MIN_DISPLAY_HEIGHT;
use crate::transports::udp::DEFAULT_RECV_BUFFER;
use crate::{Result, TelemetryError};

/// Receiver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Local address to receive on
    pub bind_address: IpAddr,
    /// UDP port the simulator sends to
    pub port: u16,
    /// Minimum time between decoded datagrams
    pub min_interval_ms: u64,
    /// Receive buffer size in bytes
    pub recv_buffer: usize,
    /// Bitmap display geometry, read by [`BitmapSink::from_config`]
    ///
    /// The `pitboard` binary only prints to the console; embedders that own
    /// a panel pass this section to their display sink.
    ///
    /// [`BitmapSink::from_config`]: crate::sinks::BitmapSink::from_config
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 9999,
            min_interval_ms: 50,
            recv_buffer: DEFAULT_RECV_BUFFER,
            display: DisplayConfig::default(),
        }
    }
}

/// Pixel geometry of the bitmap display.
///
/// Height must be at least [`MIN_DISPLAY_HEIGHT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { width: 128, height: 64 }
    }
}

impl Config {
    /// Load and validate a YAML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| TelemetryError::config_file(path.to_path_buf(), e))?;
        Self::from_yaml_str(&text)
    }

    /// Parse and validate YAML config text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml_ng::from_str(yaml).map_err(|e| TelemetryError::Parse {
            context: "config".to_string(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values against the datagram layout and display limits.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(TelemetryError::configuration("port must be non-zero"));
        }

        let datagram_size = crate::protocol::dash_schema()?.datagram_size();
        if self.recv_buffer <= datagram_size {
            return Err(TelemetryError::configuration(format!(
                "recv_buffer of {} bytes must exceed the {}-byte datagram",
                self.recv_buffer, datagram_size
            )));
        }

        if self.display.width == 0 || self.display.height == 0 {
            return Err(TelemetryError::configuration("display geometry must be non-zero"));
        }
        if self.display.height < MIN_DISPLAY_HEIGHT {
            return Err(TelemetryError::configuration(format!(
                "display height of {} px cannot fit the RPM bar and text row ({} px)",
                self.display.height, MIN_DISPLAY_HEIGHT
            )));
        }

        Ok(())
    }

    /// Socket address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Minimum interval as a [`Duration`].
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}
