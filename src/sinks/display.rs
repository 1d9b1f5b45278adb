//! Bitmap display sink
//!
//! Each accepted record triggers a full redraw: an RPM bar across the top,
//! the gear on the left and the speed on the right. The physical panel is
//! reached through a [`DisplayDriver`].

use tracing::warn;

use super::Sink;
use super::format::{bar_width, format_gear, format_speed, rpm_ratio};
use crate::config::DisplayConfig;
use crate::protocol::Field;
use crate::types::TelemetryRecord;
use crate::Result;

/// Height in pixels of the RPM bar.
pub const BAR_HEIGHT: u32 = 16;

/// Margin between the bar and the text row.
const TEXT_MARGIN: u32 = 8;

/// Height in pixels reserved for one line of text.
pub const TEXT_HEIGHT: u32 = 8;

/// Smallest panel height that fits the bar, the margin and the text row.
pub const MIN_DISPLAY_HEIGHT: u32 = BAR_HEIGHT + TEXT_MARGIN + TEXT_HEIGHT;

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Drawing primitives of a pixel display.
///
/// Drawing happens into the driver's buffer; nothing is visible until
/// [`flush`](DisplayDriver::flush).
pub trait DisplayDriver: Send {
    /// Clear the whole buffer.
    fn clear(&mut self) -> Result<()>;

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect) -> Result<()>;

    /// Draw text with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, x: u32, y: u32, text: &str) -> Result<()>;

    /// Commit the buffer to the panel.
    fn flush(&mut self) -> Result<()>;
}

/// Renders RPM, gear and speed onto a [`DisplayDriver`].
pub struct BitmapSink<D> {
    driver: D,
    width: u32,
    height: u32,
}

impl<D: DisplayDriver> BitmapSink<D> {
    /// Create a sink for a `width` x `height` panel.
    pub fn new(driver: D, width: u32, height: u32) -> Self {
        Self { driver, width, height }
    }

    /// Create a sink using the configured panel geometry.
    pub fn from_config(driver: D, config: &DisplayConfig) -> Self {
        Self::new(driver, config.width, config.height)
    }

    /// Borrow the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    fn render(&mut self, record: &TelemetryRecord) -> Result<()> {
        let max_rpm = record.read::<f32>(Field::EngineMaxRpm)?;
        let current_rpm = record.read::<f32>(Field::CurrentEngineRpm)?;
        let gear = record.read::<u8>(Field::Gear)?;
        let speed = record.read::<f32>(Field::Speed)?;

        let bar = bar_width(rpm_ratio(current_rpm, max_rpm), self.width);
        let bar_height = BAR_HEIGHT.min(self.height);
        let text_y = (bar_height + TEXT_MARGIN).min(self.height.saturating_sub(TEXT_HEIGHT));

        self.driver.clear()?;
        self.driver.fill_rect(Rect { x: 0, y: 0, width: bar, height: bar_height })?;
        self.driver.draw_text(0, text_y, &format_gear(gear))?;
        self.driver.draw_text(self.width / 2, text_y, &format_speed(speed).to_string())?;
        self.driver.flush()
    }
}

impl<D: DisplayDriver> Sink for BitmapSink<D> {
    fn accept(&mut self, record: &TelemetryRecord) {
        if let Err(e) = self.render(record) {
            warn!("Display sink failed: {}", e);
        }
    }
}
