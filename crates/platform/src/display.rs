//! Display abstraction layer

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, primitives::Rectangle};

/// Display driver trait for the watch's 1-bit display.
///
/// Drawing goes to an off-screen frame; nothing becomes visible until the
/// changed regions are marked dirty and the frame is flushed. The host
/// composites asynchronously, so both calls are fire-and-forget from the
/// watchface's point of view.
pub trait DisplayDriver: DrawTarget<Color = BinaryColor, Error = DisplayError> {
    /// Record that `area` changed and must be composited on the next flush.
    fn mark_dirty(&mut self, area: Rectangle);

    /// Composite all dirty regions onto the panel.
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Get display dimensions
    fn dimensions(&self) -> Size {
        self.bounding_box().size
    }
}

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error
    Communication,
    /// Display busy
    Busy,
    /// Invalid state
    InvalidState,
    /// Timeout
    Timeout,
}

#[cfg(feature = "std")]
impl std::error::Error for DisplayError {}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Communication => write!(f, "Display communication error"),
            Self::Busy => write!(f, "Display is busy"),
            Self::InvalidState => write!(f, "Display in invalid state"),
            Self::Timeout => write!(f, "Display operation timeout"),
        }
    }
}
