//! Emulator collaborators
//!
//! Headless stand-ins for the watch's display and clock, for running the
//! watchface on a desktop. The display keeps a packed 1-bit frame and can
//! dump it to a terminal; the clock reads the host's local time.

use std::fmt::Write as _;

use chrono::Local;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};
use embedded_graphics::primitives::Rectangle;

use platform::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use platform::{Clock, DisplayDriver, DisplayError, WallTime};

/// Bytes in one packed 1-bit frame.
#[allow(clippy::arithmetic_side_effects)] // compile-time constant
pub const FRAMEBUFFER_SIZE: usize = (DISPLAY_WIDTH as usize * DISPLAY_HEIGHT as usize) / 8;

/// In-memory 1-bit display.
///
/// Drawing goes to a back buffer; [`flush`](DisplayDriver::flush) copies the
/// dirty regions to the visible frame, the way the watch composites layers.
pub struct FramebufferDisplay {
    back: Vec<u8>,
    front: Vec<u8>,
    dirty: Vec<Rectangle>,
    frames: u64,
}

impl FramebufferDisplay {
    /// Create a display cleared to black.
    pub fn new() -> Self {
        Self {
            back: vec![0; FRAMEBUFFER_SIZE],
            front: vec![0; FRAMEBUFFER_SIZE],
            dirty: Vec::new(),
            frames: 0,
        }
    }

    /// Visible color at `(x, y)`, `None` outside the display.
    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        let (byte, bit) = bit_index(x, y)?;
        let lit = self.front.get(byte)? & bit != 0;
        Some(BinaryColor::from(lit))
    }

    /// Number of flushes so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Render the visible frame as text, two pixel rows per line.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(
            (DISPLAY_WIDTH as usize + 1) * (DISPLAY_HEIGHT as usize).div_ceil(2),
        );
        for y in (0..DISPLAY_HEIGHT).step_by(2) {
            for x in 0..DISPLAY_WIDTH {
                let top = self.pixel(x, y) == Some(BinaryColor::On);
                let bottom = self.pixel(x, y.saturating_add(1)) == Some(BinaryColor::On);
                out.push(match (top, bottom) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
            }
            let _ = writeln!(out);
        }
        out
    }

    fn copy_region(&mut self, area: &Rectangle) {
        let Some(bottom_right) = area.bottom_right() else {
            return;
        };
        let x0 = u32::try_from(area.top_left.x.max(0)).unwrap_or(0);
        let y0 = u32::try_from(area.top_left.y.max(0)).unwrap_or(0);
        let x1 = u32::try_from(bottom_right.x).unwrap_or(0).min(DISPLAY_WIDTH.saturating_sub(1));
        let y1 = u32::try_from(bottom_right.y).unwrap_or(0).min(DISPLAY_HEIGHT.saturating_sub(1));
        for y in y0..=y1 {
            for x in x0..=x1 {
                let Some((byte, bit)) = bit_index(x, y) else {
                    continue;
                };
                if let (Some(src), Some(dst)) = (self.back.get(byte).copied(), self.front.get_mut(byte)) {
                    *dst = (*dst & !bit) | (src & bit);
                }
            }
        }
    }
}

impl Default for FramebufferDisplay {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte offset and bit mask of `(x, y)` in a packed MSB-first frame.
#[allow(clippy::arithmetic_side_effects)] // x % 8 < 8; index / 8 by a nonzero constant
fn bit_index(x: u32, y: u32) -> Option<(usize, u8)> {
    if x >= DISPLAY_WIDTH || y >= DISPLAY_HEIGHT {
        return None;
    }
    let index = usize::try_from(y.checked_mul(DISPLAY_WIDTH)?.checked_add(x)?).ok()?;
    let bit = 0x80u8 >> (x % 8);
    Some((index / 8, bit))
}

impl DrawTarget for FramebufferDisplay {
    type Color = BinaryColor;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            let Some((byte, bit)) = bit_index(x, y) else {
                continue;
            };
            if let Some(slot) = self.back.get_mut(byte) {
                if color.is_on() {
                    *slot |= bit;
                } else {
                    *slot &= !bit;
                }
            }
        }
        Ok(())
    }
}

impl OriginDimensions for FramebufferDisplay {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

impl DisplayDriver for FramebufferDisplay {
    fn mark_dirty(&mut self, area: Rectangle) {
        self.dirty.push(area);
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let dirty = std::mem::take(&mut self.dirty);
        for area in &dirty {
            self.copy_region(area);
        }
        self.frames = self.frames.saturating_add(1);
        tracing::trace!(regions = dirty.len(), frame = self.frames, "framebuffer flushed");
        Ok(())
    }
}

/// Host wall clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    clock_24h: bool,
}

impl SystemClock {
    /// Clock with the given 12/24h style.
    pub const fn new(clock_24h: bool) -> Self {
        Self { clock_24h }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> WallTime {
        let local = Local::now();
        WallTime::new(local.timestamp(), local.naive_local())
    }

    fn is_24h_style(&self) -> bool {
        self.clock_24h
    }
}
