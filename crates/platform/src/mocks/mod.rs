//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use crate::persist_image::PersistImage;
use crate::*;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, primitives::Rectangle};

/// Mock display implementation backed by a full 1-bit framebuffer.
pub struct MockDisplay {
    width: u32,
    height: u32,
    frame: Vec<BinaryColor>,
    dirty: Vec<Rectangle>,
    last_flushed: Vec<Rectangle>,
    flush_count: usize,
}

impl MockDisplay {
    /// Create new mock display, cleared to `Off`.
    pub fn new(width: u32, height: u32) -> Self {
        let len = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        Self {
            width,
            height,
            frame: vec![BinaryColor::Off; len],
            dirty: Vec::new(),
            last_flushed: Vec::new(),
            flush_count: 0,
        }
    }

    /// Color at `(x, y)`, `None` outside the display.
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<BinaryColor> {
        self.index(x, y).and_then(|i| self.frame.get(i).copied())
    }

    /// Number of `On` pixels in column `x`.
    pub fn lit_in_column(&self, x: u32) -> usize {
        (0..self.height)
            .filter(|&y| self.pixel_at(x, y) == Some(BinaryColor::On))
            .count()
    }

    /// Get flush count
    pub fn flush_count(&self) -> usize {
        self.flush_count
    }

    /// Regions marked dirty since the last flush.
    pub fn dirty(&self) -> &[Rectangle] {
        &self.dirty
    }

    /// Regions that were dirty when the last flush happened.
    pub fn last_flushed_dirty(&self) -> &[Rectangle] {
        &self.last_flushed
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        usize::try_from(u64::from(y) * u64::from(self.width) + u64::from(x)).ok()
    }
}

impl DrawTarget for MockDisplay {
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
            if let Some(slot) = self.index(x, y).and_then(|i| self.frame.get_mut(i)) {
                *slot = color;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for MockDisplay {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DisplayDriver for MockDisplay {
    fn mark_dirty(&mut self, area: Rectangle) {
        self.dirty.push(area);
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.last_flushed = core::mem::take(&mut self.dirty);
        self.flush_count += 1;
        Ok(())
    }
}

/// Mock persistence: in-memory records with write accounting.
#[derive(Default)]
pub struct MockPersist {
    image: PersistImage,
    writes: usize,
    fail_reads: bool,
}

impl MockPersist {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one record.
    pub fn with_record(key: PersistKey, value: i32) -> Self {
        let mut persist = Self::new();
        // One record always fits in an empty image.
        persist.image.set(key, value).ok();
        persist
    }

    /// Make every subsequent read fail with [`PersistError::Io`].
    pub fn fail_reads(&mut self) {
        self.fail_reads = true;
    }

    /// Number of successful writes and deletes.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Stored value, bypassing the trait (and any injected failure).
    pub fn peek(&self, key: PersistKey) -> Option<i32> {
        self.image.get(key)
    }
}

impl Persist for MockPersist {
    fn exists(&mut self, key: PersistKey) -> Result<bool, PersistError> {
        if self.fail_reads {
            return Err(PersistError::Io);
        }
        Ok(self.image.get(key).is_some())
    }

    fn read_int(&mut self, key: PersistKey) -> Result<Option<i32>, PersistError> {
        if self.fail_reads {
            return Err(PersistError::Io);
        }
        Ok(self.image.get(key))
    }

    fn write_int(&mut self, key: PersistKey, value: i32) -> Result<(), PersistError> {
        self.image.set(key, value)?;
        self.writes += 1;
        Ok(())
    }

    fn delete(&mut self, key: PersistKey) -> Result<(), PersistError> {
        self.image.remove(key);
        self.writes += 1;
        Ok(())
    }
}

/// Mock clock with a settable reading.
pub struct MockClock {
    now: WallTime,
    clock_24h: bool,
}

impl MockClock {
    /// Clock reading `utc_seconds` (local time equal to UTC), 24h style.
    ///
    /// Out-of-range seconds fall back to the epoch.
    pub fn at(utc_seconds: i64) -> Self {
        Self {
            now: Self::reading(utc_seconds),
            clock_24h: true,
        }
    }

    /// Replace the current reading.
    pub fn set(&mut self, now: WallTime) {
        self.now = now;
    }

    /// Move the clock forward (or back) by `seconds`.
    pub fn advance(&mut self, seconds: i64) {
        self.now = Self::reading(self.now.utc_seconds.saturating_add(seconds));
    }

    /// Select 12h (`false`) or 24h (`true`) style.
    pub fn set_24h_style(&mut self, clock_24h: bool) {
        self.clock_24h = clock_24h;
    }

    fn reading(utc_seconds: i64) -> WallTime {
        WallTime::from_utc_seconds(utc_seconds)
            .unwrap_or(WallTime::new(0, chrono::NaiveDateTime::default()))
    }
}

impl Clock for MockClock {
    fn now(&self) -> WallTime {
        self.now
    }

    fn is_24h_style(&self) -> bool {
        self.clock_24h
    }
}
