//! Time-of-day to cursor position mapping.
//!
//! The background art is a world map whose horizontal axis is divided into
//! [`BAND_COUNT`] bands of [`SECONDS_PER_BAND`] seconds each. The cursor
//! marks the band under local solar noon, so it walks right-to-left across
//! the map once per day.
//!
//! The constants are tied to the artwork and must not be re-derived: any
//! change shifts the cursor against the map.

use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};
use platform::config::{CURSOR_WIDTH, DISPLAY_HEIGHT};

/// Length of a day in seconds.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Half-day bias aligning the day with the map's prime meridian.
pub const HALF_DAY_BIAS: i64 = 43_200;

/// Seconds covered by one horizontal band.
pub const SECONDS_PER_BAND: i64 = 608;

/// Number of horizontal bands across the map.
pub const BAND_COUNT: i64 = 142;

/// Fixed band phase of the artwork.
const BAND_PHASE: i64 = 2;

/// Smallest x [`compute_cursor_x`] can return.
pub const CURSOR_X_MIN: i32 = 1;

/// Largest x [`compute_cursor_x`] can return.
pub const CURSOR_X_MAX: i32 = 142;

/// Horizontal pixel position of the cursor for `now_utc_seconds` shifted by
/// `offset_minutes`.
///
/// Total over all inputs: each term is reduced modulo one day before they
/// are summed, so nothing overflows and no remainder goes negative. The
/// result is always in [`CURSOR_X_MIN`]`..=`[`CURSOR_X_MAX`].
///
/// ```
/// assert_eq!(watchface::compute_cursor_x(0, 0), 69);
/// ```
#[allow(clippy::arithmetic_side_effects)] // every operand is bounded by SECONDS_PER_DAY
pub fn compute_cursor_x(now_utc_seconds: i64, offset_minutes: i32) -> i32 {
    let now = now_utc_seconds.rem_euclid(SECONDS_PER_DAY);
    let offset = (i64::from(offset_minutes) * 60).rem_euclid(SECONDS_PER_DAY);
    let local_seconds = (now + offset + HALF_DAY_BIAS) % SECONDS_PER_DAY;
    let band = (local_seconds / SECONDS_PER_BAND + BAND_PHASE) % BAND_COUNT;
    // band is in 0..BAND_COUNT, so the difference fits comfortably in i32.
    i32::try_from(BAND_COUNT - band).unwrap_or(CURSOR_X_MAX)
}

/// Frame of the cursor bar at `x`: [`CURSOR_WIDTH`] wide, full display height.
pub fn cursor_frame(x: i32) -> Rectangle {
    Rectangle::new(Point::new(x, 0), Size::new(CURSOR_WIDTH, DISPLAY_HEIGHT))
}
