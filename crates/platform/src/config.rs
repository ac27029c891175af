//! Application configuration and constants
//!
//! This module defines central configuration values used across the watchface.
//! All naming, geometry and persistence keys should reference these constants
//! rather than hardcoding values.

use crate::persist::PersistKey;

/// The application name
pub const APP_NAME: &str = "World Time";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Display width in pixels (144×168 memory LCD)
pub const DISPLAY_WIDTH: u32 = 144;

/// Display height in pixels
pub const DISPLAY_HEIGHT: u32 = 168;

/// Width of the vertical daylight cursor bar in pixels.
///
/// The bar always spans the full [`DISPLAY_HEIGHT`].
pub const CURSOR_WIDTH: u32 = 6;

/// Persist key holding the companion-supplied offset in minutes.
///
/// Also the app-message dictionary key the companion sends it under.
pub const TIME_OFFSET_KEY: PersistKey = PersistKey::new(1);

/// Offset used when nothing has been persisted yet.
pub const DEFAULT_TIME_OFFSET: i32 = 0;

/// Development mode banner
pub const fn dev_banner() -> &'static str {
    "World Time - Development Mode"
}
