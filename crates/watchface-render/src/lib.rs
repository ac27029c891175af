//! watchface-render - Frame rendering for the world-time watchface
//!
//! Draws a [`watchface::Frame`] (cursor position plus clock text) over an
//! optional world-map background onto any 1-bit `embedded-graphics` target:
//! the emulator framebuffer, the test mock, or a real panel.
//!
//! # Layers
//!
//! Drawn back to front:
//!
//! 1. black clear
//! 2. background bitmap
//! 3. cursor bar
//! 4. time, am/pm and date text (white, transparent background)

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

pub mod layout;
mod render;

pub use render::render_frame;
