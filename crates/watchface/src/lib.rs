//! World-time watchface core: cursor placement, offset persistence lifecycle,
//! clock text and the single event dispatch function.
//!
//! This crate is `no_std` by default; it only uses `core` + `alloc`.
//! Everything it needs from the host comes in through the `platform` traits.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

extern crate alloc;

pub mod app;
pub mod clock_text;
pub mod cursor;
pub mod event;
pub mod offset;

pub use app::{Frame, Outcome, WatchfaceApp};
pub use clock_text::ClockText;
pub use cursor::compute_cursor_x;
pub use event::{events_from_inbox, WatchEvent};
pub use offset::{LoadSource, Loaded, OffsetState, OffsetStore, OffsetStoreError};
