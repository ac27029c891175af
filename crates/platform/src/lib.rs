//! Host collaborator layer for the world-time watchface
//!
//! This crate provides trait-based abstractions for everything the watchface
//! core needs from its host runtime, enabling development and testing without
//! a watch.
//!
//! # Architecture Layers
//!
//! ```text
//! Runtime (firmware crate: event loop, tick source, emulator)
//!         ↓
//! Feature Layers (watchface core, watchface-render)
//!         ↓
//! Platform (this crate - trait abstractions)
//!         ↓
//! Host runtime (watch OS services, or the desktop emulator)
//! ```
//!
//! # Collaborators
//!
//! - [`DisplayDriver`] - 1-bit display with dirty-region compositing
//! - [`Persist`] - Durable integer key/value records
//! - [`Clock`] - Wall-clock time and the user's 12/24h preference
//! - [`AppMessage`] - Dictionaries exchanged with the companion phone app
//!
//! # Features
//!
//! - `std`: Standard library support (file-backed persistence, mocks)
//! - `defmt`: Enable defmt `Format` derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{Persist, config::TIME_OFFSET_KEY};
//!
//! fn stored_offset<P: Persist>(persist: &mut P) -> i32 {
//!     persist.read_int(TIME_OFFSET_KEY).ok().flatten().unwrap_or(0)
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::must_use_candidate)] // accessors; callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod clock;
pub mod config;
pub mod display;
pub mod message;
pub mod persist;
pub mod persist_image;

#[cfg(any(test, feature = "std"))]
pub mod persist_local;

pub mod mocks;

// Re-export main collaborator traits
pub use clock::{Clock, WallTime};
pub use display::{DisplayDriver, DisplayError};
pub use message::{AppMessage, AppMessageResult, Tuple, TupleValue};
pub use persist::{Persist, PersistError, PersistKey};
