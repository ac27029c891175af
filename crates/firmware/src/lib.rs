//! World-Time Watchface Runtime
//!
//! Hosts the watchface core: owns the display, persistence and clock
//! collaborators, feeds host events to the single dispatch function and
//! persists the offset on orderly shutdown.
//!
//! # Architecture
//!
//! ```text
//! Tick source / companion inbox / shutdown
//!         ↓  (embassy-sync channel, arrival order)
//! Runtime (this crate)
//!         ↓
//! WatchfaceApp (watchface) → render_frame (watchface-render)
//!         ↓
//! Platform collaborators (DisplayDriver, Persist, Clock)
//! ```
//!
//! # Features
//!
//! - `emulator` - Desktop collaborators (framebuffer display, host clock)
//! - `std` - Enable standard library (file persistence, env configuration)
//! - `defmt` - defmt `Format` derives on platform types
//!
//! # Examples
//!
//! ```bash
//! cargo run -p firmware --example watchface_emulator --features emulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
#![allow(clippy::module_name_repetitions)] // common in Rust crates; not a real issue
#![allow(clippy::missing_errors_doc)] // most errors are self-explanatory
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod runtime;
pub mod tick;

#[cfg(any(test, feature = "std"))]
pub mod config;

#[cfg(feature = "emulator")]
pub mod emulator;

pub use runtime::{inbox_received, Control, Runtime, RuntimeError, EVENT_QUEUE_DEPTH};
pub use tick::{minute_ticks, next_tick_delay};

#[cfg(feature = "emulator")]
pub use emulator::{FramebufferDisplay, SystemClock};
