//! Explicit application state and the single event dispatch function.

use platform::{Persist, WallTime};

use crate::clock_text::ClockText;
use crate::cursor::compute_cursor_x;
use crate::event::WatchEvent;
use crate::offset::{Loaded, OffsetStore, OffsetStoreError};

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// Left edge of the cursor bar
    pub cursor_x: i32,
    /// Time, date and am/pm text
    pub text: ClockText,
}

/// What the runtime should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The frame changed; draw it
    Redraw(Frame),
    /// Nothing visible changed
    Idle,
    /// Shutdown requested; persist and stop
    Exit,
}

/// Watchface application state.
///
/// Owns the offset store and the current frame. The host drives it with
/// [`start`](Self::start), one [`dispatch`](Self::dispatch) per event and a
/// final [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct WatchfaceApp {
    offset: OffsetStore,
    frame: Frame,
}

impl WatchfaceApp {
    /// Create the app with an unloaded offset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the offset and compute the first frame.
    pub fn start<P: Persist>(
        &mut self,
        persist: &mut P,
        now: WallTime,
        clock_24h: bool,
    ) -> Result<Loaded, OffsetStoreError> {
        let loaded = self.offset.load(persist)?;
        self.frame = Frame {
            cursor_x: compute_cursor_x(now.utc_seconds, loaded.value),
            text: ClockText::format(&now.local, clock_24h),
        };
        Ok(loaded)
    }

    /// Apply one event.
    ///
    /// `now` is the current clock reading, used when the event carries none.
    /// A tick refreshes text and cursor from its own reading. A new offset
    /// only moves the cursor.
    pub fn dispatch(
        &mut self,
        event: WatchEvent,
        now: WallTime,
        clock_24h: bool,
    ) -> Result<Outcome, OffsetStoreError> {
        match event {
            WatchEvent::Tick(at) => {
                let offset = self.offset.value().ok_or(OffsetStoreError::NotLoaded)?;
                self.frame = Frame {
                    cursor_x: compute_cursor_x(at.utc_seconds, offset),
                    text: ClockText::format(&at.local, clock_24h),
                };
                Ok(Outcome::Redraw(self.frame.clone()))
            }
            WatchEvent::OffsetReceived(minutes) => {
                self.offset.receive_offset(minutes)?;
                self.frame.cursor_x = compute_cursor_x(now.utc_seconds, minutes);
                Ok(Outcome::Redraw(self.frame.clone()))
            }
            WatchEvent::InboxDropped(_) | WatchEvent::OutboxSent | WatchEvent::OutboxFailed(_) => {
                Ok(Outcome::Idle)
            }
            WatchEvent::ShutdownRequested => Ok(Outcome::Exit),
        }
    }

    /// Persist the offset. Call once, after [`Outcome::Exit`].
    pub fn finish<P: Persist>(&mut self, persist: &mut P) -> Result<i32, OffsetStoreError> {
        self.offset.save(persist)
    }

    /// Current frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Current cursor position.
    pub fn cursor_x(&self) -> i32 {
        self.frame.cursor_x
    }

    /// In-memory offset, `None` before `start`.
    pub fn offset(&self) -> Option<i32> {
        self.offset.value()
    }
}
