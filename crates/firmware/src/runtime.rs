//! Event loop hosting the watchface.
//!
//! # Event delivery
//!
//! Every event source (minute ticks, the companion inbox, the shutdown
//! request) pushes [`WatchEvent`]s into one
//! [`Channel`](embassy_sync::channel::Channel). [`Runtime::run`] is
//! the only receiver, so events are handled one at a time, strictly in
//! arrival order, and no locking is needed around the application state.
//!
//! # Overflow handling
//!
//! [`inbox_received`] never blocks the transport: if the channel is full the
//! offset is dropped and logged, exactly like a message the transport itself
//! dropped.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Receiver, Sender};
use embedded_graphics::image::ImageRaw;
use embedded_graphics::pixelcolor::BinaryColor;
use thiserror_no_std::Error;

use platform::{AppMessage, Clock, DisplayDriver, DisplayError, Persist};
use watchface::cursor::cursor_frame;
use watchface::offset::LoadSource;
use watchface::{events_from_inbox, Frame, OffsetStoreError, Outcome, WatchEvent, WatchfaceApp};
use watchface_render::{layout, render_frame};

/// Depth of the event channel between the event sources and the runtime.
pub const EVENT_QUEUE_DEPTH: usize = 8;

/// Runtime errors
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Drawing or flushing the display failed
    #[error("display error: {0}")]
    Display(DisplayError),
    /// The offset store rejected an operation or its write-back failed
    #[error("offset store error: {0}")]
    Offset(OffsetStoreError),
}

impl From<DisplayError> for RuntimeError {
    fn from(err: DisplayError) -> Self {
        Self::Display(err)
    }
}

impl From<OffsetStoreError> for RuntimeError {
    fn from(err: OffsetStoreError) -> Self {
        Self::Offset(err)
    }
}

/// Whether the event loop keeps going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Wait for the next event
    Continue,
    /// Shutdown was requested; persist and stop
    Exit,
}

/// Watchface runtime: the app state plus the collaborators it draws to,
/// persists through and reads the time from.
pub struct Runtime<D, P, C> {
    display: D,
    persist: P,
    clock: C,
    app: WatchfaceApp,
    background: Option<ImageRaw<'static, BinaryColor>>,
}

impl<D, P, C> Runtime<D, P, C>
where
    D: DisplayDriver,
    P: Persist,
    C: Clock,
{
    /// Create a runtime. Nothing is read or drawn until [`start`](Self::start).
    pub fn new(display: D, persist: P, clock: C) -> Self {
        Self {
            display,
            persist,
            clock,
            app: WatchfaceApp::new(),
            background: None,
        }
    }

    /// Draw `background` under every frame.
    #[must_use]
    pub fn with_background(mut self, background: ImageRaw<'static, BinaryColor>) -> Self {
        self.background = Some(background);
        self
    }

    /// Load the offset, then draw and flush the first frame.
    ///
    /// A failed persistence read is logged and the default offset used.
    pub fn start(&mut self) -> Result<(), RuntimeError> {
        let loaded = self
            .app
            .start(&mut self.persist, self.clock.now(), self.clock.is_24h_style())?;
        match loaded.source {
            LoadSource::Persisted => {
                tracing::info!(offset_minutes = loaded.value, "offset loaded");
            }
            LoadSource::Default => {
                tracing::info!(offset_minutes = loaded.value, "no stored offset, using default");
            }
            LoadSource::ReadFailed(e) => {
                tracing::warn!(
                    offset_minutes = loaded.value,
                    reason = %e,
                    "offset read failed, using default"
                );
            }
        }

        let frame = self.app.frame().clone();
        self.draw(&frame)?;
        self.display.mark_dirty(layout::BACKGROUND);
        self.display.flush()?;
        tracing::debug!(cursor_x = frame.cursor_x, "first frame drawn");
        Ok(())
    }

    /// Dispatch one event and redraw if the frame changed.
    pub fn handle(&mut self, event: WatchEvent) -> Result<Control, RuntimeError> {
        match event {
            WatchEvent::Tick(at) => tracing::debug!(utc_seconds = at.utc_seconds, "tick"),
            WatchEvent::OffsetReceived(minutes) => {
                tracing::info!(offset_minutes = minutes, "offset received");
            }
            WatchEvent::InboxDropped(reason) => {
                tracing::error!(reason = %reason, "inbox message dropped");
            }
            WatchEvent::OutboxSent => tracing::debug!("outbox message sent"),
            WatchEvent::OutboxFailed(reason) => {
                tracing::error!(reason = %reason, "outbox message failed");
            }
            WatchEvent::ShutdownRequested => tracing::info!("shutdown requested"),
        }

        let before = self.app.frame().clone();
        let outcome = self
            .app
            .dispatch(event, self.clock.now(), self.clock.is_24h_style())?;
        match outcome {
            Outcome::Redraw(frame) => {
                self.redraw(&before, &frame)?;
                Ok(Control::Continue)
            }
            Outcome::Idle => Ok(Control::Continue),
            Outcome::Exit => Ok(Control::Exit),
        }
    }

    /// Write the offset back. Returns the persisted value.
    pub fn shutdown(&mut self) -> Result<i32, RuntimeError> {
        match self.app.finish(&mut self.persist) {
            Ok(value) => {
                tracing::info!(offset_minutes = value, "offset saved");
                Ok(value)
            }
            Err(e) => {
                tracing::error!(reason = %e, "offset save failed");
                Err(e.into())
            }
        }
    }

    /// Start, handle events until shutdown is requested, then persist.
    ///
    /// Display failures while handling an event are logged and the loop
    /// carries on; the next redraw repaints the whole frame region anyway.
    pub async fn run<M: RawMutex, const N: usize>(
        &mut self,
        events: Receiver<'_, M, WatchEvent, N>,
    ) -> Result<i32, RuntimeError> {
        self.start()?;
        loop {
            let event = events.receive().await;
            match self.handle(event) {
                Ok(Control::Continue) => {}
                Ok(Control::Exit) => break,
                Err(RuntimeError::Display(e)) => {
                    tracing::error!(reason = %e, "redraw failed");
                }
                Err(e) => return Err(e),
            }
        }
        self.shutdown()
    }

    /// Application state.
    pub fn app(&self) -> &WatchfaceApp {
        &self.app
    }

    /// Display collaborator.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Persistence collaborator.
    pub fn persist(&self) -> &P {
        &self.persist
    }

    /// Clock collaborator.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Give the collaborators back.
    pub fn into_parts(self) -> (D, P, C) {
        (self.display, self.persist, self.clock)
    }

    fn draw(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        render_frame(&mut self.display, frame, self.background.as_ref())
    }

    /// Draw `frame` and mark only what changed relative to `before`.
    fn redraw(&mut self, before: &Frame, frame: &Frame) -> Result<(), DisplayError> {
        self.draw(frame)?;
        if before.text == frame.text {
            self.display.mark_dirty(cursor_frame(before.cursor_x));
            self.display.mark_dirty(cursor_frame(frame.cursor_x));
        } else {
            self.display.mark_dirty(layout::BACKGROUND);
        }
        self.display.flush()?;
        tracing::debug!(cursor_x = frame.cursor_x, "frame redrawn");
        Ok(())
    }
}

/// Queue the offsets carried by a received dictionary.
///
/// Non-blocking. Returns how many events were queued; offsets that do not
/// fit in the channel are dropped with a warning.
pub fn inbox_received<M: RawMutex, const N: usize>(
    events: Sender<'_, M, WatchEvent, N>,
    message: &AppMessage,
) -> usize {
    let mut queued = 0usize;
    for event in events_from_inbox(message) {
        if events.try_send(event).is_ok() {
            queued = queued.saturating_add(1);
        } else {
            tracing::warn!(?event, "event queue full, offset dropped");
        }
    }
    queued
}
