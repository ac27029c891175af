//! Runtime integration tests: full event loop over an embassy-sync channel.
//!
//! Drives `Runtime::run` with mock collaborators and checks startup,
//! in-order event handling and the single write at shutdown.
//!
//! Run with: cargo test -p firmware --test integration_runtime

#![allow(clippy::unwrap_used, clippy::panic, clippy::cast_possible_truncation)]

use std::time::Duration;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use firmware::{inbox_received, minute_ticks, Runtime, EVENT_QUEUE_DEPTH};
use platform::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH, TIME_OFFSET_KEY};
use platform::mocks::{MockClock, MockDisplay, MockPersist};
use platform::persist_local::LocalPersist;
use platform::{AppMessage, AppMessageResult, Clock, Persist, Tuple};
use watchface::{compute_cursor_x, WatchEvent};

type Events = Channel<NoopRawMutex, WatchEvent, EVENT_QUEUE_DEPTH>;

fn display() -> MockDisplay {
    MockDisplay::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
}

fn offset_message(minutes: i32) -> AppMessage {
    let mut message = AppMessage::new();
    message.push(Tuple::int(TIME_OFFSET_KEY.get(), minutes)).unwrap();
    message
}

// ---------------------------------------------------------------------------
// Test: run handles queued events in order and persists the last offset
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_run_persists_last_offset_on_shutdown() {
    let events = Events::new();
    inbox_received(events.sender(), &offset_message(60));
    events.try_send(WatchEvent::InboxDropped(AppMessageResult::Busy)).unwrap();
    inbox_received(events.sender(), &offset_message(-120));
    events.try_send(WatchEvent::ShutdownRequested).unwrap();

    let mut runtime = Runtime::new(display(), MockPersist::new(), MockClock::at(0));
    let saved = runtime.run(events.receiver()).await.unwrap();

    assert_eq!(saved, -120);
    assert_eq!(runtime.persist().writes(), 1);
    assert_eq!(runtime.persist().peek(TIME_OFFSET_KEY), Some(-120));
    assert_eq!(runtime.app().cursor_x(), compute_cursor_x(0, -120));
    // first frame + two offset redraws
    assert_eq!(runtime.display().flush_count(), 3);
}

// ---------------------------------------------------------------------------
// Test: events after shutdown stay queued
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_run_stops_at_shutdown() {
    let events = Events::new();
    events.try_send(WatchEvent::ShutdownRequested).unwrap();
    inbox_received(events.sender(), &offset_message(30));

    let mut runtime = Runtime::new(display(), MockPersist::new(), MockClock::at(0));
    assert_eq!(runtime.run(events.receiver()).await.unwrap(), 0);
    assert_eq!(events.try_receive().unwrap(), WatchEvent::OffsetReceived(30));
}

// ---------------------------------------------------------------------------
// Test: offset survives a restart through the file-backed store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_offset_survives_restart() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("watchface.bin");

    {
        let events = Events::new();
        inbox_received(events.sender(), &offset_message(i32::MIN));
        events.try_send(WatchEvent::ShutdownRequested).unwrap();
        let persist = LocalPersist::open(&path).unwrap();
        let mut runtime = Runtime::new(display(), persist, MockClock::at(0));
        runtime.run(events.receiver()).await.unwrap();
    }

    let mut reopened = LocalPersist::open(&path).unwrap();
    assert_eq!(reopened.read_int(TIME_OFFSET_KEY).unwrap(), Some(i32::MIN));

    let mut runtime = Runtime::new(display(), reopened, MockClock::at(0));
    runtime.start().unwrap();
    assert_eq!(runtime.app().offset(), Some(i32::MIN));
}

// ---------------------------------------------------------------------------
// Test: a corrupt persistence file falls back to the default and is replaced
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_corrupt_file_starts_with_default_offset() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("watchface.bin");
    std::fs::write(&path, b"garbage").unwrap();

    let events = Events::new();
    events.try_send(WatchEvent::ShutdownRequested).unwrap();
    let persist = LocalPersist::open(&path).unwrap();
    assert!(persist.is_corrupt());

    let mut runtime = Runtime::new(display(), persist, MockClock::at(0));
    assert_eq!(runtime.run(events.receiver()).await.unwrap(), 0);
    assert_eq!(runtime.app().offset(), Some(0));
    assert!(!runtime.persist().is_corrupt());

    let mut reopened = LocalPersist::open(&path).unwrap();
    assert!(!reopened.is_corrupt());
    assert_eq!(reopened.read_int(TIME_OFFSET_KEY).unwrap(), Some(0));
}

// ---------------------------------------------------------------------------
// Test: tick redraws the clock text from the tick's own reading
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_tick_updates_text() {
    let events = Events::new();
    let tick_at = MockClock::at(16 * 3_600 + 5 * 60).now();
    events.try_send(WatchEvent::Tick(tick_at)).unwrap();
    events.try_send(WatchEvent::ShutdownRequested).unwrap();

    let mut runtime = Runtime::new(display(), MockPersist::new(), MockClock::at(0));
    runtime.run(events.receiver()).await.unwrap();
    assert_eq!(runtime.app().frame().text.time, "16:05");
    assert_eq!(runtime.app().cursor_x(), compute_cursor_x(tick_at.utc_seconds, 0));
}

// ---------------------------------------------------------------------------
// Test: minute_ticks fires at the next minute boundary
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_minute_ticks_emits_tick() {
    let events = Events::new();
    // One second before a boundary, so the first tick is ~1 s away.
    let clock = MockClock::at(59);

    let received = tokio::time::timeout(
        Duration::from_secs(5),
        select(minute_ticks(&clock, events.sender()), events.receive()),
    )
    .await
    .unwrap();

    match received {
        Either::Second(WatchEvent::Tick(at)) => assert_eq!(at.utc_seconds, 59),
        Either::Second(other) => panic!("expected a tick, got {other:?}"),
        Either::First(()) => panic!("tick source stopped"),
    }
}
