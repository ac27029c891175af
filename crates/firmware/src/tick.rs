//! Minute tick source.
//!
//! Sleeps until the next wall-clock minute boundary and emits a
//! [`WatchEvent::Tick`] carrying the reading taken when it woke.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;
use embassy_time::Timer;

use platform::Clock;
use watchface::WatchEvent;

const SECONDS_PER_MINUTE: i64 = 60;

/// Seconds from `utc_seconds` to the next minute boundary, in `1..=60`.
///
/// Exactly on a boundary the next tick is a full minute away.
pub fn next_tick_delay(utc_seconds: i64) -> u64 {
    let into_minute = utc_seconds.rem_euclid(SECONDS_PER_MINUTE);
    u64::try_from(SECONDS_PER_MINUTE.saturating_sub(into_minute)).unwrap_or(60)
}

/// Emit one tick per minute boundary, forever.
///
/// Blocks (asynchronously) when the channel is full, so ticks are never
/// dropped; they are only delayed behind the events already queued.
pub async fn minute_ticks<C: Clock, M: RawMutex, const N: usize>(
    clock: &C,
    events: Sender<'_, M, WatchEvent, N>,
) {
    loop {
        let delay = next_tick_delay(clock.now().utc_seconds);
        Timer::after_secs(delay).await;
        let now = clock.now();
        tracing::trace!(utc_seconds = now.utc_seconds, "minute boundary");
        events.send(WatchEvent::Tick(now)).await;
    }
}
