//! World-Time Watchface Emulator
//!
//! Runs the watchface against the host clock and prints the framebuffer to
//! the terminal after every redraw.
//!
//! - Type an integer and press Enter to send it as the companion's offset
//!   (minutes).
//! - Ctrl-C (or end of input) requests an orderly shutdown; the offset is then
//!   persisted and restored on the next run.
//!
//! Run with: cargo run -p firmware --example watchface_emulator --features emulator
//!
//! Logging: RUST_LOG=firmware=debug for per-tick output.

#![allow(clippy::print_stdout)]

use anyhow::Context;
use embassy_futures::select::{select4, Either4};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Sender};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};
use embedded_graphics::primitives::Rectangle;
use tokio::io::{AsyncBufReadExt, BufReader};

use firmware::config::RuntimeConfig;
use firmware::{inbox_received, minute_ticks, FramebufferDisplay, Runtime, SystemClock};
use platform::config::{self, TIME_OFFSET_KEY};
use platform::persist_local::LocalPersist;
use platform::{AppMessage, DisplayDriver, DisplayError, Tuple};
use watchface::WatchEvent;

type Events = Channel<NoopRawMutex, WatchEvent, { firmware::EVENT_QUEUE_DEPTH }>;
type EventSender<'a> = Sender<'a, NoopRawMutex, WatchEvent, { firmware::EVENT_QUEUE_DEPTH }>;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "firmware=info".into()),
        )
        .init();

    let config = RuntimeConfig::from_env()?;
    println!("{} v{} - Emulator", config::APP_NAME, config::APP_VERSION);
    println!("Persisting to {}\n", config.persist_path.display());

    let persist = LocalPersist::open(&config.persist_path)
        .with_context(|| format!("opening {}", config.persist_path.display()))?;
    if persist.is_corrupt() {
        tracing::warn!(
            path = %config.persist_path.display(),
            "persistence file is corrupt, it will be replaced at shutdown"
        );
    }
    let clock = SystemClock::new(config.clock_24h);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let saved = rt.block_on(run(persist, clock))?;
    println!("Offset {saved} min saved. Bye.");
    Ok(())
}

async fn run(persist: LocalPersist, clock: SystemClock) -> anyhow::Result<i32> {
    let events = Events::new();
    let mut runtime = Runtime::new(EchoDisplay(FramebufferDisplay::new()), persist, clock);

    let outcome = select4(
        runtime.run(events.receiver()),
        minute_ticks(&clock, events.sender()),
        companion_from_stdin(events.sender()),
        shutdown_on_ctrl_c(events.sender()),
    )
    .await;

    match outcome {
        Either4::First(result) => Ok(result?),
        Either4::Second(()) | Either4::Third(()) | Either4::Fourth(()) => {
            anyhow::bail!("event source stopped before the runtime")
        }
    }
}

/// Framebuffer that prints itself to the terminal on every flush.
struct EchoDisplay(FramebufferDisplay);

impl DrawTarget for EchoDisplay {
    type Color = BinaryColor;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.0.draw_iter(pixels)
    }
}

impl OriginDimensions for EchoDisplay {
    fn size(&self) -> Size {
        self.0.size()
    }
}

impl DisplayDriver for EchoDisplay {
    fn mark_dirty(&mut self, area: Rectangle) {
        self.0.mark_dirty(area);
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.0.flush()?;
        println!("\x1b[2J\x1b[H{}frame {}", self.0.to_ascii(), self.0.frames());
        Ok(())
    }
}

/// Each integer line becomes a companion message under the offset key.
async fn companion_from_stdin(events: EventSender<'_>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match line.trim().parse::<i32>() {
                Ok(minutes) => {
                    let mut message = AppMessage::new();
                    let _ = message.push(Tuple::int(TIME_OFFSET_KEY.get(), minutes));
                    inbox_received(events, &message);
                }
                Err(_) => println!("expected an offset in minutes, got {line:?}"),
            },
            Ok(None) | Err(_) => break,
        }
    }
    events.send(WatchEvent::ShutdownRequested).await;
    std::future::pending::<()>().await;
}

async fn shutdown_on_ctrl_c(events: EventSender<'_>) {
    if tokio::signal::ctrl_c().await.is_ok() {
        events.send(WatchEvent::ShutdownRequested).await;
    }
    std::future::pending::<()>().await;
}
