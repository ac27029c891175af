//! xtask emulate - run the terminal emulator
//!
//! Without `--watch` the emulator runs in the foreground: type offsets (in
//! minutes) on stdin, Ctrl-C to shut down.
//!
//! With `--watch` it is a kill-and-restart loop:
//! 1. Build and spawn the `watchface_emulator` example
//! 2. Watch the crate sources for .rs/.toml changes
//! 3. On change: kill the process, rebuild, restart
//!
//! The persistence file outlives restarts, so the last offset saved by an
//! orderly shutdown is restored. A kill skips the shutdown write.

use anyhow::{Context, Result};
use colored::Colorize;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use platform::config;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

pub struct Options {
    pub persist_path: Option<PathBuf>,
    pub twelve_hour: bool,
    pub watch: bool,
}

/// Sources whose changes restart the emulator.
const WATCH_PATHS: &[&str] = &[
    "crates/firmware/src",
    "crates/firmware/examples",
    "crates/firmware/Cargo.toml",
    "crates/platform/src",
    "crates/watchface/src",
    "crates/watchface-render/src",
];

pub fn run(options: &Options) -> Result<()> {
    clear_screen();
    print_banner();

    if !options.watch {
        let status = emulator_command(options)
            .status()
            .context("Failed to run cargo")?;
        if !status.success() {
            anyhow::bail!("Emulator exited with code: {:?}", status.code());
        }
        return Ok(());
    }

    println!("{}", "Starting watch mode".bold());
    println!("{}", format!("Watching: {}", WATCH_PATHS.join(", ")).dimmed());
    println!();

    let mut emulator_process = match start_emulator(options) {
        Ok(process) => Some(process),
        Err(e) => {
            eprintln!("{}", format!("Build failed: {e}").red().bold());
            eprintln!("{}", "Fix errors and save to trigger rebuild".dimmed());
            println!();
            None
        }
    };

    let (tx, rx) = channel();
    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
                    && event.paths.iter().any(|p| {
                        p.extension()
                            .is_some_and(|ext| ext == "rs" || ext == "toml")
                    })
                {
                    let _ = tx.send(());
                }
            }
        },
        notify::Config::default(),
    )?;

    for path in WATCH_PATHS.iter().map(Path::new) {
        if path.exists() {
            watcher
                .watch(path, RecursiveMode::Recursive)
                .with_context(|| format!("Failed to watch path: {}", path.display()))?;
        }
    }

    println!("{}", "Save any .rs or .toml file to restart".dimmed());
    println!("{}", "Press Ctrl+C to stop".dimmed());
    println!();

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(()) => {
                // Debounce bursts of file events from a single save
                if last_rebuild.elapsed() < Duration::from_millis(500) {
                    continue;
                }
                std::thread::sleep(Duration::from_millis(200));
                while rx.try_recv().is_ok() {}
                last_rebuild = Instant::now();

                if let Some(mut process) = emulator_process.take() {
                    let _ = process.kill();
                    let _ = process.wait();
                }

                clear_screen();
                print_banner();
                println!("{}", "Changes detected - rebuilding...".yellow().bold());
                println!();

                match start_emulator(options) {
                    Ok(process) => {
                        emulator_process = Some(process);

                        #[cfg(feature = "notifications")]
                        {
                            let _ = notify_rust::Notification::new()
                                .summary(config::APP_NAME)
                                .body("Emulator restarted")
                                .timeout(2000)
                                .show();
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", format!("Build failed: {e}").red().bold());
                        println!("{}", "Fix errors and save to trigger rebuild".dimmed());
                        println!();
                    }
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                if let Some(process) = emulator_process.as_mut() {
                    if let Ok(Some(status)) = process.try_wait() {
                        println!();
                        println!(
                            "{}",
                            format!("Emulator exited with code: {:?}", status.code()).yellow()
                        );
                        println!("{}", "Waiting for changes...".dimmed());
                        println!();
                        emulator_process = None;
                    }
                }
            }
            Err(e) => {
                eprintln!("Watcher error: {e}");
                break;
            }
        }
    }

    if let Some(mut process) = emulator_process {
        let _ = process.kill();
        let _ = process.wait();
    }

    Ok(())
}

fn emulator_command(options: &Options) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args([
        "run",
        "-p",
        "firmware",
        "--example",
        "watchface_emulator",
        "--features",
        "emulator",
    ]);
    if let Some(path) = &options.persist_path {
        cmd.env("WATCHFACE_PERSIST_PATH", path);
    }
    if options.twelve_hour {
        cmd.env("WATCHFACE_CLOCK_24H", "false");
    }
    if std::env::var("RUST_LOG").is_err() {
        cmd.env("RUST_LOG", "firmware=info");
    }
    cmd
}

fn start_emulator(options: &Options) -> Result<Child> {
    let start = Instant::now();
    let child = emulator_command(options)
        .spawn()
        .context("Failed to spawn emulator")?;
    println!(
        "{}",
        format!("Started in {:.1}s", start.elapsed().as_secs_f64()).green()
    );
    Ok(child)
}

fn clear_screen() {
    // ANSI escape code to clear screen and move cursor to top-left
    print!("\x1B[2J\x1B[1;1H");
    io::stdout().flush().ok();
}

fn print_banner() {
    let banner_text = format!("     {}     ", config::dev_banner());
    println!("{}", "═════════════════════════════════════════════".cyan());
    println!("{}", banner_text.cyan().bold());
    println!("{}", "═════════════════════════════════════════════".cyan());
    println!();
}
