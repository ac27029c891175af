// Desktop/tooling crate: unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod doc;
mod emulate;
mod step;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "World-time watchface development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the watchface in the terminal emulator
    Emulate {
        /// Persistence file (WATCHFACE_PERSIST_PATH)
        #[arg(long)]
        persist_path: Option<std::path::PathBuf>,
        /// Use a 12-hour clock (WATCHFACE_CLOCK_24H=false)
        #[arg(long)]
        twelve_hour: bool,
        /// Rebuild and restart on source changes
        #[arg(long)]
        watch: bool,
    },
    /// Check no_std cores, the emulator build, clippy and formatting
    Check,
    /// Run all tests (unit, integration, emulator and doc)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Build and optionally open documentation
    Doc {
        /// Open documentation in browser
        #[arg(long)]
        open: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Emulate {
            persist_path,
            twelve_hour,
            watch,
        } => emulate::run(&emulate::Options {
            persist_path,
            twelve_hour,
            watch,
        }),
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
        Commands::Doc { open } => doc::run(open),
    }
}
