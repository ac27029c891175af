use anyhow::Result;

use crate::step::{run_all, OnFailure, Step};

/// Embedded target the `no_std` crates must build for.
const EMBEDDED_TARGET: &str = "thumbv7em-none-eabihf";

pub fn run() -> Result<()> {
    run_all(
        "🔍 Checking watchface builds...",
        &[
            Step {
                label: "Checking no_std cores",
                args: &[
                    "check",
                    "-p",
                    "platform",
                    "-p",
                    "watchface",
                    "-p",
                    "watchface-render",
                    "-p",
                    "firmware",
                    "--target",
                    EMBEDDED_TARGET,
                ],
                on_failure: OnFailure::Fail,
            },
            Step {
                label: "Checking emulator build",
                args: &["check", "-p", "firmware", "--features", "emulator", "--all-targets"],
                on_failure: OnFailure::Fail,
            },
            Step {
                label: "Running clippy lints",
                args: &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
                on_failure: OnFailure::Warn,
            },
            Step {
                label: "Checking code formatting",
                args: &["fmt", "--all", "--check"],
                on_failure: OnFailure::Warn,
            },
        ],
    )
}
