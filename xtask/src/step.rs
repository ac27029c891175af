//! One `cargo` invocation with timed, colored reporting.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::{Command, Output};
use std::time::Instant;

/// What a failing step does to the task.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Stop the task with an error
    Fail,
    /// Print a warning and carry on
    Warn,
}

pub struct Step<'a> {
    pub label: &'a str,
    pub args: &'a [&'a str],
    pub on_failure: OnFailure,
}

impl Step<'_> {
    /// Run the step. Returns the captured output when it succeeded.
    pub fn run(&self) -> Result<Option<Output>> {
        println!("{}", format!("  {}...", self.label).cyan());
        let start = Instant::now();

        let output = Command::new("cargo")
            .args(self.args)
            .output()
            .with_context(|| format!("Failed to run cargo {}", self.args.join(" ")))?;

        if output.status.success() {
            let summary = extract_test_summary(&String::from_utf8_lossy(&output.stdout));
            println!(
                "{}",
                format!(
                    "  ✓ {} passed{} in {:.2}s",
                    self.label,
                    summary.map(|s| format!(" ({s})")).unwrap_or_default(),
                    start.elapsed().as_secs_f64()
                )
                .green()
            );
            println!();
            return Ok(Some(output));
        }

        match self.on_failure {
            OnFailure::Fail => {
                eprintln!("{}", format!("  ✗ {} failed", self.label).red().bold());
                eprintln!();
                eprintln!("{}", String::from_utf8_lossy(&output.stdout));
                eprintln!("{}", String::from_utf8_lossy(&output.stderr));
                anyhow::bail!("{} failed", self.label);
            }
            OnFailure::Warn => {
                eprintln!("{}", format!("  ⚠ {} reported problems", self.label).yellow().bold());
                eprintln!();
                eprintln!("{}", String::from_utf8_lossy(&output.stderr));
                println!();
                Ok(None)
            }
        }
    }
}

/// Run `steps` in order, stopping at the first fatal failure.
pub fn run_all(title: &str, steps: &[Step<'_>]) -> Result<()> {
    println!();
    println!("{}", title.cyan().bold());
    println!();

    let total_start = Instant::now();
    for step in steps {
        step.run()?;
    }

    println!(
        "{}",
        format!("✓ All steps completed in {:.2}s", total_start.elapsed().as_secs_f64())
            .green()
            .bold()
    );
    println!();
    Ok(())
}

fn extract_test_summary(output: &str) -> Option<String> {
    // Lines like "test result: ok. 5 passed; 0 failed; 0 ignored; 0 measured; 0 filtered out"
    let passed: u64 = output
        .lines()
        .filter_map(|line| line.split("test result:").nth(1))
        .filter_map(|rest| rest.split(';').next())
        .filter_map(|first| first.split_whitespace().rev().nth(1))
        .filter_map(|n| n.parse::<u64>().ok())
        .sum();
    (passed > 0).then(|| format!("{passed} tests"))
}

#[cfg(test)]
mod tests {
    use super::extract_test_summary;

    #[test]
    fn summary_sums_all_result_lines() {
        let out = "test result: ok. 5 passed; 0 failed; 0 ignored\n\
                   noise\n\
                   test result: ok. 7 passed; 0 failed; 0 ignored\n";
        assert_eq!(extract_test_summary(out).as_deref(), Some("12 tests"));
    }

    #[test]
    fn summary_absent_without_results() {
        assert_eq!(extract_test_summary("Finished dev profile"), None);
    }
}
