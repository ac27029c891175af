use anyhow::Result;
use colored::Colorize;

use crate::step::{OnFailure, Step};

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building documentation...".cyan().bold());
    println!();

    let mut args = vec![
        "doc",
        "--workspace",
        "--no-deps",
        "--document-private-items",
        "--features",
        "firmware/emulator",
    ];
    if open {
        args.push("--open");
    }

    Step {
        label: "Documentation",
        args: &args,
        on_failure: OnFailure::Fail,
    }
    .run()?;

    if !open {
        println!(
            "   {}",
            "Open target/doc/watchface/index.html in your browser".dimmed()
        );
        println!("   {}", "Or run 'cargo xtask doc --open'".dimmed());
        println!();
    }

    Ok(())
}
