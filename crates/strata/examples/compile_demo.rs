//! Compile a small class list and print the resulting stylesheet.
//!
//! Run with `cargo run --example compile_demo`.

use strata::prelude::*;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let compiler = compile(
        "@theme { --color-mint-500: oklch(0.72 0.11 178); }",
        Options::default(),
    )?;

    let classes = [
        "flex",
        "items-center",
        "gap-2",
        "p-4",
        "hover:bg-mint-500/50",
        "sm:dark:text-white",
        "-mt-2",
        "w-1/2",
        "not-a-real-class",
    ];

    let (css, stats) = compiler.build_with_stats(&classes);
    println!("{css}");
    println!(
        "/* {} candidates, {} matched, {} skipped, {} rules */",
        stats.candidates, stats.matched, stats.skipped, stats.rules
    );

    Ok(())
}
