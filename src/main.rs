//! # chatstat CLI
//!
//! Command-line front end for the chatstat library.

use std::process;
use std::time::Instant;

use chrono::Local;
use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatstat::ChatstatError;
use chatstat::archive::is_archive;
use chatstat::cli::Args;
use chatstat::config::{ChartConfig, TableConfig};
use chatstat::core::Granularity;
use chatstat::render::{render_table, write_svg};
use chatstat::session::Session;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ChatstatError> {
    let total_start = Instant::now();
    let granularity: Granularity = args.mode.into();
    let now = args.now.unwrap_or_else(|| Local::now().naive_local());

    // Print header
    println!("📊 chatstat v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    if is_archive(&args.input) {
        println!("🗜️  Archive: reading first .txt entry");
    }
    println!("📅 Mode:    {}", granularity);
    if args.now.is_some() {
        println!("🕒 Now:     {}", now.format("%Y-%m-%d"));
    }
    println!();

    let mut session = Session::new();
    session.set_granularity(granularity);

    println!("⏳ Parsing...");
    let parse_start = Instant::now();
    let record_count = session.load(&args.input)?.records().len();
    println!(
        "   Found {} messages ({:.2}s)",
        record_count,
        parse_start.elapsed().as_secs_f64()
    );

    let table = session.analyze(now)?;

    println!();
    let table_config = TableConfig::new().with_totals(!args.no_totals);
    print!("{}", render_table(&table, &table_config));

    if let Some(ref chart_path) = args.chart {
        let mut chart_config = ChartConfig::new();
        if let Some(ref title) = args.title {
            chart_config = chart_config.with_title(title.clone());
        }
        println!();
        println!("🎨 Writing chart...");
        write_svg(&table, chart_path, &chart_config)?;
        println!("   Saved to {}", chart_path.display());
    }

    // Summary
    println!();
    println!("✅ Summary:");
    println!("   Messages:     {}", table.total());
    println!("   Participants: {}", table.column_count());
    println!("   Periods:      {}", table.row_count());
    println!(
        "   Total time:   {:.2}s",
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}
