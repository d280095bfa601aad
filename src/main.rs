//! # chatledger CLI
//!
//! Command-line interface for the chatledger library.

use std::fs;
use std::process;
use std::time::Instant;

use chrono::Utc;
use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatledger::cli::Args;
use chatledger::format::{OutputFormat, write_to_format};
use chatledger::ingest::{export_report, ingest_upload};
use chatledger::store::MemoryStore;
use chatledger::{ChatLogParser, LedgerError};

/// Exit status when `--strict` is set and issues were recorded.
const EXIT_ISSUES: i32 = 2;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(&args);

    match run(&args) {
        Ok(issues) if args.strict && issues > 0 => {
            eprintln!("⚠️  {issues} parsing issue(s) recorded (--strict)");
            process::exit(EXIT_ISSUES);
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the pipeline and returns the number of issues recorded.
fn run(args: &Args) -> Result<usize, LedgerError> {
    let total_start = Instant::now();
    let format: OutputFormat = args.format.into();

    println!("📒 chatledger v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("📄 Format:  {}", format);
    println!();

    let bytes = fs::read(&args.input).map_err(|e| LedgerError::read(&args.input, e))?;
    let filename = args
        .input
        .file_name()
        .map_or_else(|| args.input.display().to_string(), |n| n.to_string_lossy().into_owned());

    println!("⏳ Reconstructing messages...");
    let parse_start = Instant::now();
    let mut store = MemoryStore::new();
    let parser = ChatLogParser::with_config(args.parser_config());
    let summary = ingest_upload(&mut store, &filename, &bytes, &parser)?;
    println!(
        "   Found {} messages and {} issues ({:.2}s)",
        summary.message_count,
        summary.issue_count,
        parse_start.elapsed().as_secs_f64()
    );

    let report = export_report(&store, summary.upload.id, Utc::now())?;
    let output_path = args.output_path(&summary.upload);

    println!("💾 Writing {}...", format);
    let written = write_to_format(&report, &output_path, format, &args.output_config())?;

    println!();
    println!("✅ Done! Report saved to:");
    for path in &written {
        println!("   {}", path.display());
    }

    let stats = &report.summary.stats;
    println!();
    println!("📊 Summary:");
    println!("   Messages:      {}", stats.total_messages);
    println!("   Multi-line:    {}", stats.multiline_messages);
    println!("   Issues:        {}", stats.total_issues);
    println!();
    println!("🔎 Reliability:");
    println!("   ✓ Verified:      {}", stats.by_reliability.verified);
    println!("   ◐ Likely:        {}", stats.by_reliability.likely);
    println!("   ⚠ Needs Review:  {}", stats.by_reliability.needs_review);
    println!("   ✗ Unverifiable:  {}", stats.by_reliability.unverifiable);
    println!(
        "   Unparsed timestamps: {} ({:.1}% coverage)",
        stats.unparsed_timestamps,
        stats.timestamp_coverage()
    );

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(summary.issue_count)
}
