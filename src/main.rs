//! # chatgram CLI
//!
//! Command-line interface for the chatgram library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatgram::ChatgramError;
use chatgram::cli::Args;
use chatgram::core::histogram::effective_unit;
use chatgram::dataset::Dataset;
use chatgram::format::{OutputFormat, write_to_format};

fn main() {
    let args = <Args as ClapParser>::parse();
    chatgram::logging::init(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ChatgramError> {
    let total_start = Instant::now();

    // Validate arguments before touching the input
    let config = args.histogram_config();
    let range = args.date_range()?;
    let selection = args.selection();
    let output_path = args.output_path();
    let format: OutputFormat = args.format.into();

    println!("📊 chatgram v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    if !args.summary {
        println!("💾 Output:  {}", output_path);
        println!("📄 Format:  {}", format);
    }
    println!();

    // Step 1: Import
    println!("⏳ Importing...");
    let import_start = Instant::now();
    let mut dataset = Dataset::new();
    let report = dataset.import_file(&args.input)?;
    println!(
        "   Found {} chats, {} messages ({:.2}s)",
        report.chats,
        report.included,
        import_start.elapsed().as_secs_f64()
    );
    println!(
        "   Skipped {} records ({} service, {} without text, {} from deleted accounts)",
        report.discarded(),
        report.not_a_message,
        report.empty_content,
        report.deleted_sender
    );

    let snapshot = dataset.snapshot();
    match snapshot.bounds() {
        Some(bounds) => println!("📅 Span:    {} → {}", bounds.earliest, bounds.latest),
        None => println!("📅 Span:    (no messages)"),
    }

    let Some((lower, upper)) = range.resolve(snapshot.bounds()) else {
        println!();
        println!("⚠️  Nothing to count: the export has no messages and no --from/--to range was given");
        return Ok(());
    };
    println!(
        "📏 Unit:    {}",
        effective_unit(&config, lower, upper)
    );

    if args.summary {
        return Ok(());
    }

    // Step 2: Count
    println!();
    println!("🔢 Building histograms...");
    let series = snapshot.all_series(&config, &range, &selection);
    if series.is_empty() && !args.chats.is_empty() {
        println!("⚠️  No chat matched --chat {}", args.chats.join(", --chat "));
    }
    let total: u64 = series.iter().map(|s| s.total()).sum();
    println!("   {} series, {} messages in range", series.len(), total);

    // Step 3: Write output in selected format
    println!("💾 Writing {}...", format);
    write_to_format(&series, &output_path, format)?;

    println!();
    println!("✅ Done! Output saved to {}", output_path);
    println!(
        "   Total time:  {:.2}s",
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}
