//! # chatshift CLI
//!
//! Command-line interface for the chatshift library.

use std::process;
use std::time::Instant;

use chrono::Utc;
use clap::Parser as ClapParser;

use chatshift::cli::Args;
use chatshift::filter::{ExportFilter, apply_filter};
use chatshift::naming::name_file;
use chatshift::output::{write_export, write_stats};
use chatshift::raw::{NullResolver, RawChat, normalize_all};
use chatshift::render::render;
use chatshift::stats::aggregate;
use chatshift::template::FormatTemplate;
use chatshift::{ChatshiftError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    // Build the filter up front so input errors surface before any work
    let filter = build_filter(&args)?;
    let template = build_template(&args)?;

    // Print header
    println!("💬 chatshift v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("🎨 Style:   {}", args.style);
    if let Some(ref start) = args.start_date {
        println!("📅 From:    {}", start);
    }
    if let Some(ref end) = args.end_date {
        println!("📅 To:      {}", end);
    }
    if args.no_media {
        println!("🖼️  Media:   excluded");
    } else if let Some(ref kinds) = args.media {
        let names: Vec<_> = kinds.iter().map(|k| k.to_string()).collect();
        println!("🖼️  Media:   {}", names.join(", "));
    }
    println!();

    // Step 1: Read the retrieved-message dump
    println!("⏳ Reading dump...");
    let read_start = Instant::now();
    let chat = RawChat::from_json_file(&args.input)?;
    let retrieved = chat.messages.len();
    println!(
        "   Found {} messages in '{}' ({:.2}s)",
        retrieved,
        chat.name,
        read_start.elapsed().as_secs_f64()
    );

    // Step 2: Normalize into chronological order
    let mut messages = normalize_all(&chat.messages, &NullResolver);

    // Step 3: Limit to the most recent N, keeping reading order
    if args.limit > 0 && messages.len() > args.limit {
        messages.drain(..messages.len() - args.limit);
        println!("✂️  Limited to the {} most recent messages", args.limit);
    }

    // Step 4: Filter
    let filtered = apply_filter(messages, &filter);
    let exported = filtered.len();
    println!("🔍 {} messages after filtering", exported);

    // Step 5: Render
    println!("📝 Formatting messages...");
    let text = render(&filtered, &template);

    // Step 6: Write output
    let output_path = args.output.clone().unwrap_or_else(|| {
        let stem = name_file(
            &chat.name,
            Utc::now().date_naive(),
            args.name_template.as_deref(),
        );
        format!("{stem}.txt")
    });
    write_export(&output_path, &text)?;

    // Step 7: Optional statistics sibling
    if args.stats {
        let stats = aggregate(&filtered);
        let stats_file = write_stats(&output_path, &stats, &chat.name)?;
        println!("📊 Statistics saved to {}", stats_file.display());
    }

    println!();
    println!("✅ Export complete! Saved to {}", output_path);

    // Summary
    println!();
    println!("📊 Summary:");
    println!("   Retrieved: {} messages", retrieved);
    println!("   Exported:  {} messages", exported);
    println!(
        "   Total time: {:.2}s",
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Builds the export filter from CLI arguments, rejecting bad input before
/// the dump is even read.
fn build_filter(args: &Args) -> Result<ExportFilter> {
    let mut filter = ExportFilter::new();

    if let Some(ref start) = args.start_date {
        filter = filter.with_start_date(start)?;
    }
    if let Some(ref end) = args.end_date {
        filter = filter.with_end_date(end)?;
    }
    if args.no_media {
        filter = filter.without_media();
    } else if let Some(ref kinds) = args.media {
        filter = filter.with_media_kinds(kinds.iter().copied());
    }

    filter.validate()?;
    Ok(filter)
}

/// Resolves the format template: a built-in style, or a validated custom
/// pattern.
fn build_template(args: &Args) -> Result<FormatTemplate> {
    match args.style.template() {
        Some(template) => Ok(template),
        None => {
            let pattern = args
                .pattern
                .as_deref()
                .ok_or(ChatshiftError::MissingPattern)?;
            FormatTemplate::custom(pattern, &args.date_format, &args.time_format)
        }
    }
}
