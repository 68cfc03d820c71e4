#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # scorecard
//!
//! Command-line front end for the report synthesis library: reads a file
//! of grading output (raw text or a structured JSON reply), derives score
//! records, and writes an exportable report in the requested format.

use std::fs;

use anyhow::{Context, Result};
use bpaf::*;
use colored::Colorize;
use dotenvy::dotenv;
use scorecard::{ExportFormat, ExportRequest, config, export, load_records, overview_table};
use tracing::{Level, info, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Export a grading output file in one format
    Export(ExportFormat, Option<String>, String),
    /// Print the score overview for a grading output file
    Inspect(String),
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses the input path
    fn i() -> impl Parser<String> {
        positional("INPUT").help("Path to a raw grading output or structured JSON reply")
    }

    /// parses the export format
    fn f() -> impl Parser<ExportFormat> {
        long("format")
            .short('f')
            .help("Export format: txt, html, doc, or xlsx")
            .argument::<ExportFormat>("FORMAT")
    }

    /// parses the optional report title
    fn t() -> impl Parser<Option<String>> {
        long("title")
            .short('t')
            .help("Report title used in headings and filenames")
            .argument::<String>("TITLE")
            .optional()
    }

    let export = construct!(Cmd::Export(f(), t(), i()))
        .to_options()
        .command("export")
        .help("Render a grading output file into an exportable report");

    let inspect = construct!(Cmd::Inspect(i()))
        .to_options()
        .command("inspect")
        .help("Parse a grading output file and print the score overview");

    let cmd = construct!([export, inspect]);

    cmd.to_options().descr("Report synthesis for grading output").run()
}

fn main() -> Result<()> {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    match options() {
        Cmd::Export(format, title, input) => run_export(&input, format, title),
        Cmd::Inspect(input) => run_inspect(&input),
    }
}

/// Reads the input, derives score records, and writes the export payload
/// into the configured output directory.
fn run_export(input: &str, format: ExportFormat, title: Option<String>) -> Result<()> {
    let raw = fs::read_to_string(input).with_context(|| format!("Could not read `{input}`"))?;
    let (records, summary) = load_records(&raw);
    if let Some(summary) = summary {
        info!(summary = summary.as_str(), "grading summary");
    }

    let env = config::export_env();
    let title = title.unwrap_or_else(|| env.default_title().to_string());
    let request = ExportRequest::builder()
        .records(records)
        .raw_text(raw)
        .title(title)
        .build();

    match export(&request, format)? {
        Some(payload) => {
            let path = env.output_dir().join(&payload.file_name);
            fs::write(&path, &payload.bytes)
                .with_context(|| format!("Could not write {}", path.display()))?;
            println!(
                "{} {} ({})",
                "Exported".green().bold(),
                path.display(),
                payload.media_type
            );
        }
        None => println!("{}", "Nothing to export.".yellow()),
    }

    Ok(())
}

/// Reads the input and prints the ranked overview table.
fn run_inspect(input: &str) -> Result<()> {
    let raw = fs::read_to_string(input).with_context(|| format!("Could not read `{input}`"))?;
    let (records, summary) = load_records(&raw);

    if records.is_empty() {
        println!("{}", "No scores recognized in the input.".yellow());
        return Ok(());
    }

    eprintln!("{}", overview_table(&records));
    if let Some(summary) = summary {
        println!("Summary: {summary}");
    }
    Ok(())
}
