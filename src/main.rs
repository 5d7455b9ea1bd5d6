//! archive2md - saved web page to Markdown

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use archive2md::{Archive, Conversion, write_markdown};

#[derive(Parser)]
#[command(name = "archive2md")]
#[command(version, about = "Convert a saved web page archive to portable Markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    archive2md \"Printer offline\"              Write Printer offline/Printer offline.md
    archive2md Thread -o out/thread.md        Write elsewhere; images are copied beside it
    archive2md Thread --json                  Print a conversion report")]
struct Cli {
    /// Archive folder holding one saved .html page and its assets
    #[arg(value_name = "FOLDER")]
    folder: PathBuf,

    /// Markdown file to write [default: FOLDER/<folder name>.md]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Title to use when the page has none [default: folder name]
    #[arg(long, value_name = "TEXT")]
    title: Option<String>,

    /// Print a JSON report instead of the summary line
    #[arg(long)]
    json: bool,

    /// Suppress output messages
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log each rewritten reference and copied file
    #[arg(short, long)]
    verbose: bool,
}

/// Machine-readable summary for `--json`.
#[derive(Serialize)]
struct Report<'a> {
    output: &'a Path,
    title: &'a str,
    copied: &'a [PathBuf],
    rewritten: Vec<RewriteReport<'a>>,
}

#[derive(Serialize)]
struct RewriteReport<'a> {
    from: &'a str,
    to: &'a str,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let default = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (_, true) => "archive2md=debug",
        _ => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let archive = Archive::open(&cli.folder).map_err(|e| e.to_string())?;
    let output = cli.output.clone().unwrap_or_else(|| archive.default_output());
    let out_dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from);

    let mut options = archive.options(&out_dir);
    if let Some(title) = &cli.title {
        options = options.with_fallback_title(title);
    }

    let conversion = archive.convert(&options).map_err(|e| e.to_string())?;
    write_markdown(&output, &conversion.markdown).map_err(|e| e.to_string())?;

    if cli.json {
        print_report(&output, &conversion)?;
    } else if !cli.quiet {
        println!("[OK] {}", output.display());
    }
    Ok(())
}

fn print_report(output: &Path, conversion: &Conversion) -> Result<(), String> {
    let report = Report {
        output,
        title: &conversion.title,
        copied: &conversion.copied,
        rewritten: conversion
            .rewritten
            .iter()
            .map(|r| RewriteReport {
                from: &r.original,
                to: &r.rewritten,
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
