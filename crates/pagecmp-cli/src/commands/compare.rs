//! Compare command
//!
//! Usage: pagecmp compare --source <FILE> --current <FILE> [--base-url <URL>]
//!        [--format markdown|json] [--search <Q>] [--sort <COLUMN>] [--output <FILE>]

use clap::{Args, ValueEnum};
use pagecmp_core::config::CompareConfig;
use pagecmp_core::diff::{
    compare_documents, render_summary_markdown, CompareReport, SummaryColumn, SummaryTable,
};
use pagecmp_core::dom::{parse_document, NodeId};
use pagecmp_core::errors::{ExError, PageCmpError, Result};
use pagecmp_core::normalize::{file_base_url, parse_base_url};
use pagecmp_core::{log_op_end, log_op_error, log_op_start};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Json,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Reference HTML file
    #[arg(long)]
    pub source: PathBuf,

    /// HTML file to check against the reference
    #[arg(long)]
    pub current: PathBuf,

    /// Base URL relative links and images resolve against
    /// (default: the current file's file:// URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Base URL for the source file only (default: --base-url)
    #[arg(long)]
    pub source_base_url: Option<String>,

    /// TOML comparison configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Only list differences whose row contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Sort differences by column (type, category, details)
    #[arg(long)]
    pub sort: Option<SummaryColumn>,

    /// Sort in descending order
    #[arg(long, requires = "sort")]
    pub descending: bool,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    generated_at: String,
    source: String,
    current: String,
    report: &'a CompareReport<NodeId>,
    summary: &'a SummaryTable,
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> std::result::Result<(), Box<dyn std::error::Error>> {
    log_op_start!("cli_compare");
    let start = Instant::now();

    let rendered = render(&args).map_err(|e| {
        log_op_error!(
            "cli_compare",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        ExError::from(e)
    })?;

    if let Some(output_path) = &args.output {
        write_file(output_path, &rendered).map_err(ExError::from)?;
        println!("✓ Wrote comparison to {}", output_path.display());
    } else {
        print!("{}", rendered);
    }

    log_op_end!(
        "cli_compare",
        duration_ms = start.elapsed().as_millis() as u64
    );
    Ok(())
}

fn render(args: &CompareArgs) -> Result<String> {
    let config = match &args.config {
        Some(path) => CompareConfig::load(path)?,
        None => CompareConfig::default(),
    };

    let source_markup = read_file(&args.source)?;
    let current_markup = read_file(&args.current)?;

    // Both files resolve against one page URL, as if the source were
    // loaded in place of the current page.
    let base_url = match args.base_url.as_deref() {
        Some(raw) => parse_base_url(raw)?,
        None => file_base_url(&args.current)?,
    };
    let source_base_url = match args.source_base_url.as_deref() {
        Some(raw) => parse_base_url(raw)?,
        None => base_url.clone(),
    };

    let source = parse_document(&source_markup, Some(source_base_url));
    let current = parse_document(&current_markup, Some(base_url));
    let report = compare_documents(&source, &current, &config);

    let mut table = SummaryTable::from_differences(&report.differences);
    if let Some(query) = &args.search {
        table = table.search(query);
    }
    if let Some(column) = args.sort {
        table.sort_by(column, !args.descending);
    }

    let generated_at = chrono::Utc::now().to_rfc3339();
    match args.format {
        OutputFormat::Markdown => {
            let mut out = render_summary_markdown(&report, &table);
            out.push_str(&format!("\n_Generated at {generated_at}_\n"));
            Ok(out)
        }
        OutputFormat::Json => {
            let output = JsonOutput {
                generated_at,
                source: args.source.display().to_string(),
                current: args.current.display().to_string(),
                report: &report,
                summary: &table,
            };
            let mut json = serde_json::to_string_pretty(&output)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| PageCmpError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| PageCmpError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
