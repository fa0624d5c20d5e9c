//! Extract command - build a spreadsheet from a URL.

use anyhow::Result;
use clap::Args;
use flashgrab_core::MemorySink;
use flashgrab_fetch::{ExtractPipeline, FetchContext, PaginationDriver, parse_source_url};
use std::sync::Arc;
use tracing::{debug, info};

use super::load_settings;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};
use flashgrab_store::ExtractionService;

/// Arguments for the extract command.
#[derive(Args, Default)]
pub struct ExtractArgs {
    /// Page URL; `?page=N` is added for each page.
    pub url: String,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Extra attempts for a page whose fetch failed.
    #[arg(long)]
    pub retries: Option<u32>,

    /// Fetch and count flashcards without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Runs the extract command.
pub async fn run(args: &ExtractArgs, cli: &Cli) -> Result<()> {
    let mut settings = load_settings(cli).await?;
    if let Some(timeout) = args.timeout {
        settings.fetch_timeout_secs = timeout;
    }
    if let Some(retries) = args.retries {
        settings.page_retries = retries;
    }
    settings.validate()?;

    if args.dry_run {
        return dry_run(&args.url, &settings, cli).await;
    }

    let service = ExtractionService::new(settings)?;

    // Timers from earlier runs died with their process.
    let swept = service.sweep().await?;
    if swept.removed() > 0 {
        debug!(removed = swept.removed(), "Swept old artifacts before extraction");
    }

    info!(url = %args.url, "Starting extraction");
    let report = service.run_extraction(&args.url).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_report(&report, service.settings().expiry()));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_report(&report)?);
        }
    }

    Ok(())
}

/// Walks the pages into memory and prints what would be written.
async fn dry_run(url: &str, settings: &flashgrab_store::Settings, cli: &Cli) -> Result<()> {
    let source = parse_source_url(url)?;
    let ctx = FetchContext::with_settings(settings.fetch_settings())?;
    let driver = PaginationDriver::new(&ctx, Arc::new(ExtractPipeline::standard()));

    let mut sink = MemorySink::new();
    let summary = driver.run(&source, &mut sink).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_dry_run(&summary, &sink.records));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_dry_run(&summary, &sink.records)?);
        }
    }

    Ok(())
}
