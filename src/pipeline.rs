//! Orchestration of one ETL run: fetch every page, flatten, write.
//!
//! Stages run strictly in sequence and pages are fetched one at a time.
//! Any unrecovered error aborts the run before the output file is touched.

use crate::api::{FetchPage, HttpPageSource, RetryFetch};
use crate::config::EtlConfig;
use crate::error::Result;
use crate::models::{Page, RunSummary};
use crate::outputs::csv_file;
use crate::transform;
use std::time::Instant;
use tracing::{info, instrument};

/// Run the pipeline against the live API described by `config`.
pub async fn run(config: &EtlConfig) -> Result<RunSummary> {
    let source = RetryFetch::new(HttpPageSource::from_config(config)?);
    run_with_source(config, &source).await
}

/// Run the pipeline with any page source.
#[instrument(level = "info", skip_all, fields(pages = config.pages, per_page = config.per_page))]
pub async fn run_with_source<F: FetchPage>(config: &EtlConfig, source: &F) -> Result<RunSummary> {
    let t0 = Instant::now();

    // Extract
    let pages = fetch_all(source, config.pages).await?;

    // Transform
    let table = transform::to_table(&pages)?;

    // Load
    csv_file::write_csv(&table, &config.output_file).await?;

    Ok(RunSummary {
        pages_fetched: config.pages,
        rows_written: table.len(),
        output_file: config.output_file.clone(),
        elapsed: t0.elapsed(),
    })
}

/// Fetch pages `1..=pages` in order, stopping at the first error.
#[instrument(level = "info", skip(source))]
pub async fn fetch_all<F: FetchPage>(source: &F, pages: u32) -> Result<Vec<Page>> {
    let mut raw_pages = Vec::new();
    for page in 1..=pages {
        raw_pages.push(source.fetch_page(page).await?);
    }

    let records: usize = raw_pages.iter().map(Vec::len).sum();
    info!(pages = raw_pages.len(), records, "Fetched all pages");
    Ok(raw_pages)
}
