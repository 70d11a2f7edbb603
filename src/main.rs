//! # devto_etl
//!
//! Pull pages of articles from a dev.to-style listing API, flatten them into
//! a fixed set of columns, and save the result as a CSV file.
//!
//! ## Usage
//!
//! ```sh
//! devto_etl --pages 3 --per-page 30 --output-file devto_articles.csv
//! ```
//!
//! ## Architecture
//!
//! One run is three strictly sequential stages:
//! 1. **Extract**: `GET {api_base}/articles?page=N&per_page=K` for N = 1..=pages,
//!    retrying transient failures after 2s, 5s and 15s
//! 2. **Transform**: concatenate pages and project each article onto
//!    `id, title, published_at, url, comments_count, positive_reactions_count,
//!    tag_list, user.username`
//! 3. **Load**: write the table as CSV (overwriting) and log a preview
//!
//! Any unrecovered error aborts the run with a non-zero exit and no output.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod transform;
mod utils;

use cli::Cli;
use config::{ConfigFile, EtlConfig};
use utils::ensure_writable_parent;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("devto_etl starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Resolve configuration ----
    let file = match &args.config {
        Some(path) => ConfigFile::load(path).await.inspect_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to load config file");
        })?,
        None => ConfigFile::default(),
    };
    let config = EtlConfig::resolve(file, &args).inspect_err(|e| {
        error!(error = %e, "Invalid configuration");
    })?;
    info!(
        api_base = %config.api_base,
        pages = config.pages,
        per_page = config.per_page,
        output_file = %config.output_file.display(),
        timeout = ?config.timeout,
        "Resolved configuration"
    );

    // Early check: fail before any network traffic if the output can't be written
    if let Err(e) = ensure_writable_parent(&config.output_file).await {
        error!(
            path = %config.output_file.display(),
            error = %e,
            "Output location is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    // ---- Extract, transform, load ----
    let summary = match pipeline::run(&config).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "ETL run failed; no output written");
            return Err(e.into());
        }
    };

    info!(
        pages = summary.pages_fetched,
        rows = summary.rows_written,
        path = %summary.output_file.display(),
        elapsed = ?summary.elapsed,
        secs = summary.elapsed.as_secs(),
        millis = summary.elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
