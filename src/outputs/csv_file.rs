//! CSV output for the article table.
//!
//! The document is rendered in memory first and then written with a single
//! call, so a serialization failure never leaves a half-written file behind.

use crate::error::{EtlError, Result};
use crate::models::Table;
use crate::outputs::preview::{PREVIEW_ROWS, render_preview};
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument, warn};

/// Serialize `table` as CSV: header row of column names, then one row per
/// article in table order.
pub fn table_to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns())?;
    for row in &table.rows {
        writer.write_record(row.to_cells())?;
    }
    writer
        .into_inner()
        .map_err(|e| EtlError::Csv(csv::Error::from(e.into_error())))
}

/// Write `table` to `path`, replacing any existing file, then log a summary.
///
/// # Output
///
/// After a successful write, logs the row count and a preview of the first
/// [`PREVIEW_ROWS`] rows. The preview is for humans reading the log only and
/// is skipped for an empty table.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = table.len()))]
pub async fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let bytes = table_to_csv(table)?;

    info!(bytes = bytes.len(), "Writing CSV");
    if let Err(e) = fs::write(path, &bytes).await {
        error!(error = %e, "Failed to write CSV");
        return Err(EtlError::io(path, e));
    }

    if table.is_empty() {
        warn!(path = %path.display(), "No articles fetched; wrote header only");
        return Ok(());
    }

    info!(rows = table.len(), path = %path.display(), "Saved rows");
    info!("Preview:\n{}", render_preview(table, PREVIEW_ROWS));
    Ok(())
}
