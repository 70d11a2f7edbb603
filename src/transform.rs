//! Flatten fetched pages into the fixed-column [`Table`].
//!
//! Dotted column names in [`COLUMNS`] are nested lookups, so
//! `user.username` reads `record["user"]["username"]`. A key present with a
//! `null` value counts as present; only absent keys fail the projection.

use crate::error::{EtlError, Result};
use crate::models::{COLUMN_COUNT, COLUMNS, Page, Record, Row, Table};
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Look up a possibly dotted field path in a record.
fn lookup<'a>(record: &'a Record, field: &str) -> Option<&'a Value> {
    let mut parts = field.split('.');
    let first = parts.next()?;
    parts.try_fold(record.get(first)?, |value, key| value.as_object()?.get(key))
}

/// Project one record onto [`COLUMNS`].
///
/// `index` is the record's position in the concatenated sequence and only
/// feeds the error.
pub fn project_record(record: &Record, index: usize) -> Result<Row> {
    let mut cells: [Value; COLUMN_COUNT] = Default::default();
    for (cell, field) in cells.iter_mut().zip(COLUMNS) {
        *cell = lookup(record, field)
            .cloned()
            .ok_or(EtlError::MissingField { field, index })?;
    }
    Ok(Row(cells))
}

/// Concatenate pages in order and project every record.
///
/// Fails on the first record that lacks a column; no partial table is
/// returned.
#[instrument(level = "info", skip_all, fields(pages = pages.len()))]
pub fn to_table(pages: &[Page]) -> Result<Table> {
    let rows = pages
        .iter()
        .flatten()
        .enumerate()
        .map(|(index, record)| project_record(record, index))
        .collect::<Result<Vec<Row>>>()?;

    debug!(
        per_page = ?pages.iter().map(Vec::len).collect::<Vec<_>>(),
        "Concatenated pages"
    );
    info!(rows = rows.len(), "Projected records into table");
    Ok(Table { rows })
}
