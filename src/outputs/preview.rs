//! Plain-text preview of the first rows of a table, for log output.

use crate::models::Table;
use crate::utils::truncate_for_log;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Rows shown after a successful write.
pub const PREVIEW_ROWS: usize = 5;

/// Longest cell shown before truncation.
pub const PREVIEW_CELL_WIDTH: usize = 40;

/// Render the header plus up to `limit` rows as a borderless text table.
pub fn render_preview(table: &Table, limit: usize) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.columns().iter().map(|c| c.to_string()));
    for row in table.rows.iter().take(limit) {
        builder.push_record(
            row.to_cells()
                .iter()
                .map(|cell| truncate_for_log(cell, PREVIEW_CELL_WIDTH)),
        );
    }

    let mut preview = builder.build();
    preview.with(Style::blank());
    preview.to_string()
}
