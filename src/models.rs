//! Data models for fetched articles and their flattened representation.
//!
//! - [`Record`]: one article exactly as the listing API returned it
//! - [`Page`]: the records from a single API response
//! - [`Row`] / [`Table`]: the projected, fixed-column form that gets written
//! - [`RunSummary`]: what one run did, for the final log line
//!
//! Records stay loosely typed: nothing checks article shape beyond the eight
//! projected columns.

use serde_json::{Map, Value};
use std::path::PathBuf;
use std::time::Duration;

/// A raw article mapping as returned by the service.
pub type Record = Map<String, Value>;

/// One API response, in service order.
pub type Page = Vec<Record>;

/// Number of projected columns.
pub const COLUMN_COUNT: usize = 8;

/// Output column names, in write order. Dotted names are nested lookups.
pub const COLUMNS: [&str; COLUMN_COUNT] = [
    "id",
    "title",
    "published_at",
    "url",
    "comments_count",
    "positive_reactions_count",
    "tag_list",
    "user.username",
];

/// One projected article: the eight column values in [`COLUMNS`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row(pub [Value; COLUMN_COUNT]);

impl Row {
    /// Render every cell as text, in column order.
    pub fn to_cells(&self) -> Vec<String> {
        self.0.iter().map(render_cell).collect()
    }
}

/// The flattened result of one run: rows in page-then-within-page order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub pages_fetched: u32,
    pub rows_written: usize,
    pub output_file: PathBuf,
    pub elapsed: Duration,
}

/// Text form of a JSON value for a CSV cell.
///
/// Strings are written raw and `null` as an empty cell; every other value
/// keeps its compact JSON text, so `tag_list` becomes `["rust","webdev"]`.
pub fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    impl Row {
        /// Value for a column name, if the name is one of [`COLUMNS`].
        pub(crate) fn get(&self, column: &str) -> Option<&Value> {
            COLUMNS
                .iter()
                .position(|c| *c == column)
                .map(|i| &self.0[i])
        }
    }

    fn sample_row() -> Row {
        Row([
            json!(42),
            json!("Hello, Rust"),
            json!("2025-05-06T14:30:00Z"),
            json!("https://dev.to/alice/hello"),
            json!(3),
            json!(17),
            json!(["rust", "webdev"]),
            json!("alice"),
        ])
    }

    #[test]
    fn test_columns_header_order() {
        assert_eq!(
            COLUMNS.join(","),
            "id,title,published_at,url,comments_count,positive_reactions_count,tag_list,user.username"
        );
    }

    #[test]
    fn test_row_get_by_column() {
        let row = sample_row();
        assert_eq!(row.get("title"), Some(&json!("Hello, Rust")));
        assert_eq!(row.get("user.username"), Some(&json!("alice")));
        assert_eq!(row.get("body_markdown"), None);
    }

    #[test]
    fn test_render_cell_variants() {
        assert_eq!(render_cell(&json!("plain")), "plain");
        assert_eq!(render_cell(&Value::Null), "");
        assert_eq!(render_cell(&json!(12)), "12");
        assert_eq!(render_cell(&json!(true)), "true");
        assert_eq!(render_cell(&json!(["a", "b"])), r#"["a","b"]"#);
        assert_eq!(render_cell(&json!({"k": 1})), r#"{"k":1}"#);
    }

    #[test]
    fn test_row_to_cells() {
        let cells = sample_row().to_cells();
        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[0], "42");
        assert_eq!(cells[6], r#"["rust","webdev"]"#);
        assert_eq!(cells[7], "alice");
    }

    #[test]
    fn test_empty_table() {
        let table = Table::default();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.columns().len(), 8);
    }
}
