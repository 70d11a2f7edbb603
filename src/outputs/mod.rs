//! Output generation for the flattened article table.
//!
//! # Submodules
//!
//! - [`csv_file`]: Serializes a [`Table`](crate::models::Table) to a CSV file
//! - [`preview`]: Renders the first rows as a plain text table for the log
//!
//! # Output
//!
//! One file per run, replaced wholesale each time:
//!
//! ```text
//! devto_articles.csv
//! id,title,published_at,url,comments_count,positive_reactions_count,tag_list,user.username
//! 1843210,Shipping a CLI in Rust,2025-05-06T14:30:00Z,https://dev.to/...,4,51,"[""rust"",""cli""]",alice
//! ```

pub mod csv_file;
pub mod preview;
