//! Command-line interface definitions for the ETL run.
//!
//! Every option can come from a flag or an environment variable. Anything left
//! unset falls back to the YAML config file (if given) and then to the
//! built-in defaults; see [`crate::config::EtlConfig::resolve`].

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for `devto_etl`.
///
/// # Examples
///
/// ```sh
/// # Defaults: 3 pages of 30 articles into ./devto_articles.csv
/// devto_etl
///
/// # Ten pages into a custom file
/// devto_etl -p 10 -o /tmp/articles.csv
///
/// # Settings from a YAML file, page count overridden from the environment
/// DEVTO_PAGES=5 devto_etl -c etl.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Base URL of the article API (requests go to `{api_base}/articles`)
    #[arg(short, long, env = "DEVTO_API_BASE")]
    pub api_base: Option<String>,

    /// Number of pages to fetch, starting at page 1
    #[arg(short, long, env = "DEVTO_PAGES")]
    pub pages: Option<u32>,

    /// Articles per page; sent to the service as-is
    #[arg(long, env = "DEVTO_PER_PAGE")]
    pub per_page: Option<u32>,

    /// Destination CSV file, overwritten on every run
    #[arg(short, long, env = "DEVTO_OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, env = "DEVTO_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Optional path to a YAML config file
    #[arg(short, long, env = "DEVTO_ETL_CONFIG")]
    pub config: Option<PathBuf>,
}
