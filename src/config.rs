//! Run configuration.
//!
//! An [`EtlConfig`] is resolved once in `main` and threaded through the
//! pipeline. Sources, lowest precedence first:
//!
//! 1. built-in defaults ([`EtlConfig::default`])
//! 2. an optional YAML file (`--config`), any subset of the keys below
//! 3. command-line flags and their environment variables
//!
//! ```yaml
//! api_base: https://dev.to/api
//! pages: 3
//! per_page: 30
//! output_file: devto_articles.csv
//! timeout_secs: 30
//! ```

use crate::cli::Cli;
use crate::error::{EtlError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, instrument};
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://dev.to/api";
pub const DEFAULT_PAGES: u32 = 3;
/// The service documents 30 as its maximum page size. Not enforced.
pub const DEFAULT_PER_PAGE: u32 = 30;
pub const DEFAULT_OUTPUT_FILE: &str = "devto_articles.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct EtlConfig {
    pub api_base: Url,
    pub pages: u32,
    pub per_page: u32,
    pub output_file: PathBuf,
    pub timeout: Duration,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            // Constant is a valid absolute URL.
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base parses"),
            pages: DEFAULT_PAGES,
            per_page: DEFAULT_PER_PAGE,
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// On-disk shape of the optional YAML config file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub api_base: Option<String>,
    pub pages: Option<u32>,
    pub per_page: Option<u32>,
    pub output_file: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text)
            .map_err(|e| EtlError::config(format!("invalid config file: {e}")))
    }

    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .await
            .map_err(|e| EtlError::config(format!("cannot read {}: {e}", path.display())))?;
        let file = Self::from_yaml(&text)?;
        debug!(?file, "Loaded config file");
        Ok(file)
    }
}

impl EtlConfig {
    /// Layer the config file and CLI over the defaults.
    pub fn resolve(file: ConfigFile, cli: &Cli) -> Result<Self> {
        let defaults = Self::default();

        let api_base = match cli.api_base.as_deref().or(file.api_base.as_deref()) {
            Some(raw) => parse_api_base(raw)?,
            None => defaults.api_base,
        };

        Ok(Self {
            api_base,
            pages: cli.pages.or(file.pages).unwrap_or(defaults.pages),
            per_page: cli.per_page.or(file.per_page).unwrap_or(defaults.per_page),
            output_file: cli
                .output_file
                .clone()
                .or(file.output_file)
                .unwrap_or(defaults.output_file),
            timeout: cli
                .timeout_secs
                .or(file.timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        })
    }
}

/// Parse and check an API base URL: absolute, http(s), usable as a base.
pub fn parse_api_base(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| EtlError::config(format!("api_base `{raw}`: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(EtlError::config(format!(
            "api_base `{raw}` must be an http(s) URL"
        )));
    }
    Ok(url)
}
