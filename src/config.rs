//! Application configuration loaded from environment variables.
//!
//! Everything has a sensible default; the variables exist mostly so
//! tests and deployments behind proxies can redirect the client:
//! - `GMGN_BASE_URL` — overrides the API origin (default `https://gmgn.ai`)
//! - `TRONWATCH_OUTPUT_FILE` — overrides the trader-address dump path
//!   (default `tron_top_traders.txt`)

use std::path::PathBuf;

/// Default API origin.
const DEFAULT_BASE_URL: &str = "https://gmgn.ai";

/// Default path for the one-address-per-line trader dump.
const DEFAULT_OUTPUT_FILE: &str = "tron_top_traders.txt";

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub gmgn: GmgnConfig,
}

/// GMGN-specific configuration values.
#[derive(Debug, Clone)]
pub struct GmgnConfig {
    pub base_url: String,
    pub output_file: PathBuf,
}

impl Default for GmgnConfig {
    fn default() -> Self {
        GmgnConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

/// Loads the application configuration from environment variables.
///
/// Unset or empty variables fall back to the defaults above; a trailing
/// `/` on the base URL is trimmed so endpoint paths can be appended
/// verbatim.
pub fn fetch_config() -> AppConfig {
    let base_url = non_empty_var("GMGN_BASE_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let output_file = non_empty_var("TRONWATCH_OUTPUT_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));

    AppConfig {
        gmgn: GmgnConfig {
            base_url,
            output_file,
        },
    }
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
