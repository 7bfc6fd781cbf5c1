use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

/// Application configuration loaded from environment variables.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    // Web search (Firecrawl)
    pub firecrawl_api_key: Option<String>,
    pub firecrawl_base_url: String,

    // Direct lookup (LRCLIB)
    pub lookup_enabled: bool,
    pub lrclib_base_url: String,

    // Timeouts
    pub search_timeout: Duration,
    pub lookup_timeout: Duration,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 25;
    pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

    /// Load configuration from environment variables.
    ///
    /// A missing `FIRECRAWL_API_KEY` is not an error here: the server still
    /// starts and answers searches with `provider_unavailable`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            firecrawl_api_key: optional_env("FIRECRAWL_API_KEY"),
            firecrawl_base_url: env::var("FIRECRAWL_BASE_URL")
                .unwrap_or_else(|_| "https://api.firecrawl.dev".to_string()),
            lookup_enabled: parse_bool_env("LYRICS_LOOKUP_ENABLED", true)?,
            lrclib_base_url: env::var("LRCLIB_BASE_URL")
                .unwrap_or_else(|_| "https://lrclib.net/api".to_string()),
            search_timeout: Duration::from_secs(parse_env(
                "SEARCH_TIMEOUT_SECS",
                Self::DEFAULT_SEARCH_TIMEOUT_SECS,
            )?),
            lookup_timeout: Duration::from_secs(parse_env(
                "LOOKUP_TIMEOUT_SECS",
                Self::DEFAULT_LOOKUP_TIMEOUT_SECS,
            )?),
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: parse_env("WEB_PORT", 3000)?,
        })
    }

    /// Log which capabilities are configured without printing secrets.
    pub fn log_redacted(&self) {
        let firecrawl = match self.firecrawl_api_key {
            Some(_) => "configured",
            None => "missing",
        };
        info!(
            firecrawl,
            firecrawl_base_url = self.firecrawl_base_url.as_str(),
            lookup_enabled = self.lookup_enabled,
            lrclib_base_url = self.lrclib_base_url.as_str(),
            search_timeout_secs = self.search_timeout.as_secs(),
            lookup_timeout_secs = self.lookup_timeout.as_secs(),
            "Loaded config"
        );
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            firecrawl_api_key: None,
            firecrawl_base_url: "https://api.firecrawl.dev".to_string(),
            lookup_enabled: true,
            lrclib_base_url: "https://lrclib.net/api".to_string(),
            search_timeout: Duration::from_secs(Self::DEFAULT_SEARCH_TIMEOUT_SECS),
            lookup_timeout: Duration::from_secs(Self::DEFAULT_LOOKUP_TIMEOUT_SECS),
            web_host: "0.0.0.0".to_string(),
            web_port: 3000,
        }
    }
}

/// Unset and blank both count as absent.
fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        None => Ok(default),
    }
}

fn parse_bool_env(key: &str, default: bool) -> Result<bool> {
    match optional_env(key).map(|v| v.to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => anyhow::bail!("{key} must be a boolean, got {v:?}"),
        },
    }
}
