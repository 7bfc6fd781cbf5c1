//! LRCLIB API client.
//!
//! Only the free-text search endpoint is wrapped. API docs: https://lrclib.net/docs

pub mod error;
pub mod types;

pub use error::{LrclibError, Result};
pub use types::LrclibRecord;

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://lrclib.net/api";
const USER_AGENT: &str = concat!("songfinder/", env!("CARGO_PKG_VERSION"));

/// How a search is keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchParams<'a> {
    /// Loose match against title, artist and album at once.
    FreeText(&'a str),
    /// Field-scoped match when the caller already knows both parts.
    Track { track_name: &'a str, artist_name: &'a str },
}

impl<'a> SearchParams<'a> {
    /// Query-string pairs for `GET /search`.
    pub fn query_pairs(&self) -> Vec<(&'static str, &'a str)> {
        match *self {
            SearchParams::FreeText(q) => vec![("q", q)],
            SearchParams::Track {
                track_name,
                artist_name,
            } => vec![("track_name", track_name), ("artist_name", artist_name)],
        }
    }
}

pub struct LrclibClient {
    client: reqwest::Client,
    base_url: String,
}

impl LrclibClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        let client = match reqwest::Client::builder().user_agent(USER_AGENT).build() {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, "LRCLIB client builder failed, using default client without user agent");
                reqwest::Client::new()
            }
        };

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Search records. An empty array is a clean miss, not an error.
    pub async fn search(&self, params: SearchParams<'_>, timeout: Duration) -> Result<Vec<LrclibRecord>> {
        let url = format!("{}/search", self.base_url);
        let query = params.query_pairs();

        tracing::info!(?params, "LRCLIB search");

        let resp = self
            .client
            .get(&url)
            .query(&query)
            .timeout(timeout)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(LrclibError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        let records: Vec<LrclibRecord> = serde_json::from_str(&text)?;
        tracing::info!(count = records.len(), "LRCLIB search complete");
        Ok(records)
    }
}

impl Default for LrclibClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_params_build_query_pairs() {
        assert_eq!(
            SearchParams::FreeText("Stand by Me").query_pairs(),
            vec![("q", "Stand by Me")]
        );
        assert_eq!(
            SearchParams::Track {
                track_name: "Amazing Grace",
                artist_name: "John Newton",
            }
            .query_pairs(),
            vec![("track_name", "Amazing Grace"), ("artist_name", "John Newton")]
        );
    }

    #[test]
    fn base_url_is_trimmed() {
        let client = LrclibClient::with_base_url("http://localhost:9999/api/");
        assert_eq!(client.base_url, "http://localhost:9999/api");
    }
}
