pub mod error;
pub mod types;

pub use error::{FirecrawlError, Result};
pub use types::{HitMetadata, ScrapeOptions, SearchHit, SearchRequest, SearchResponse};

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev";

pub struct FirecrawlClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FirecrawlClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Search the web and scrape each result page to markdown in one call.
    ///
    /// `timeout` bounds the whole HTTP exchange. A well-formed response with no
    /// results is `Ok(vec![])`, never an error.
    pub async fn search(&self, query: &str, limit: u32, timeout: Duration) -> Result<Vec<SearchHit>> {
        tracing::info!(query, limit, "Firecrawl search");

        let body = SearchRequest {
            query: query.to_string(),
            limit,
            timeout: timeout.as_millis() as u64,
            scrape_options: ScrapeOptions::default(),
        };

        let url = format!("{}/v1/search", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(FirecrawlError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        let data: SearchResponse = serde_json::from_str(&text)?;

        if !data.success {
            return Err(FirecrawlError::Api {
                status: status.as_u16(),
                message: data
                    .error
                    .unwrap_or_else(|| "search reported success=false".to_string()),
            });
        }

        if let Some(warning) = data.warning.as_deref() {
            tracing::debug!(query, warning, "Firecrawl search warning");
        }

        tracing::info!(query, count = data.data.len(), "Firecrawl search complete");
        Ok(data.data)
    }
}
