// Production adapters behind PageSearcher and LyricsLookup.

use std::time::Duration;

use async_trait::async_trait;
use firecrawl_client::{FirecrawlClient, FirecrawlError, SearchHit};
use lrclib_client::{LrclibClient, LrclibError, SearchParams};
use songfinder_common::PageHit;
use tracing::{info, warn};

use crate::query::SearchQuery;
use crate::readability::html_to_markdown;
use crate::traits::{LyricsLookup, PageSearcher, ProviderError};

/// Upstream error bodies are cut to this many characters before logging.
const MAX_ERROR_BODY_CHARS: usize = 200;

// --- Firecrawl web search ---

pub struct FirecrawlSearcher {
    client: FirecrawlClient,
}

impl FirecrawlSearcher {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        info!(base_url, "Using FirecrawlSearcher");
        Self {
            client: FirecrawlClient::with_base_url(base_url, api_key),
        }
    }
}

#[async_trait]
impl PageSearcher for FirecrawlSearcher {
    async fn search_pages(
        &self,
        query: &str,
        limit: usize,
        timeout: Duration,
    ) -> Result<Vec<PageHit>, ProviderError> {
        let limit = u32::try_from(limit).unwrap_or(u32::MAX);
        let hits = self
            .client
            .search(query, limit, timeout)
            .await
            .map_err(|e| firecrawl_error(e, timeout))?;

        Ok(hits.into_iter().map(page_hit).collect())
    }

    fn name(&self) -> &str {
        "firecrawl"
    }
}

/// Validate one raw hit into a `PageHit`. A missing URL becomes an empty
/// string so the finder can skip it and still count the hit.
fn page_hit(hit: SearchHit) -> PageHit {
    let url = hit.page_url().unwrap_or_default().trim().to_string();
    let page_title = hit.page_title().map(|t| t.trim().to_string());

    let raw_text = if let Some(markdown) = hit.markdown.filter(|m| !m.trim().is_empty()) {
        markdown
    } else if let Some(html) = hit.html.filter(|h| !h.trim().is_empty()) {
        html_to_markdown(&html, &url)
    } else {
        hit.description.unwrap_or_default()
    };

    PageHit {
        url,
        page_title,
        raw_text,
    }
}

fn firecrawl_error(err: FirecrawlError, timeout: Duration) -> ProviderError {
    match err {
        FirecrawlError::Timeout => ProviderError::Timeout(timeout),
        FirecrawlError::Network(msg) => ProviderError::Transport(msg),
        FirecrawlError::Parse(msg) => ProviderError::Malformed(msg),
        FirecrawlError::Api {
            status: status @ (401 | 403),
            ..
        } => ProviderError::Unauthorized { status },
        FirecrawlError::Api {
            status: status @ (402 | 429),
            ..
        } => ProviderError::Quota { status },
        FirecrawlError::Api { status, message } => ProviderError::Status {
            status,
            message: clip(&message),
        },
    }
}

// --- LRCLIB direct lookup ---

pub struct LrclibLookup {
    client: LrclibClient,
}

impl LrclibLookup {
    pub fn new(base_url: &str) -> Self {
        info!(base_url, "Using LrclibLookup");
        Self {
            client: LrclibClient::with_base_url(base_url),
        }
    }
}

#[async_trait]
impl LyricsLookup for LrclibLookup {
    async fn lookup(
        &self,
        query: &SearchQuery,
        timeout: Duration,
    ) -> Result<Option<String>, ProviderError> {
        let records = self
            .client
            .search(search_params(query), timeout)
            .await
            .map_err(|e| lrclib_error(e, timeout))?;

        let best = records.iter().find_map(|r| r.lyrics_text());
        if best.is_none() && !records.is_empty() {
            warn!(
                query = query.as_str(),
                count = records.len(),
                "LRCLIB records carried no lyrics text"
            );
        }
        Ok(best)
    }

    fn name(&self) -> &str {
        "lrclib"
    }
}

/// The whole query as free text, even when it split into title and artist.
fn search_params(query: &SearchQuery) -> SearchParams<'_> {
    SearchParams::FreeText(query.as_str())
}

fn lrclib_error(err: LrclibError, timeout: Duration) -> ProviderError {
    match err {
        LrclibError::Timeout => ProviderError::Timeout(timeout),
        LrclibError::Network(msg) => ProviderError::Transport(msg),
        LrclibError::Parse(msg) => ProviderError::Malformed(msg),
        LrclibError::Api { status: 429, .. } => ProviderError::Quota { status: 429 },
        LrclibError::Api { status, message } => ProviderError::Status {
            status,
            message: clip(&message),
        },
    }
}

fn clip(message: &str) -> String {
    crate::normalize::truncate_chars(message.trim(), MAX_ERROR_BODY_CHARS).to_string()
}
