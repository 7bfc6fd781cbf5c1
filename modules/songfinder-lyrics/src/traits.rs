// Provider boundaries for the lyrics finder.
//
// PageSearcher: web search that returns scraped page text per hit.
// LyricsLookup: direct lookup that returns at most one lyrics blob.
//
// The finder only talks to these traits, so tests swap in MockSearcher and
// MockLookup: no network, no API keys.

use std::time::Duration;

use async_trait::async_trait;
use songfinder_common::PageHit;
use thiserror::Error;

use crate::query::SearchQuery;

/// Why a provider call produced nothing. Never shown to the caller; the
/// finder logs it and treats the call as an empty result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("credentials rejected (status {status})")]
    Unauthorized { status: u16 },

    #[error("quota or rate limit exhausted (status {status})")]
    Quota { status: u16 },

    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait PageSearcher: Send + Sync {
    /// Search the web and return up to `limit` hits with their page text.
    /// A clean miss is `Ok(vec![])`.
    async fn search_pages(
        &self,
        query: &str,
        limit: usize,
        timeout: Duration,
    ) -> Result<Vec<PageHit>, ProviderError>;

    fn name(&self) -> &str;
}

#[async_trait]
pub trait LyricsLookup: Send + Sync {
    /// Best-effort lyrics keyed loosely by the whole query string.
    /// `Ok(None)` is a clean miss.
    async fn lookup(
        &self,
        query: &SearchQuery,
        timeout: Duration,
    ) -> Result<Option<String>, ProviderError>;

    fn name(&self) -> &str;
}
