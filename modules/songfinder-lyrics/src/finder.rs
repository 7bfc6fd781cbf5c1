// Lyrics finder: web search first, direct lookup only when the web search
// produced no usable candidate. Providers are called one after the other,
// each under its own timeout; provider faults never reach the caller.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use songfinder_common::{
    Config, LookupMiss, SearchError, SearchResponse, SongCandidate, LOOKUP_SENTINEL_URL,
};
use tracing::{debug, error, info, warn};
use typed_builder::TypedBuilder;

use crate::extract::extract;
use crate::normalize::{bound_lyrics, normalize};
use crate::providers::{FirecrawlSearcher, LrclibLookup};
use crate::query::SearchQuery;
use crate::traits::{LyricsLookup, PageSearcher, ProviderError};

/// Appended to every web search so results lean towards worship lyrics pages.
pub const DOMAIN_QUALIFIER: &str = "christian lyrics";

#[derive(Debug, Clone, TypedBuilder)]
pub struct FinderSettings {
    #[builder(default = 5)]
    pub max_hits: usize,
    #[builder(default = Duration::from_secs(Config::DEFAULT_SEARCH_TIMEOUT_SECS))]
    pub search_timeout: Duration,
    #[builder(default = Duration::from_secs(Config::DEFAULT_LOOKUP_TIMEOUT_SECS))]
    pub lookup_timeout: Duration,
    #[builder(default = DOMAIN_QUALIFIER.to_string(), setter(into))]
    pub domain_qualifier: String,
}

impl Default for FinderSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl FinderSettings {
    pub fn from_config(config: &Config) -> Self {
        Self::builder()
            .search_timeout(config.search_timeout)
            .lookup_timeout(config.lookup_timeout)
            .build()
    }
}

/// What the web search stage produced.
struct WebStage {
    hits: usize,
    candidates: Vec<SongCandidate>,
}

pub struct LyricsFinder {
    searcher: Option<Arc<dyn PageSearcher>>,
    lookup: Option<Arc<dyn LyricsLookup>>,
    settings: FinderSettings,
}

impl LyricsFinder {
    /// A `None` searcher makes every search fail with `ProviderUnavailable`;
    /// a `None` lookup just skips the fallback stage.
    pub fn new(
        searcher: Option<Arc<dyn PageSearcher>>,
        lookup: Option<Arc<dyn LyricsLookup>>,
        settings: FinderSettings,
    ) -> Self {
        Self {
            searcher,
            lookup,
            settings,
        }
    }

    /// Wire the production providers from configuration.
    pub fn from_config(config: &Config) -> Self {
        let searcher = config.firecrawl_api_key.as_deref().map(|key| {
            Arc::new(FirecrawlSearcher::new(&config.firecrawl_base_url, key))
                as Arc<dyn PageSearcher>
        });
        if searcher.is_none() {
            warn!("FIRECRAWL_API_KEY not set, song search will report provider_unavailable");
        }
        let lookup = config.lookup_enabled.then(|| {
            Arc::new(LrclibLookup::new(&config.lrclib_base_url)) as Arc<dyn LyricsLookup>
        });

        Self::new(searcher, lookup, FinderSettings::from_config(config))
    }

    pub fn settings(&self) -> &FinderSettings {
        &self.settings
    }

    /// Run the full pipeline for one query.
    ///
    /// Returns a non-empty, provider-ordered candidate list, or a typed error.
    pub async fn search(&self, raw_query: &str) -> Result<Vec<SongCandidate>, SearchError> {
        Ok(self.search_response(raw_query).await?.results)
    }

    /// `search`, paired with the normalized query string that was searched.
    pub async fn search_response(&self, raw_query: &str) -> Result<SearchResponse, SearchError> {
        let query = SearchQuery::new(raw_query)?;
        let results = self.run(&query).await?;
        Ok(SearchResponse {
            query: query.as_str().to_string(),
            results,
        })
    }

    async fn run(&self, query: &SearchQuery) -> Result<Vec<SongCandidate>, SearchError> {
        let searcher = self.searcher.as_ref().ok_or_else(|| {
            SearchError::ProviderUnavailable("web search provider is not configured".to_string())
        })?;

        info!(query = query.as_str(), parsed = query.parsed().is_some(), "Song search started");

        let web = self.search_web(searcher.as_ref(), query).await;
        if !web.candidates.is_empty() {
            info!(
                query = query.as_str(),
                hits = web.hits,
                candidates = web.candidates.len(),
                "Song search answered by web search"
            );
            return Ok(web.candidates);
        }

        match self.lookup_direct(query).await {
            Ok(candidate) => {
                info!(query = query.as_str(), source = candidate.source.as_str(), "Song search answered by direct lookup");
                Ok(vec![candidate])
            }
            Err(lookup) => {
                info!(query = query.as_str(), hits = web.hits, %lookup, "Song search found nothing");
                let query = query.as_str().to_string();
                Err(if web.hits == 0 {
                    SearchError::NoHitsFound { query, lookup }
                } else {
                    SearchError::NoExtractableLyrics {
                        query,
                        hits: web.hits,
                        lookup,
                    }
                })
            }
        }
    }

    async fn search_web(&self, searcher: &dyn PageSearcher, query: &SearchQuery) -> WebStage {
        let provider_query = format!("{} {}", query.as_str(), self.settings.domain_qualifier);
        let timeout = self.settings.search_timeout;
        let limit = self.settings.max_hits;

        let hits = match tokio::time::timeout(
            timeout,
            searcher.search_pages(&provider_query, limit, timeout),
        )
        .await
        {
            Ok(Ok(hits)) => hits,
            Ok(Err(e)) => {
                log_provider_error(searcher.name(), &e);
                Vec::new()
            }
            Err(_) => {
                log_provider_error(searcher.name(), &ProviderError::Timeout(timeout));
                Vec::new()
            }
        };

        let hits: Vec<_> = hits.into_iter().take(limit).collect();
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for hit in &hits {
            let url = hit.url.trim();
            if url.is_empty() {
                debug!(provider = searcher.name(), "Skipping hit without URL");
                continue;
            }
            if !seen.insert(url.to_string()) {
                debug!(url, "Skipping duplicate hit");
                continue;
            }

            let block = extract(&hit.raw_text);
            match normalize(query, hit, &block) {
                Some(candidate) => {
                    debug!(url, lines = block.line_count(), chars = candidate.lyrics.len(), "Extracted lyrics");
                    candidates.push(candidate);
                }
                None => debug!(url, lines = block.line_count(), "No lyrics block above threshold"),
            }
        }

        WebStage {
            hits: hits.len(),
            candidates,
        }
    }

    async fn lookup_direct(&self, query: &SearchQuery) -> Result<SongCandidate, LookupMiss> {
        let lookup = self.lookup.as_ref().ok_or(LookupMiss::Disabled)?;
        let timeout = self.settings.lookup_timeout;

        let text = match tokio::time::timeout(timeout, lookup.lookup(query, timeout)).await {
            Ok(Ok(Some(text))) => text,
            Ok(Ok(None)) => return Err(LookupMiss::NoMatch),
            Ok(Err(e)) => {
                log_provider_error(lookup.name(), &e);
                return Err(LookupMiss::Failed);
            }
            Err(_) => {
                log_provider_error(lookup.name(), &ProviderError::Timeout(timeout));
                return Err(LookupMiss::Failed);
            }
        };

        let lyrics = bound_lyrics(&text).ok_or(LookupMiss::TooShort)?;
        Ok(SongCandidate {
            title: query.as_str().to_string(),
            lyrics,
            source: lookup.name().to_string(),
            url: LOOKUP_SENTINEL_URL.to_string(),
        })
    }
}

/// Provider faults are recovered as empty results; the level tells operators
/// whether it needs attention.
fn log_provider_error(provider: &str, err: &ProviderError) {
    match err {
        ProviderError::Timeout(_) | ProviderError::Transport(_) => {
            warn!(provider, error = %err, "Provider call failed, treating as empty result")
        }
        ProviderError::Unauthorized { .. } | ProviderError::Quota { .. } => {
            error!(provider, error = %err, "Provider rejected request, check credentials and quota")
        }
        ProviderError::Status { .. } | ProviderError::Malformed(_) => {
            error!(provider, error = %err, "Provider returned an unusable response")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_defaults() {
        let s = FinderSettings::default();
        assert_eq!(s.max_hits, 5);
        assert_eq!(s.search_timeout, Duration::from_secs(25));
        assert_eq!(s.lookup_timeout, Duration::from_secs(10));
        assert_eq!(s.domain_qualifier, DOMAIN_QUALIFIER);
    }

    #[test]
    fn settings_follow_config_timeouts() {
        let config = Config {
            search_timeout: Duration::from_secs(20),
            lookup_timeout: Duration::from_secs(3),
            ..Config::default()
        };
        let s = FinderSettings::from_config(&config);
        assert_eq!(s.search_timeout, Duration::from_secs(20));
        assert_eq!(s.lookup_timeout, Duration::from_secs(3));
    }

    #[tokio::test]
    async fn unconfigured_web_search_is_unavailable() {
        let finder = LyricsFinder::from_config(&Config::default());
        let err = finder.search("Amazing Grace").await.unwrap_err();
        assert!(matches!(err, SearchError::ProviderUnavailable(_)));
    }
}
