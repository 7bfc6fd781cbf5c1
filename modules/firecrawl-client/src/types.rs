use serde::{Deserialize, Serialize};

// --- Search request ---

/// Body for `POST /v1/search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub limit: u32,
    /// Server-side deadline in milliseconds. Firecrawl aborts the scrape phase
    /// when it elapses and returns whatever it has.
    pub timeout: u64,
    #[serde(rename = "scrapeOptions")]
    pub scrape_options: ScrapeOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeOptions {
    pub formats: Vec<String>,
    #[serde(rename = "onlyMainContent")]
    pub only_main_content: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            formats: vec!["markdown".to_string()],
            only_main_content: true,
        }
    }
}

// --- Search response ---

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<SearchHit>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

/// One search result. Every field is optional upstream; callers decide what
/// a usable hit looks like.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHit {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub markdown: Option<String>,
    pub html: Option<String>,
    pub metadata: Option<HitMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HitMetadata {
    pub title: Option<String>,
    #[serde(rename = "sourceURL")]
    pub source_url: Option<String>,
}

impl SearchHit {
    /// Page URL, preferring the top-level field over scrape metadata.
    pub fn page_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .or_else(|| self.metadata.as_ref()?.source_url.as_deref())
            .filter(|u| !u.trim().is_empty())
    }

    /// Page title, preferring the scraped `<title>` over the search engine title.
    pub fn page_title(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.title.as_deref())
            .or(self.title.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}
