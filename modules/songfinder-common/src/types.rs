use serde::{Deserialize, Serialize};

/// Sentinel `url` for candidates produced by the direct lookup stage, which
/// has no backing web page.
pub const LOOKUP_SENTINEL_URL: &str = "urn:songfinder:direct-lookup";

/// One result page from the web search provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHit {
    pub url: String,
    pub page_title: Option<String>,
    pub raw_text: String,
}

/// A proposed lyrics result surfaced for manual selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongCandidate {
    pub title: String,
    pub lyrics: String,
    /// Host of the page the lyrics came from, or the lookup provider's name.
    pub source: String,
    pub url: String,
}

/// Wire shape of a successful search. `results` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SongCandidate>,
}

/// Wire shape of a failed search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&crate::SearchError> for ErrorResponse {
    fn from(err: &crate::SearchError) -> Self {
        Self {
            error: err.headline().to_string(),
            category: err.category().to_string(),
            details: err.details(),
        }
    }
}
