use std::fmt;

use thiserror::Error;

/// How the direct lookup stage ended when it produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMiss {
    NoMatch,
    TooShort,
    Failed,
    Disabled,
}

impl fmt::Display for LookupMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            LookupMiss::NoMatch => "direct lookup had no match",
            LookupMiss::TooShort => "direct lookup text was too short",
            LookupMiss::Failed => "direct lookup failed",
            LookupMiss::Disabled => "direct lookup is not configured",
        };
        f.write_str(text)
    }
}

/// Caller-visible outcome of a failed search.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("No search hits for \"{query}\"; {lookup}")]
    NoHitsFound { query: String, lookup: LookupMiss },

    #[error("No extractable lyrics in {hits} search hit(s) for \"{query}\"; {lookup}")]
    NoExtractableLyrics {
        query: String,
        hits: usize,
        lookup: LookupMiss,
    },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl SearchError {
    /// Machine-readable category carried on every error payload.
    pub fn category(&self) -> &'static str {
        match self {
            SearchError::InvalidRequest(_) => "invalid_request",
            SearchError::ProviderUnavailable(_) => "provider_unavailable",
            SearchError::NoHitsFound { .. } => "no_hits_found",
            SearchError::NoExtractableLyrics { .. } => "no_extractable_lyrics",
            SearchError::Unexpected(_) => "unexpected_fault",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            SearchError::InvalidRequest(_) => 400,
            SearchError::NoHitsFound { .. } | SearchError::NoExtractableLyrics { .. } => 404,
            SearchError::Unexpected(_) => 500,
            SearchError::ProviderUnavailable(_) => 503,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            SearchError::InvalidRequest(_) => "Invalid request",
            SearchError::ProviderUnavailable(_) => "Song search is temporarily disabled",
            SearchError::NoHitsFound { .. } | SearchError::NoExtractableLyrics { .. } => {
                "No lyrics found"
            }
            SearchError::Unexpected(_) => "Song search failed, please try again later",
        }
    }

    /// Human-readable detail. Unexpected faults carry none so internals never
    /// reach the caller.
    pub fn details(&self) -> Option<String> {
        match self {
            SearchError::Unexpected(_) => None,
            SearchError::InvalidRequest(msg) | SearchError::ProviderUnavailable(msg) => {
                Some(msg.clone())
            }
            other => Some(other.to_string()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SearchError::NoHitsFound { .. } | SearchError::NoExtractableLyrics { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorResponse;

    #[test]
    fn not_found_variants_map_to_404() {
        let a = SearchError::NoHitsFound {
            query: "x".into(),
            lookup: LookupMiss::NoMatch,
        };
        let b = SearchError::NoExtractableLyrics {
            query: "x".into(),
            hits: 3,
            lookup: LookupMiss::Failed,
        };
        assert_eq!(a.status_code(), 404);
        assert_eq!(b.status_code(), 404);
        assert_ne!(a.category(), b.category());
        assert!(a.is_not_found() && b.is_not_found());
    }

    #[test]
    fn not_found_details_name_the_lookup_stage() {
        let err = SearchError::NoHitsFound {
            query: "Obscure Unknown Hymn XYZ".into(),
            lookup: LookupMiss::NoMatch,
        };
        let details = err.details().unwrap();
        assert!(details.contains("Obscure Unknown Hymn XYZ"));
        assert!(details.contains("no match"));
    }

    #[test]
    fn unexpected_fault_hides_internal_detail() {
        let err = SearchError::from(anyhow::anyhow!("connection pool poisoned at 0xdeadbeef"));
        let payload = ErrorResponse::from(&err);
        assert_eq!(err.status_code(), 500);
        assert_eq!(payload.category, "unexpected_fault");
        assert_eq!(payload.details, None);
        assert!(!payload.error.contains("deadbeef"));
    }

    #[test]
    fn provider_unavailable_is_503() {
        let err = SearchError::ProviderUnavailable("FIRECRAWL_API_KEY is not set".into());
        assert_eq!(err.status_code(), 503);
        assert_eq!(err.category(), "provider_unavailable");
    }
}
