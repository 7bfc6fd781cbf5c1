use std::sync::LazyLock;

use regex::Regex;
use songfinder_common::SearchError;

/// Longest query accepted, in characters.
pub const MAX_QUERY_CHARS: usize = 200;

/// `<title> - <artist>` (any dash) or `<title> by <artist>`.
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:-|–|—|by)\s+").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub title: String,
    pub artist: String,
}

/// A validated, whitespace-normalized user query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    parsed: Option<ParsedQuery>,
}

impl SearchQuery {
    /// Trim and collapse whitespace, reject blank or oversized input, then try
    /// to split out a title and artist.
    pub fn new(raw: &str) -> Result<Self, SearchError> {
        let raw = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if raw.is_empty() {
            return Err(SearchError::InvalidRequest(
                "query must be a non-empty string".to_string(),
            ));
        }
        if raw.chars().count() > MAX_QUERY_CHARS {
            return Err(SearchError::InvalidRequest(format!(
                "query too long (max {MAX_QUERY_CHARS} characters)"
            )));
        }
        let parsed = parse(&raw);
        Ok(Self { raw, parsed })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn parsed(&self) -> Option<&ParsedQuery> {
        self.parsed.as_ref()
    }
}

/// Split `"Title - Artist"` / `"Title by Artist"`.
///
/// The earliest separator with text on both sides wins, so the trailing
/// artist part is the longest possible. Returns `None` when nothing splits.
pub fn parse(query: &str) -> Option<ParsedQuery> {
    SEPARATOR_RE.find_iter(query).find_map(|m| {
        let title = query[..m.start()].trim();
        let artist = query[m.end()..].trim();
        (!title.is_empty() && !artist.is_empty()).then(|| ParsedQuery {
            title: title.to_string(),
            artist: artist.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(q: &str) -> Option<(String, String)> {
        parse(q).map(|p| (p.title, p.artist))
    }

    #[test]
    fn splits_dash_separator() {
        assert_eq!(
            split("Amazing Grace - Chris Tomlin"),
            Some(("Amazing Grace".into(), "Chris Tomlin".into()))
        );
    }

    #[test]
    fn splits_by_case_insensitively() {
        assert_eq!(
            split("How Great Thou Art BY Carl Boberg"),
            Some(("How Great Thou Art".into(), "Carl Boberg".into()))
        );
    }

    #[test]
    fn earliest_separator_keeps_longest_artist() {
        assert_eq!(
            split("Shout to the Lord - Live - Hillsong"),
            Some(("Shout to the Lord".into(), "Live - Hillsong".into()))
        );
    }

    #[test]
    fn hyphenated_words_do_not_split() {
        assert_eq!(split("Soul-Stirring Anthem"), None);
        assert_eq!(split("Nearby Grace"), None);
    }

    #[test]
    fn no_separator_is_none() {
        assert_eq!(split("Amazing Grace"), None);
    }

    #[test]
    fn new_normalizes_whitespace() {
        let q = SearchQuery::new("  Amazing \t Grace \n").unwrap();
        assert_eq!(q.as_str(), "Amazing Grace");
        assert_eq!(q.parsed(), None);
    }

    #[test]
    fn new_rejects_blank_and_oversized() {
        assert!(matches!(
            SearchQuery::new("   "),
            Err(SearchError::InvalidRequest(_))
        ));
        let long = "a".repeat(MAX_QUERY_CHARS + 1);
        assert!(matches!(
            SearchQuery::new(&long),
            Err(SearchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn parsed_query_keeps_the_raw_string() {
        let q = SearchQuery::new("Amazing Grace  by John Newton").unwrap();
        assert_eq!(q.as_str(), "Amazing Grace by John Newton");
        assert_eq!(q.parsed().map(|p| p.title.as_str()), Some("Amazing Grace"));
    }
}
