use std::sync::LazyLock;

use regex::Regex;
use songfinder_common::{PageHit, SongCandidate};

use crate::extract::LyricsBlock;
use crate::query::SearchQuery;

/// Blocks shorter than this many characters are noise, not lyrics.
pub const MIN_LYRICS_CHARS: usize = 100;

/// Lyrics are cut to at most this many characters.
pub const MAX_LYRICS_CHARS: usize = 5000;

static SITE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\|[^|]*$").expect("valid regex"));

static KIND_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\s+[-–—]\s*|\s*:\s+)(?:lyrics|song|hymn|christian|gospel|worship)\b.*$")
        .expect("valid regex")
});

static BARE_LYRICS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+lyrics$").expect("valid regex"));

/// Turn one page hit and its extracted block into a candidate.
///
/// Returns `None` when the block is below the minimum content threshold.
pub fn normalize(query: &SearchQuery, hit: &PageHit, block: &LyricsBlock) -> Option<SongCandidate> {
    let lyrics = bound_lyrics(block.as_str())?;
    let title = hit
        .page_title
        .as_deref()
        .map(clean_title)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| clean_title_or(query.as_str(), query.as_str()));

    Some(SongCandidate {
        title,
        lyrics,
        source: source_label(&hit.url),
        url: hit.url.trim().to_string(),
    })
}

/// Strip site-name and "- Lyrics"-style suffixes from a page title.
///
/// `"Amazing Grace - Lyrics | HymnSite"` becomes `"Amazing Grace"`. May
/// return an empty string when the whole title was suffix.
pub fn clean_title(title: &str) -> String {
    let mut title = title.trim().to_string();
    while SITE_SUFFIX_RE.is_match(&title) {
        title = SITE_SUFFIX_RE.replace(&title, "").into_owned();
    }
    let title = KIND_SUFFIX_RE.replace(&title, "");
    let title = BARE_LYRICS_RE.replace(&title, "");
    title.trim().to_string()
}

/// `clean_title`, falling back to `fallback` when nothing is left.
pub fn clean_title_or(title: &str, fallback: &str) -> String {
    let cleaned = clean_title(title);
    if cleaned.is_empty() {
        fallback.to_string()
    } else {
        cleaned
    }
}

/// Trim and cap lyrics text. `None` when shorter than the minimum.
pub fn bound_lyrics(text: &str) -> Option<String> {
    let text = text.trim();
    if text.chars().count() < MIN_LYRICS_CHARS {
        return None;
    }
    Some(truncate_chars(text, MAX_LYRICS_CHARS).trim_end().to_string())
}

/// The first `max` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Host of the hit URL, used as the candidate's source label.
pub fn source_label(url: &str) -> String {
    url::Url::parse(url.trim())
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "web".to_string())
}
