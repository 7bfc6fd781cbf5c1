//! Lyrics block segmentation.
//!
//! Scraped pages mix the lyrics with navigation, ads, credits and markdown
//! chrome. The text is cut into runs of consecutive content lines, separated
//! by blank or metadata lines, and the longest run with enough lines wins.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Fewest lines a run needs to count as a block.
pub const MIN_BLOCK_LINES: usize = 4;

/// Lines shorter than this (in characters, after trimming) are boundaries.
pub const MIN_LINE_CHARS: usize = 3;

/// Raw text beyond this many bytes is ignored, keeping extraction time bounded.
pub const MAX_RAW_TEXT_BYTES: usize = 200_000;

/// One to three words followed by a colon: "Album:", "Written by: ...".
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}][\p{L}'’.&]*(?:\s+[\p{L}'’.&]+){0,2}\s*:(?:\s|$)").expect("valid regex")
});

/// Inline markdown link; the text is kept, the target dropped.
static INLINE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("valid regex"));

/// Lowercase prefixes of credit, licensing and site boilerplate.
const BOILERPLATE_PREFIXES: &[&str] = &[
    "copyright",
    "©",
    "(c) ",
    "all rights reserved",
    "lyrics provided by",
    "lyrics licensed",
    "lyrics powered by",
    "lyrics courtesy of",
    "used by permission",
    "used with permission",
    "ccli",
    "submit corrections",
    "written by",
    "composed by",
    "words and music by",
    "advertisement",
    "sponsored",
    "share this",
    "sign up",
    "log in",
    "subscribe",
    "privacy policy",
    "terms of",
    "cookie",
    "back to top",
    "read more",
    "embed",
];

/// The winning run of lines for one page. Empty when no run qualified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricsBlock {
    text: String,
    line_count: usize,
}

impl LyricsBlock {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Extract the best lyrics block from unstructured page text.
///
/// Single pass over the lines. The longest qualifying run (by characters,
/// newline-joined) wins; the first one seen wins a tie.
pub fn extract(raw_text: &str) -> LyricsBlock {
    let text = bounded(raw_text);

    let mut best: Option<(Vec<Cow<'_, str>>, usize)> = None;
    let mut buffer: Vec<Cow<'_, str>> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if is_boundary(line) {
            flush(&mut buffer, &mut best);
        } else {
            buffer.push(unwrap_links(line));
        }
    }
    flush(&mut buffer, &mut best);

    match best {
        Some((lines, _)) => LyricsBlock {
            line_count: lines.len(),
            text: lines.join("\n"),
        },
        None => LyricsBlock::default(),
    }
}

fn flush<'a>(buffer: &mut Vec<Cow<'a, str>>, best: &mut Option<(Vec<Cow<'a, str>>, usize)>) {
    if buffer.len() < MIN_BLOCK_LINES {
        buffer.clear();
        return;
    }
    let run = std::mem::take(buffer);
    let len = joined_len(&run);
    let beats_best = match best {
        Some((_, best_len)) => len > *best_len,
        None => true,
    };
    if beats_best {
        *best = Some((run, len));
    }
}

fn joined_len(lines: &[Cow<'_, str>]) -> usize {
    let chars: usize = lines.iter().map(|l| l.chars().count()).sum();
    chars + lines.len().saturating_sub(1)
}

fn bounded(text: &str) -> &str {
    if text.len() <= MAX_RAW_TEXT_BYTES {
        return text;
    }
    let mut end = MAX_RAW_TEXT_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// True when a (trimmed) line ends the current run instead of joining it.
pub fn is_boundary(line: &str) -> bool {
    line.is_empty()
        || line.chars().count() < MIN_LINE_CHARS
        || LABEL_RE.is_match(line)
        || is_boilerplate(line)
        || is_markup_chrome(line)
}

fn is_boilerplate(line: &str) -> bool {
    let lower = line.to_lowercase();
    BOILERPLATE_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// Markdown structure that never carries lyrics: headings, images, bulleted
/// link items, table rows, rules.
fn is_markup_chrome(line: &str) -> bool {
    if line.starts_with('#') || line.starts_with("![") || line.starts_with('|') {
        return true;
    }
    if line.chars().all(|c| matches!(c, '-' | '*' | '_' | '=' | ' ')) {
        return true;
    }
    let link_item = ["* [", "- [", "+ ["].iter().any(|p| line.starts_with(p));
    link_item && line.ends_with(')')
}

/// `[text](url)` becomes `text`; annotated lyric lines stay content.
fn unwrap_links(line: &str) -> Cow<'_, str> {
    INLINE_LINK_RE.replace_all(line, "$1")
}
