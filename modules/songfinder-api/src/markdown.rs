// Markdown rendering of search outcomes, for clients that ask for
// `Accept: text/markdown` and for the CLI.

use songfinder_common::{ErrorResponse, SearchError, SongCandidate, LOOKUP_SENTINEL_URL};

pub fn render_results(query: &str, results: &[SongCandidate]) -> String {
    let mut md = format!("# Lyrics search: {query}\n\n");
    for candidate in results {
        if candidate.url == LOOKUP_SENTINEL_URL {
            md.push_str(&format!("### {}\n\n", candidate.title));
        } else {
            md.push_str(&format!("### [{}]({})\n\n", candidate.title, candidate.url));
        }
        md.push_str(&format!("*Source: {}*\n\n", candidate.source));
        // Two trailing spaces keep each lyric line a hard line break
        md.push_str(&candidate.lyrics.lines().collect::<Vec<_>>().join("  \n"));
        md.push_str("\n\n");
    }
    md.trim_end().to_string()
}

pub fn render_error(query: Option<&str>, err: &SearchError, payload: &ErrorResponse) -> String {
    if err.is_not_found() {
        let heading = query.unwrap_or("Lyrics search");
        return format!(
            "# {heading}\n\n**Sorry, no lyrics found.**\n\nTry another song or double-check the title and artist."
        );
    }
    match &payload.details {
        Some(details) => format!("# Error\n\n{}\n\n{}", payload.error, details),
        None => format!("# Error\n\n{}", payload.error),
    }
}
