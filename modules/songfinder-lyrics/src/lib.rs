pub mod extract;
pub mod finder;
pub mod normalize;
pub mod providers;
pub mod query;
mod readability;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use extract::{extract, LyricsBlock};
pub use finder::{FinderSettings, LyricsFinder};
pub use normalize::{clean_title, normalize, MAX_LYRICS_CHARS, MIN_LYRICS_CHARS};
pub use providers::{FirecrawlSearcher, LrclibLookup};
pub use query::{ParsedQuery, SearchQuery};
pub use traits::{LyricsLookup, PageSearcher, ProviderError};
