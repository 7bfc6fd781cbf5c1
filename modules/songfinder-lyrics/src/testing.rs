// Test mocks for the lyrics finder.
//
// Two mocks matching the two provider boundaries:
// - MockSearcher (PageSearcher): fixed hits or a fixed error, optional delay
// - MockLookup (LyricsLookup): fixed blob, miss, or error, optional delay
//
// Both record the queries they receive so tests can assert call order and
// that a provider was never reached.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use songfinder_common::PageHit;

use crate::query::SearchQuery;
use crate::traits::{LyricsLookup, PageSearcher, ProviderError};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Five stanzas of a public-domain hymn run together, about 600 characters.
pub const AMAZING_GRACE: &str = "Amazing grace how sweet the sound
That saved a wretch like me
I once was lost but now am found
Was blind but now I see
Twas grace that taught my heart to fear
And grace my fears relieved
How precious did that grace appear
The hour I first believed
Through many dangers toils and snares
I have already come
Tis grace hath brought me safe thus far
And grace will lead me home
When we have been there ten thousand years
Bright shining as the sun
We have no less days to sing Gods praise
Than when we first begun
Yea when this flesh and heart shall fail
And mortal life shall cease
I shall possess within the veil
A life of joy and peace";

/// A scraped lyrics page: navigation, short metadata lines, the hymn, credits.
pub fn lyrics_page(lyrics: &str) -> String {
    format!(
        "# Amazing Grace\n\
         * [Home](https://hymns.example.org/)\n\
         * [Browse hymns](https://hymns.example.org/browse)\n\
         \n\
         Album: Classic Hymns\n\
         Writer: John Newton\n\
         Year: 1779\n\
         \n\
         {lyrics}\n\
         \n\
         Copyright: Public Domain\n\
         Lyrics provided by HymnSite"
    )
}

pub fn page_hit(url: &str, title: &str, raw_text: &str) -> PageHit {
    PageHit {
        url: url.to_string(),
        page_title: Some(title.to_string()),
        raw_text: raw_text.to_string(),
    }
}

// ---------------------------------------------------------------------------
// MockSearcher
// ---------------------------------------------------------------------------

pub struct MockSearcher {
    response: Result<Vec<PageHit>, ProviderError>,
    delay: Option<Duration>,
    queries: Mutex<Vec<String>>,
}

impl MockSearcher {
    pub fn returning(hits: Vec<PageHit>) -> Self {
        Self {
            response: Ok(hits),
            delay: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::returning(Vec::new())
    }

    pub fn failing(err: ProviderError) -> Self {
        Self {
            response: Err(err),
            delay: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering, to exercise the finder's timeout.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl PageSearcher for MockSearcher {
    async fn search_pages(
        &self,
        query: &str,
        _limit: usize,
        _timeout: Duration,
    ) -> Result<Vec<PageHit>, ProviderError> {
        self.queries.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone()
    }

    fn name(&self) -> &str {
        "mock-search"
    }
}

// ---------------------------------------------------------------------------
// MockLookup
// ---------------------------------------------------------------------------

pub struct MockLookup {
    response: Result<Option<String>, ProviderError>,
    delay: Option<Duration>,
    queries: Mutex<Vec<String>>,
}

impl MockLookup {
    pub fn returning(text: &str) -> Self {
        Self {
            response: Ok(Some(text.to_string())),
            delay: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn miss() -> Self {
        Self {
            response: Ok(None),
            delay: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: ProviderError) -> Self {
        Self {
            response: Err(err),
            delay: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl LyricsLookup for MockLookup {
    async fn lookup(
        &self,
        query: &SearchQuery,
        _timeout: Duration,
    ) -> Result<Option<String>, ProviderError> {
        self.queries.lock().unwrap().push(query.as_str().to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone()
    }

    fn name(&self) -> &str {
        "mock-lookup"
    }
}
