//! Page decoration context.
//!
//! In the browser this state is ambient (window.location, document metadata);
//! here it is passed explicitly so decorators have no hidden coupling.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use url::Url;

use crate::fetch::{Fetcher, HttpFetcher};

/// Everything a decorator may consult about the page being decorated.
///
/// Read-only from the decorators' perspective; a context is built once per
/// page and shared across all block decorations on it.
pub struct PageContext {
    base_url: Url,
    metadata: FxHashMap<String, String>,
    max_fragment_depth: u32,
    fetcher: Arc<dyn Fetcher>,
}

impl PageContext {
    /// Nested fragment cutoff. A fragment embedding a fragment is normal;
    /// eight levels deep is a cycle.
    pub const DEFAULT_MAX_FRAGMENT_DEPTH: u32 = 8;

    /// Context for a page served from `base_url`, fetching fragments over HTTP.
    pub fn new(base_url: Url) -> Self {
        Self::with_fetcher(base_url, Arc::new(HttpFetcher::new()))
    }

    /// Context with a custom fragment source.
    pub fn with_fetcher(base_url: Url, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            base_url,
            metadata: FxHashMap::default(),
            max_fragment_depth: Self::DEFAULT_MAX_FRAGMENT_DEPTH,
            fetcher,
        }
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_fragment_depth = depth;
        self
    }

    /// Add a page metadata entry (e.g. `footer` -> `/fragments/footer`).
    pub fn insert_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Look up a page metadata value.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// URL the page was served from; fragment paths resolve against it.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn max_fragment_depth(&self) -> u32 {
        self.max_fragment_depth
    }

    pub fn fetcher(&self) -> &dyn Fetcher {
        self.fetcher.as_ref()
    }
}

// =============================================================================
// Tests
// =============================================================================
