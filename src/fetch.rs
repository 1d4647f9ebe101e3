//! Fragment fetching over HTTP.
//!
//! The fetcher is a trait so decoration logic never touches the network
//! directly; tests substitute an in-memory implementation.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;
use url::Url;

/// Boxed future returned by [`Fetcher::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = FetchResult> + Send + 'a>>;

pub type FetchResult = Result<Option<String>, FetchError>;

/// Transport-level fetch errors.
///
/// A non-2xx status is not an error; it is `Ok(None)` (fragment-not-found).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Source of fragment documents.
pub trait Fetcher: Send + Sync {
    /// Fetch the body at `url`.
    ///
    /// Returns `Ok(None)` when the server answers with a non-success status.
    /// No retry, no caching: two calls with the same URL are two requests.
    fn fetch(&self, url: Url) -> FetchFuture<'_>;
}

/// HTTP fetcher backed by a shared reqwest client.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: Url) -> FetchFuture<'_> {
        Box::pin(async move {
            let response = self.client.get(url).send().await?;
            if !response.status().is_success() {
                return Ok(None);
            }
            Ok(Some(response.text().await?))
        })
    }
}

// =============================================================================
// Test fetcher
// =============================================================================

/// In-memory fetcher keyed by full URL. Unknown URLs behave like a 404.
#[cfg(test)]
pub struct StaticFetcher {
    pages: rustc_hash::FxHashMap<String, String>,
}

#[cfg(test)]
impl StaticFetcher {
    pub fn new() -> Self {
        Self {
            pages: rustc_hash::FxHashMap::default(),
        }
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }
}

#[cfg(test)]
impl Fetcher for StaticFetcher {
    fn fetch(&self, url: Url) -> FetchFuture<'_> {
        let body = self.pages.get(url.as_str()).cloned();
        Box::pin(async move { Ok(body) })
    }
}

// =============================================================================
// Tests
// =============================================================================
