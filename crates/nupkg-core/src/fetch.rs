//! JSON fetching with per-call session memoization.
//!
//! A [`SessionCache`] lives for exactly one top-level resolver call: the
//! facade creates it on entry and drops it on return, so nothing is shared
//! across calls. Within the call, every URL is fetched at most once; pages
//! shared between registration sub-queries come back from the map without
//! further network I/O.

use crate::error::{ResolveError, Result};
use dashmap::DashMap;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Per-call memoization of parsed JSON documents, keyed by URL.
///
/// Concurrent readers and writers are safe; each URL is written once and
/// the first writer wins. 404 responses are never stored.
///
/// # Examples
///
/// ```
/// use nupkg_core::SessionCache;
///
/// let cache = SessionCache::new();
/// assert!(cache.is_empty());
/// assert!(cache.get("https://example.test/index.json").is_none());
/// ```
#[derive(Debug, Default)]
pub struct SessionCache {
    entries: DashMap<String, Arc<Value>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Returns the stored document for `url`, if any.
    pub fn get(&self, url: &str) -> Option<Arc<Value>> {
        self.entries.get(url).map(|entry| Arc::clone(&entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// HTTP client returning parsed JSON documents.
///
/// A thin wrapper around `reqwest::Client`; cheap to clone and safe to
/// share. The interesting state lives in the [`SessionCache`] passed to
/// each call.
#[derive(Debug, Clone)]
pub struct JsonClient {
    client: Client,
}

impl JsonClient {
    /// Creates a client with the project user agent and a 30-second
    /// timeout.
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("nupkg-meta/0.1.0")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to create HTTP client");

        Self { client }
    }

    /// Wraps a caller-configured `reqwest::Client`.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches `url` as JSON, consulting and populating `cache`.
    ///
    /// A cache hit returns without network I/O. A 404 yields `Ok(None)`
    /// and is not cached — callers decide whether absence is an error at
    /// their level. Cancellation is checked before and after every
    /// suspension point; concurrent fetches of the same URL may both hit
    /// the network, but only the first parse is stored and later callers
    /// within the session observe that single document.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Transport`] for socket failures and non-2xx
    ///   statuses other than 404
    /// - [`ResolveError::BadDocument`] when a 2xx body is not valid JSON
    /// - [`ResolveError::Cancelled`] when `cancel` fires
    pub async fn fetch(
        &self,
        url: &str,
        cache: &SessionCache,
        cancel: &CancellationToken,
    ) -> Result<Option<Arc<Value>>> {
        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        if let Some(doc) = cache.get(url) {
            tracing::debug!("session cache hit: {}", url);
            return Ok(Some(doc));
        }

        tracing::debug!("fetching: {}", url);
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ResolveError::transport(url, e))?;

        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ResolveError::status(url, status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ResolveError::transport(url, e))?;

        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        let doc: Value = serde_json::from_slice(&body)
            .map_err(|e| ResolveError::bad_document(url, e.to_string()))?;

        // First writer wins; a concurrent loser discards its parse.
        let doc = cache
            .entries
            .entry(url.to_string())
            .or_insert(Arc::new(doc))
            .clone();

        Ok(Some(doc))
    }
}

impl Default for JsonClient {
    fn default() -> Self {
        Self::new()
    }
}
