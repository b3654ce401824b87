//! Registration-index protocol client.
//!
//! Resolution walks the hierarchy: fetch the per-id index, select the
//! pages overlapping the requested range, fan the remote page fetches out
//! concurrently (inline pages complete immediately), decode every leaf,
//! and return the deduplicated result set. A 404 on the index means the
//! package does not exist; a 404 on a page the index pointed to is a
//! protocol violation.
//!
//! # Examples
//!
//! ```no_run
//! use nupkg_core::{CancellationToken, JsonClient, SessionCache, VersionRange};
//! use nupkg_registration::RegistrationClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = RegistrationClient::new(
//!         Arc::new(JsonClient::new()),
//!         "https://api.nuget.org/v3/registration5-gz-semver2",
//!     );
//!
//!     let cache = SessionCache::new();
//!     let range = VersionRange::all().with_prerelease(true);
//!     let infos = client
//!         .resolve("newtonsoft.json", &range, &cache, &CancellationToken::new())
//!         .await
//!         .unwrap();
//!     println!("{} versions", infos.len());
//! }
//! ```

use crate::entry::decode_entry;
use crate::pages::select_pages;
use crate::types::{RegistrationIndex, RegistrationLeaf, RegistrationPage};
use futures::future::join_all;
use nupkg_core::{
    CancellationToken, DependencyInfo, JsonClient, PackageIdentity, ResolveError, Result,
    SessionCache, VersionRange,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Client for a paged registration index.
///
/// Holds the shared HTTP layer and the registration base URL; all per-call
/// state lives in the [`SessionCache`] the caller passes in.
#[derive(Clone)]
pub struct RegistrationClient {
    client: Arc<JsonClient>,
    base_url: String,
}

impl RegistrationClient {
    /// Creates a client rooted at `base_url` (trailing slash tolerated).
    pub fn new(client: Arc<JsonClient>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    /// Registration index URL for a package id.
    ///
    /// Ids are lowercased (the index is keyed by lowercase id) and
    /// URL-encoded.
    pub fn index_url(&self, id: &str) -> String {
        format!(
            "{}/{}/index.json",
            self.base_url,
            urlencoding::encode(&id.to_ascii_lowercase())
        )
    }

    /// Resolves every listed version of `id` matching `range`.
    ///
    /// Returns the empty set when the index itself is absent (404). The
    /// result is a set under [`PackageIdentity`] equality with no ordering
    /// guarantee.
    ///
    /// # Errors
    ///
    /// The first terminal error aborts the call and no partial results are
    /// returned:
    ///
    /// - [`ResolveError::Transport`] for network failures and unexpected
    ///   statuses
    /// - [`ResolveError::BadDocument`] for schema violations, including a
    ///   page 404 after the index referenced it
    /// - [`ResolveError::BadVersion`] for malformed page bounds
    /// - [`ResolveError::Cancelled`] when the token fires
    pub async fn resolve(
        &self,
        id: &str,
        range: &VersionRange,
        cache: &SessionCache,
        cancel: &CancellationToken,
    ) -> Result<Vec<DependencyInfo>> {
        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        let index_url = self.index_url(id);
        let Some(doc) = self.client.fetch(&index_url, cache, cancel).await? else {
            tracing::debug!("registration index absent for '{}'", id);
            return Ok(Vec::new());
        };

        let index: RegistrationIndex = serde_json::from_value((*doc).clone())
            .map_err(|e| ResolveError::bad_document(&index_url, e.to_string()))?;

        let selected = select_pages(&index, range)?;
        tracing::debug!(
            "'{}': {} of {} pages required for {}",
            id,
            selected.len(),
            index.items.len(),
            range
        );

        let pending: Vec<_> = selected
            .iter()
            .filter(|slot| slot.items.is_none())
            .map(|slot| self.fetch_page(slot.url.clone(), cache, cancel))
            .collect();
        let fetched = join_all(pending).await;

        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for slot in &selected {
            if let Some(leaves) = &slot.items {
                collect_entries(leaves, range, &index_url, cancel, &mut seen, &mut results)?;
            }
        }
        for outcome in fetched {
            let (url, page) = outcome?;
            collect_entries(&page.items, range, &url, cancel, &mut seen, &mut results)?;
        }

        Ok(results)
    }

    /// Fetches one remote page. At this tier the document must exist: the
    /// index just told us it does.
    async fn fetch_page(
        &self,
        url: String,
        cache: &SessionCache,
        cancel: &CancellationToken,
    ) -> Result<(String, RegistrationPage)> {
        let Some(doc) = self.client.fetch(&url, cache, cancel).await? else {
            return Err(ResolveError::bad_document(
                &url,
                "registration page referenced by the index returned 404",
            ));
        };

        let page: RegistrationPage = serde_json::from_value((*doc).clone())
            .map_err(|e| ResolveError::bad_document(&url, e.to_string()))?;
        Ok((url, page))
    }
}

fn collect_entries(
    leaves: &[RegistrationLeaf],
    range: &VersionRange,
    context_url: &str,
    cancel: &CancellationToken,
    seen: &mut HashSet<PackageIdentity>,
    results: &mut Vec<DependencyInfo>,
) -> Result<()> {
    for leaf in leaves {
        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }
        if let Some(info) = decode_entry(&leaf.catalog_entry, range, context_url)? {
            if seen.insert(info.identity.clone()) {
                results.push(info);
            }
        }
    }
    Ok(())
}
