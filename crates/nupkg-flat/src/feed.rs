//! The flat-listing feed abstraction.
//!
//! A flat feed is non-paged: one call returns every version it knows for a
//! package id. Feeds are discovered and constructed by the host; this
//! crate only defines the seam and the raw record shape the adapter
//! consumes.

use async_trait::async_trait;
use nupkg_core::{FrameworkTag, PackageDependency, Result, Version};

/// One version record as returned by a flat feed.
#[derive(Debug, Clone)]
pub struct FlatPackage {
    pub id: String,
    pub version: Version,
    pub dependency_sets: Vec<FlatDependencySet>,
}

/// A dependency set scoped to an optional target framework.
///
/// `None` means the set applies to every framework and maps to the `any`
/// framework tag during conversion.
#[derive(Debug, Clone)]
pub struct FlatDependencySet {
    pub target_framework: Option<FrameworkTag>,
    pub dependencies: Vec<PackageDependency>,
}

/// A non-paged package listing service.
///
/// Implementors return raw [`FlatPackage`] records; the adapter in this
/// crate converts them into the uniform dependency descriptors and wraps
/// failures with query context.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use nupkg_core::{Result, Version};
/// use nupkg_flat::{FlatFeed, FlatPackage};
///
/// struct EmptyFeed;
///
/// #[async_trait]
/// impl FlatFeed for EmptyFeed {
///     fn source_url(&self) -> &str {
///         "https://feed.test/api/v2"
///     }
///
///     async fn find_package(&self, _id: &str, _version: &Version) -> Result<Option<FlatPackage>> {
///         Ok(None)
///     }
///
///     async fn find_packages(&self, _id: &str) -> Result<Vec<FlatPackage>> {
///         Ok(vec![])
///     }
/// }
/// ```
#[async_trait]
pub trait FlatFeed: Send + Sync {
    /// URL of the backing feed, used in error messages.
    fn source_url(&self) -> &str;

    /// Looks up exactly one `(id, version)` record.
    async fn find_package(&self, id: &str, version: &Version) -> Result<Option<FlatPackage>>;

    /// Lists every version record for `id`, including pre-release.
    async fn find_packages(&self, id: &str) -> Result<Vec<FlatPackage>>;
}
