//! Adapter turning a flat feed into the uniform resolver result shape.

use crate::feed::{FlatFeed, FlatPackage};
use nupkg_core::{
    CancellationToken, DependencyInfo, FrameworkTag, PackageDependencyGroup, PackageIdentity,
    ResolveError, Result,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Thin resolver over a [`FlatFeed`].
///
/// Every underlying failure is wrapped as [`ResolveError::Protocol`] so
/// the surfaced error names the package query and the source URL.
#[derive(Clone)]
pub struct FlatResolver {
    feed: Arc<dyn FlatFeed>,
}

impl FlatResolver {
    pub fn new(feed: Arc<dyn FlatFeed>) -> Self {
        Self { feed }
    }

    pub fn source_url(&self) -> &str {
        self.feed.source_url()
    }

    /// Fetches metadata for exactly one release.
    ///
    /// # Errors
    ///
    /// [`ResolveError::Protocol`] wrapping the feed's failure, or
    /// [`ResolveError::Cancelled`].
    pub async fn resolve_one(
        &self,
        identity: &PackageIdentity,
        cancel: &CancellationToken,
    ) -> Result<Option<DependencyInfo>> {
        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        let found = self
            .feed
            .find_package(&identity.id, &identity.version)
            .await
            .map_err(|e| self.wrap(format!("'{identity}'"), e))?;

        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }
        Ok(found.map(to_dependency_info))
    }

    /// Fetches metadata for every known version of `id`.
    ///
    /// The result is deduplicated per release, matching the paged
    /// protocol's set semantics.
    ///
    /// # Errors
    ///
    /// [`ResolveError::Protocol`] wrapping the feed's failure, or
    /// [`ResolveError::Cancelled`].
    pub async fn resolve_all(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<DependencyInfo>> {
        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        let packages = self
            .feed
            .find_packages(id)
            .await
            .map_err(|e| self.wrap(format!("'{id}'"), e))?;

        let mut seen = HashSet::new();
        let mut results = Vec::new();
        for package in packages {
            if cancel.is_cancelled() {
                return Err(ResolveError::Cancelled);
            }
            let info = to_dependency_info(package);
            if seen.insert(info.identity.clone()) {
                results.push(info);
            }
        }
        Ok(results)
    }

    fn wrap(&self, query: String, source: ResolveError) -> ResolveError {
        // Cancellation is the caller's doing, not a feed failure.
        if matches!(source, ResolveError::Cancelled) {
            return source;
        }
        tracing::warn!("flat feed failed for {}: {}", query, source);
        ResolveError::protocol(query, self.feed.source_url(), source)
    }
}

fn to_dependency_info(package: FlatPackage) -> DependencyInfo {
    let groups = package
        .dependency_sets
        .into_iter()
        .map(|set| {
            PackageDependencyGroup::new(
                set.target_framework.unwrap_or_else(FrameworkTag::any),
                set.dependencies,
            )
        })
        .collect();

    DependencyInfo::new(PackageIdentity::new(package.id, package.version), groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FlatDependencySet;
    use async_trait::async_trait;
    use nupkg_core::{PackageDependency, Version, VersionRange};

    /// In-memory feed fixture.
    struct StaticFeed {
        packages: Vec<FlatPackage>,
        fail: bool,
    }

    impl StaticFeed {
        fn new(packages: Vec<FlatPackage>) -> Self {
            Self {
                packages,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                packages: vec![],
                fail: true,
            }
        }
    }

    #[async_trait]
    impl FlatFeed for StaticFeed {
        fn source_url(&self) -> &str {
            "https://feed.test/api/v2"
        }

        async fn find_package(&self, id: &str, version: &Version) -> Result<Option<FlatPackage>> {
            if self.fail {
                return Err(ResolveError::transport(
                    "https://feed.test/api/v2",
                    std::io::Error::other("connection refused"),
                ));
            }
            Ok(self
                .packages
                .iter()
                .find(|p| p.id.eq_ignore_ascii_case(id) && p.version == *version)
                .cloned())
        }

        async fn find_packages(&self, id: &str) -> Result<Vec<FlatPackage>> {
            if self.fail {
                return Err(ResolveError::transport(
                    "https://feed.test/api/v2",
                    std::io::Error::other("connection refused"),
                ));
            }
            Ok(self
                .packages
                .iter()
                .filter(|p| p.id.eq_ignore_ascii_case(id))
                .cloned()
                .collect())
        }
    }

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn package(id: &str, version: &str) -> FlatPackage {
        FlatPackage {
            id: id.to_string(),
            version: v(version),
            dependency_sets: vec![],
        }
    }

    fn token() -> CancellationToken {
        CancellationToken::new()
    }

    #[tokio::test]
    async fn test_resolve_one_hit() {
        let resolver = FlatResolver::new(Arc::new(StaticFeed::new(vec![package("A", "1.0.0")])));
        let identity = PackageIdentity::new("a", v("1.0.0"));

        let info = resolver.resolve_one(&identity, &token()).await.unwrap();
        assert!(info.is_some_and(|i| i.identity == identity));
    }

    #[tokio::test]
    async fn test_resolve_one_miss_is_none() {
        let resolver = FlatResolver::new(Arc::new(StaticFeed::new(vec![])));
        let identity = PackageIdentity::new("A", v("1.0.0"));

        let info = resolver.resolve_one(&identity, &token()).await.unwrap();
        assert!(info.is_none());
    }

    #[tokio::test]
    async fn test_resolve_all_converts_dependency_sets() {
        let mut pkg = package("A", "2.0.0");
        pkg.dependency_sets = vec![
            FlatDependencySet {
                target_framework: None,
                dependencies: vec![PackageDependency::new(
                    "B",
                    Some(VersionRange::parse("[1.0.0, )").unwrap()),
                )],
            },
            FlatDependencySet {
                target_framework: Some(FrameworkTag::parse("net6.0")),
                dependencies: vec![],
            },
        ];
        let resolver = FlatResolver::new(Arc::new(StaticFeed::new(vec![pkg])));

        let infos = resolver.resolve_all("A", &token()).await.unwrap();
        assert_eq!(infos.len(), 1);

        let groups = &infos[0].groups;
        assert_eq!(groups.len(), 2);
        // null target framework maps to the any framework
        assert!(groups.iter().any(|g| g.target_framework.is_any()));
        assert!(groups
            .iter()
            .any(|g| g.target_framework.as_str() == "net6.0"));
    }

    #[tokio::test]
    async fn test_resolve_all_deduplicates() {
        let resolver = FlatResolver::new(Arc::new(StaticFeed::new(vec![
            package("A", "1.0.0"),
            package("a", "1.0.0"),
            package("A", "2.0.0"),
        ])));

        let infos = resolver.resolve_all("A", &token()).await.unwrap();
        assert_eq!(infos.len(), 2);
    }

    #[tokio::test]
    async fn test_feed_failure_wrapped_with_query_and_source() {
        let resolver = FlatResolver::new(Arc::new(StaticFeed::failing()));

        let error = resolver.resolve_all("Serilog", &token()).await.unwrap_err();
        match error {
            ResolveError::Protocol {
                query, source_url, ..
            } => {
                assert_eq!(query, "'Serilog'");
                assert_eq!(source_url, "https://feed.test/api/v2");
            }
            other => panic!("expected Protocol error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancelled_before_dispatch() {
        let resolver = FlatResolver::new(Arc::new(StaticFeed::new(vec![])));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = resolver.resolve_all("A", &cancel).await;
        assert!(matches!(result, Err(ResolveError::Cancelled)));
    }
}
