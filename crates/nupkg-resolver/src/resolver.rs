//! The capability facade: one query surface, two protocol back-ends.

use nupkg_core::{
    CancellationToken, DependencyInfo, JsonClient, PackageIdentity, ResolveError, Result,
    SessionCache, Version, VersionRange,
};
use nupkg_flat::{FlatFeed, FlatResolver};
use nupkg_registration::RegistrationClient;
use std::sync::Arc;

/// What a package source advertises, as discovered by the host.
///
/// Service-index discovery itself happens upstream; the facade only
/// consumes its outcome.
#[derive(Clone, Default)]
pub struct SourceCapabilities {
    /// Base URL of a paged registration index, when the source has one.
    pub registration_base: Option<String>,
    /// Handle to a flat listing feed, for legacy sources.
    pub flat_feed: Option<Arc<dyn FlatFeed>>,
}

enum Backend {
    Registration(RegistrationClient),
    Flat(FlatResolver),
}

/// Uniform dependency-metadata resolver for one package source.
///
/// Construction probes the source's capabilities: a registration base
/// selects the paged protocol, otherwise a flat feed is adapted. Each
/// public call builds a fresh [`SessionCache`] that dies with the call, on
/// every exit path.
///
/// # Examples
///
/// ```no_run
/// use nupkg_core::{CancellationToken, JsonClient};
/// use nupkg_resolver::{DependencyInfoResolver, SourceCapabilities};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() {
///     let resolver = DependencyInfoResolver::probe(
///         Arc::new(JsonClient::new()),
///         SourceCapabilities {
///             registration_base: Some(
///                 "https://api.nuget.org/v3/registration5-gz-semver2".into(),
///             ),
///             flat_feed: None,
///         },
///     )
///     .unwrap();
///
///     let infos = resolver
///         .resolve_all("serilog", &CancellationToken::new())
///         .await
///         .unwrap();
///     println!("{} versions", infos.len());
/// }
/// ```
pub struct DependencyInfoResolver {
    backend: Backend,
}

impl DependencyInfoResolver {
    /// Builds a resolver for whichever protocol the source supports.
    ///
    /// # Errors
    ///
    /// [`ResolveError::InvalidArgument`] when the source advertises
    /// neither capability.
    pub fn probe(client: Arc<JsonClient>, capabilities: SourceCapabilities) -> Result<Self> {
        if let Some(base) = capabilities.registration_base {
            tracing::debug!("source supports the registration protocol: {}", base);
            return Ok(Self {
                backend: Backend::Registration(RegistrationClient::new(client, base)),
            });
        }
        if let Some(feed) = capabilities.flat_feed {
            tracing::debug!("source falls back to flat listing: {}", feed.source_url());
            return Ok(Self {
                backend: Backend::Flat(FlatResolver::new(feed)),
            });
        }
        Err(ResolveError::InvalidArgument(
            "source advertises neither a registration index nor a flat listing".into(),
        ))
    }

    /// Fetches metadata for exactly one release, or `None` when the source
    /// does not know it.
    ///
    /// # Errors
    ///
    /// [`ResolveError::InvalidArgument`] for an empty id before any
    /// network I/O; otherwise whatever the underlying protocol surfaces.
    pub async fn resolve_one(
        &self,
        identity: &PackageIdentity,
        cancel: &CancellationToken,
    ) -> Result<Option<DependencyInfo>> {
        validate_id(&identity.id)?;
        match &self.backend {
            Backend::Registration(client) => {
                let cache = SessionCache::new();
                // The singleton range must admit pre-release: an exact
                // lookup of a pre-release version is still an exact lookup.
                let range = VersionRange::exact(identity.version.clone()).with_prerelease(true);
                let mut found = client.resolve(&identity.id, &range, &cache, cancel).await?;
                Ok(if found.is_empty() {
                    None
                } else {
                    Some(found.swap_remove(0))
                })
            }
            Backend::Flat(flat) => flat.resolve_one(identity, cancel).await,
        }
    }

    /// Parses `version` and resolves the release it names.
    ///
    /// # Errors
    ///
    /// [`ResolveError::BadVersion`] before any network call when the
    /// version string does not parse; otherwise as [`Self::resolve_one`].
    pub async fn resolve_one_str(
        &self,
        id: &str,
        version: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<DependencyInfo>> {
        validate_id(id)?;
        let version = Version::parse(version)?;
        self.resolve_one(&PackageIdentity::new(id, version), cancel)
            .await
    }

    /// Fetches metadata for every known version of `id`, pre-release
    /// included. Returns the empty set for an unknown package.
    ///
    /// # Errors
    ///
    /// [`ResolveError::InvalidArgument`] for an empty id before any
    /// network I/O; otherwise whatever the underlying protocol surfaces.
    pub async fn resolve_all(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<DependencyInfo>> {
        validate_id(id)?;
        match &self.backend {
            Backend::Registration(client) => {
                let cache = SessionCache::new();
                let range = VersionRange::all().with_prerelease(true);
                client.resolve(id, &range, &cache, cancel).await
            }
            Backend::Flat(flat) => flat.resolve_all(id, cancel).await,
        }
    }
}

fn validate_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(ResolveError::InvalidArgument(
            "package id must not be empty".into(),
        ));
    }
    Ok(())
}
