//! Uniform dependency-metadata resolution over package feeds.
//!
//! The resolver answers two questions for a downstream dependency solver:
//! *what does this exact release depend on* ([`DependencyInfoResolver::resolve_one`])
//! and *which releases of this id exist, with their dependencies*
//! ([`DependencyInfoResolver::resolve_all`]). Two feed protocols are
//! supported behind that surface — the paged registration index and the
//! legacy flat listing — chosen at construction from the source's
//! advertised capabilities.
//!
//! The resolver never solves conflicts, never picks a framework group, and
//! never follows dependency edges; those belong to the caller.

mod resolver;

pub use resolver::{DependencyInfoResolver, SourceCapabilities};

// The building blocks, for callers that construct feeds or inspect results.
pub use nupkg_core::{
    nearest_framework, sort_dependency_infos, CancellationToken, DependencyInfo, FrameworkTag,
    JsonClient, PackageDependency, PackageDependencyGroup, PackageIdentity, ResolveError, Result,
    SessionCache, Version, VersionRange,
};
pub use nupkg_flat::{FlatDependencySet, FlatFeed, FlatPackage, FlatResolver};
pub use nupkg_registration::RegistrationClient;
