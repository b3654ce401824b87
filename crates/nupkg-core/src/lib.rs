//! Core model for NuGet-style package metadata resolution.
//!
//! This crate provides the foundations shared by both protocol clients:
//!
//! - **Version model**: [`Version`] (four-part numeric prefix, pre-release
//!   tags) and [`VersionRange`] (bracket interval notation).
//! - **Dependency model**: [`PackageIdentity`], [`PackageDependency`],
//!   [`PackageDependencyGroup`], [`DependencyInfo`].
//! - **Fetching**: [`JsonClient`] plus the per-call [`SessionCache`]
//!   memoizing parsed documents by URL.
//! - **Errors**: the workspace-wide [`ResolveError`] and [`Result`] alias.
//!
//! # Examples
//!
//! ```
//! use nupkg_core::{Version, VersionRange};
//!
//! let range = VersionRange::parse("[1.0, 2.0)").unwrap();
//! assert!(range.satisfies(&Version::parse("1.4.2").unwrap()));
//! ```

pub mod error;
pub mod fetch;
pub mod framework;
pub mod range;
pub mod types;
pub mod version;

pub use error::{ResolveError, Result};
pub use fetch::{JsonClient, SessionCache};
pub use framework::{nearest_framework, FrameworkTag};
pub use range::VersionRange;
pub use types::{
    sort_dependency_infos, DependencyInfo, PackageDependency, PackageDependencyGroup,
    PackageIdentity,
};
pub use version::Version;

// Re-exported so downstream crates agree on one cancellation type.
pub use tokio_util::sync::CancellationToken;
