//! Package identity and dependency descriptor types.
//!
//! These are immutable value types: a resolver builds them once from a
//! remote document and callers only read them. Dependency edges are plain
//! descriptors (id + range), never pointers to other resolved packages, so
//! cyclic package graphs stay representable as acyclic values.

use crate::framework::FrameworkTag;
use crate::range::VersionRange;
use crate::version::Version;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The pair (id, version) naming one package release.
///
/// Ids compare and hash case-insensitively but the textual form is
/// preserved — the server's casing is canonical. Version equality ignores
/// build metadata.
///
/// # Examples
///
/// ```
/// use nupkg_core::{PackageIdentity, Version};
///
/// let a = PackageIdentity::new("Serilog", Version::parse("2.10.0").unwrap());
/// let b = PackageIdentity::new("serilog", Version::parse("2.10.0+build.5").unwrap());
/// assert_eq!(a, b);
/// assert_eq!(a.id, "Serilog");
/// ```
#[derive(Debug, Clone)]
pub struct PackageIdentity {
    pub id: String,
    pub version: Version,
}

impl PackageIdentity {
    pub fn new(id: impl Into<String>, version: Version) -> Self {
        Self {
            id: id.into(),
            version,
        }
    }
}

impl PartialEq for PackageIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.id.eq_ignore_ascii_case(&other.id) && self.version == other.version
    }
}

impl Eq for PackageIdentity {}

impl Hash for PackageIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.to_ascii_lowercase().hash(state);
        self.version.hash(state);
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.version)
    }
}

/// A direct dependency declaration. `None` range means any version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDependency {
    pub id: String,
    pub range: Option<VersionRange>,
}

impl PackageDependency {
    pub fn new(id: impl Into<String>, range: Option<VersionRange>) -> Self {
        Self {
            id: id.into(),
            range,
        }
    }
}

/// Direct dependencies scoped to one target framework.
///
/// Equality treats the dependency list as an unordered set.
#[derive(Debug, Clone, Eq)]
pub struct PackageDependencyGroup {
    pub target_framework: FrameworkTag,
    pub dependencies: Vec<PackageDependency>,
}

impl PackageDependencyGroup {
    pub fn new(target_framework: FrameworkTag, dependencies: Vec<PackageDependency>) -> Self {
        Self {
            target_framework,
            dependencies,
        }
    }
}

impl PartialEq for PackageDependencyGroup {
    fn eq(&self, other: &Self) -> bool {
        self.target_framework == other.target_framework
            && self.dependencies.len() == other.dependencies.len()
            && self.dependencies.iter().all(|d| other.dependencies.contains(d))
            && other.dependencies.iter().all(|d| self.dependencies.contains(d))
    }
}

/// One package release together with every dependency group it declares.
///
/// Equality requires equal identities and groups that match as unordered
/// sets; hashing uses the identity alone, so a `HashSet<DependencyInfo>`
/// behaves as a set keyed by release.
#[derive(Debug, Clone, Eq)]
pub struct DependencyInfo {
    pub identity: PackageIdentity,
    pub groups: Vec<PackageDependencyGroup>,
}

impl DependencyInfo {
    pub fn new(identity: PackageIdentity, groups: Vec<PackageDependencyGroup>) -> Self {
        Self { identity, groups }
    }
}

impl PartialEq for DependencyInfo {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
            && self.groups.len() == other.groups.len()
            && self.groups.iter().all(|g| other.groups.contains(g))
            && other.groups.iter().all(|g| self.groups.contains(g))
    }
}

impl Hash for DependencyInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

/// Orders a result set by `(id, version)` for callers that need stable
/// output; the resolvers themselves guarantee no ordering.
pub fn sort_dependency_infos(infos: &mut [DependencyInfo]) {
    infos.sort_by(|a, b| {
        a.identity
            .id
            .to_ascii_lowercase()
            .cmp(&b.identity.id.to_ascii_lowercase())
            .then_with(|| a.identity.version.cmp(&b.identity.version))
    });
}
