//! Target framework tokens and the caller-side group reducer.

use crate::types::PackageDependencyGroup;
use std::fmt;

/// An opaque target-framework token.
///
/// Monikers are case-insensitive; the token normalizes to ASCII lowercase
/// on construction so equality and hashing are structural. The reserved
/// `any` token matches dependency groups that apply to every framework.
///
/// # Examples
///
/// ```
/// use nupkg_core::FrameworkTag;
///
/// assert_eq!(FrameworkTag::parse("NET6.0"), FrameworkTag::parse("net6.0"));
/// assert!(FrameworkTag::parse("").is_any());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameworkTag(String);

const ANY_MONIKER: &str = "any";

impl FrameworkTag {
    /// The framework-agnostic token.
    pub fn any() -> Self {
        Self(ANY_MONIKER.to_string())
    }

    /// Parses a moniker. Blank input maps to the `any` framework.
    pub fn parse(moniker: &str) -> Self {
        let normalized = moniker.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            Self::any()
        } else {
            Self(normalized)
        }
    }

    pub fn is_any(&self) -> bool {
        self.0 == ANY_MONIKER
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameworkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Picks the dependency group a consumer targeting `target` should use:
/// the exact moniker match if present, otherwise the `any` group.
///
/// The resolvers never call this; they return every declared group and
/// leave framework selection to the caller.
///
/// # Examples
///
/// ```
/// use nupkg_core::{nearest_framework, FrameworkTag, PackageDependencyGroup};
///
/// let groups = vec![
///     PackageDependencyGroup::new(FrameworkTag::any(), vec![]),
///     PackageDependencyGroup::new(FrameworkTag::parse("net6.0"), vec![]),
/// ];
///
/// let picked = nearest_framework(&groups, &FrameworkTag::parse("net6.0")).unwrap();
/// assert_eq!(picked.target_framework.as_str(), "net6.0");
/// ```
pub fn nearest_framework<'a>(
    groups: &'a [PackageDependencyGroup],
    target: &FrameworkTag,
) -> Option<&'a PackageDependencyGroup> {
    groups
        .iter()
        .find(|group| group.target_framework == *target)
        .or_else(|| groups.iter().find(|group| group.target_framework.is_any()))
}
