//! Version ranges in bracket interval notation.
//!
//! The grammar mirrors the feed ecosystem's convention: a bare version
//! (`1.0`) is an inclusive minimum with no upper bound, `[1.0]` matches
//! exactly one version, and bracket pairs express intervals with per-bound
//! inclusivity (`[1.0, 2.0)`, `(, 2.0]`). An absent bound is unbounded.

use crate::error::{ResolveError, Result};
use crate::version::Version;
use std::fmt;

/// A bounded or half-bounded interval over [`Version`]s.
///
/// `include_prerelease` gates membership: when `false`, a pre-release
/// version never satisfies the range even if it lies inside the bounds.
///
/// # Examples
///
/// ```
/// use nupkg_core::{Version, VersionRange};
///
/// let range = VersionRange::parse("[1.0.0, 2.0.0)").unwrap();
/// assert!(range.satisfies(&Version::parse("1.5.0").unwrap()));
/// assert!(!range.satisfies(&Version::parse("2.0.0").unwrap()));
///
/// // Pre-release versions are excluded until opted in.
/// let pre = Version::parse("1.5.0-rc.1").unwrap();
/// assert!(!range.satisfies(&pre));
/// assert!(range.with_prerelease(true).satisfies(&pre));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    lower: Option<Version>,
    lower_inclusive: bool,
    upper: Option<Version>,
    upper_inclusive: bool,
    include_prerelease: bool,
}

impl VersionRange {
    /// Builds a range from explicit bounds. Pre-release inclusion defaults
    /// to off.
    pub fn new(
        lower: Option<Version>,
        lower_inclusive: bool,
        upper: Option<Version>,
        upper_inclusive: bool,
    ) -> Self {
        Self {
            lower,
            lower_inclusive,
            upper,
            upper_inclusive,
            include_prerelease: false,
        }
    }

    /// The range matching every version.
    pub fn all() -> Self {
        Self::new(None, false, None, false)
    }

    /// The range matching exactly `version`.
    pub fn exact(version: Version) -> Self {
        Self::new(Some(version.clone()), true, Some(version), true)
    }

    /// Parses interval notation.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::BadRange`] for mismatched brackets, more
    /// than two bound positions, an exclusive single-version range
    /// (`(1.0)`), or a bound that is not a valid version.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ResolveError::bad_range(input, "empty range string"));
        }

        let open = trimmed.chars().next();
        if open != Some('[') && open != Some('(') {
            // Bare version: inclusive minimum, unbounded above.
            let version = parse_bound(trimmed, input)?;
            return Ok(Self::new(Some(version), true, None, false));
        }

        let lower_inclusive = open == Some('[');
        let upper_inclusive = match trimmed.chars().last() {
            Some(']') => true,
            Some(')') => false,
            _ => return Err(ResolveError::bad_range(input, "missing closing bracket")),
        };

        let inner = &trimmed[1..trimmed.len() - 1];
        let bounds: Vec<&str> = inner.split(',').map(str::trim).collect();
        match bounds.as_slice() {
            [single] => {
                if !lower_inclusive || !upper_inclusive {
                    return Err(ResolveError::bad_range(
                        input,
                        "single-version range must use inclusive brackets",
                    ));
                }
                let version = parse_bound(single, input)?;
                Ok(Self::exact(version))
            }
            [lower, upper] => {
                let lower = if lower.is_empty() {
                    None
                } else {
                    Some(parse_bound(lower, input)?)
                };
                let upper = if upper.is_empty() {
                    None
                } else {
                    Some(parse_bound(upper, input)?)
                };
                Ok(Self::new(lower, lower_inclusive, upper, upper_inclusive))
            }
            _ => Err(ResolveError::bad_range(input, "too many bounds")),
        }
    }

    /// Whether `version` is a member of this range.
    pub fn satisfies(&self, version: &Version) -> bool {
        if version.is_prerelease() && !self.include_prerelease {
            return false;
        }
        if let Some(lower) = &self.lower {
            if version < lower || (version == lower && !self.lower_inclusive) {
                return false;
            }
        }
        if let Some(upper) = &self.upper {
            if version > upper || (version == upper && !self.upper_inclusive) {
                return false;
            }
        }
        true
    }

    /// Returns a copy with pre-release inclusion set to `include`.
    pub fn with_prerelease(&self, include: bool) -> Self {
        Self {
            include_prerelease: include,
            ..self.clone()
        }
    }

    pub fn has_both_bounds(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }

    pub fn lower(&self) -> Option<&Version> {
        self.lower.as_ref()
    }

    pub fn upper(&self) -> Option<&Version> {
        self.upper.as_ref()
    }

    pub fn lower_inclusive(&self) -> bool {
        self.lower_inclusive
    }

    pub fn upper_inclusive(&self) -> bool {
        self.upper_inclusive
    }

    pub fn include_prerelease(&self) -> bool {
        self.include_prerelease
    }
}

fn parse_bound(bound: &str, whole: &str) -> Result<Version> {
    Version::parse(bound)
        .map_err(|e| ResolveError::bad_range(whole, format!("invalid bound '{bound}': {e}")))
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.lower, &self.upper) {
            (Some(lower), Some(upper))
                if lower == upper && self.lower_inclusive && self.upper_inclusive =>
            {
                write!(f, "[{lower}]")
            }
            _ => {
                write!(f, "{}", if self.lower_inclusive { '[' } else { '(' })?;
                if let Some(lower) = &self.lower {
                    write!(f, "{lower}")?;
                }
                write!(f, ", ")?;
                if let Some(upper) = &self.upper {
                    write!(f, "{upper}")?;
                }
                write!(f, "{}", if self.upper_inclusive { ']' } else { ')' })
            }
        }
    }
}
