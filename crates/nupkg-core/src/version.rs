//! Package version parsing and ordering.
//!
//! Versions follow the semantic-versioning grammar with one pragmatic
//! extension: up to four numeric components are accepted (`1.2.3.4`), and
//! missing trailing components default to zero, so `1.0` parses as
//! `1.0.0.0`. Pre-release identifiers compare per semver precedence but
//! case-insensitively; build metadata is carried for display and ignored by
//! comparison and hashing.

use crate::error::{ResolveError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A package version with up to four numeric components.
///
/// # Examples
///
/// ```
/// use nupkg_core::Version;
///
/// let stable = Version::parse("1.2.3").unwrap();
/// let pre = Version::parse("1.2.3-beta.1").unwrap();
///
/// assert!(pre < stable);
/// assert!(pre.is_prerelease());
///
/// // Build metadata is ignored by comparison.
/// let tagged = Version::parse("1.2.3+build.7").unwrap();
/// assert_eq!(stable, tagged);
/// ```
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    revision: u64,
    release: Vec<String>,
    metadata: Option<String>,
}

impl Version {
    /// Creates a stable three-part version.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            revision: 0,
            release: Vec::new(),
            metadata: None,
        }
    }

    /// Parses a version string.
    ///
    /// Accepts one to four dot-separated numeric components, an optional
    /// `-`-prefixed pre-release tag, and optional `+`-prefixed build
    /// metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::BadVersion`] when the input is empty, a
    /// numeric component is not a decimal integer, more than four numeric
    /// components are present, or a pre-release/metadata segment is empty
    /// or contains characters outside `[0-9A-Za-z-]`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ResolveError::bad_version(input, "empty version string"));
        }

        let (rest, metadata) = match trimmed.split_once('+') {
            Some((head, meta)) => (head, Some(meta)),
            None => (trimmed, None),
        };
        if let Some(meta) = metadata {
            if meta.is_empty() || !meta.split('.').all(is_valid_identifier) {
                return Err(ResolveError::bad_version(input, "invalid build metadata"));
            }
        }

        let (numeric, release) = match rest.split_once('-') {
            Some((head, rel)) => (head, Some(rel)),
            None => (rest, None),
        };

        let mut parts = [0u64; 4];
        let mut count = 0;
        for piece in numeric.split('.') {
            if count == 4 {
                return Err(ResolveError::bad_version(
                    input,
                    "more than four numeric components",
                ));
            }
            if piece.is_empty() || !piece.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ResolveError::bad_version(
                    input,
                    format!("invalid numeric component '{piece}'"),
                ));
            }
            parts[count] = piece.parse().map_err(|_| {
                ResolveError::bad_version(input, format!("numeric component '{piece}' out of range"))
            })?;
            count += 1;
        }

        let release = match release {
            None => Vec::new(),
            Some(rel) => rel
                .split('.')
                .map(|ident| {
                    if is_valid_identifier(ident) {
                        Ok(ident.to_string())
                    } else {
                        Err(ResolveError::bad_version(
                            input,
                            format!("invalid pre-release identifier '{ident}'"),
                        ))
                    }
                })
                .collect::<Result<Vec<_>>>()?,
        };

        Ok(Self {
            major: parts[0],
            minor: parts[1],
            patch: parts[2],
            revision: parts[3],
            release,
            metadata: metadata.map(str::to_string),
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Fourth numeric component; zero unless the source used four parts.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Pre-release identifiers in original casing; empty for stable versions.
    pub fn release(&self) -> &[String] {
        &self.release
    }

    /// Build metadata, if any. Never participates in comparison.
    pub fn metadata(&self) -> Option<&str> {
        self.metadata.as_deref()
    }

    pub fn is_prerelease(&self) -> bool {
        !self.release.is_empty()
    }
}

fn is_valid_identifier(ident: &str) -> bool {
    !ident.is_empty()
        && ident
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Compares pre-release identifier lists per semver precedence,
/// case-insensitively. An empty list (stable) sorts above any pre-release.
fn compare_release(a: &[String], b: &[String]) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            for (left, right) in a.iter().zip(b.iter()) {
                let ordering = compare_identifier(left, right);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            a.len().cmp(&b.len())
        }
    }
}

fn compare_identifier(a: &str, b: &str) -> Ordering {
    let numeric_a = a.bytes().all(|b| b.is_ascii_digit());
    let numeric_b = b.bytes().all(|b| b.is_ascii_digit());
    match (numeric_a, numeric_b) {
        // Numeric identifiers always have lower precedence than alphanumeric.
        (true, true) => {
            let left: u64 = a.parse().unwrap_or(u64::MAX);
            let right: u64 = b.parse().unwrap_or(u64::MAX);
            left.cmp(&right)
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()),
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch, self.revision)
            .cmp(&(other.major, other.minor, other.patch, other.revision))
            .then_with(|| compare_release(&self.release, &other.release))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.major, self.minor, self.patch, self.revision).hash(state);
        for ident in &self.release {
            // Numeric identifiers hash by value so that hashing agrees
            // with numeric comparison ("01" and "1" are equal).
            if ident.bytes().all(|b| b.is_ascii_digit()) {
                ident.parse::<u64>().unwrap_or(u64::MAX).hash(state);
            } else {
                ident.to_ascii_lowercase().hash(state);
            }
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.revision != 0 {
            write!(f, ".{}", self.revision)?;
        }
        if !self.release.is_empty() {
            write!(f, "-{}", self.release.join("."))?;
        }
        if let Some(meta) = &self.metadata {
            write!(f, "+{meta}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
