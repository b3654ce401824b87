//! Page selection: which index slots must be materialized for a query.
//!
//! The selector widens the query to include pre-release versions, because
//! a pre-release-bounded page can still hold listed versions the caller
//! wants; the per-entry decoder applies the caller's real pre-release
//! preference afterwards. Selection is deliberately inclusive: a page that
//! merely shares a boundary version with the query is fetched, and the
//! decoder remains the source of truth for final membership.

use crate::types::{RegistrationIndex, RegistrationPageInfo};
use nupkg_core::{Result, Version, VersionRange};

/// Selects the index slots whose pages may contain versions in `range`.
///
/// Decision rule per slot with inclusive page interval `[lower, upper]`:
/// - both query bounds present: required iff the page contains either
///   bound;
/// - otherwise: required iff the widened query is satisfied by the page's
///   lower or upper bound. A query with no bounds therefore selects every
///   page.
///
/// # Errors
///
/// Returns [`nupkg_core::ResolveError::BadVersion`] when a slot's `lower`
/// or `upper` string does not parse.
pub(crate) fn select_pages<'a>(
    index: &'a RegistrationIndex,
    range: &VersionRange,
) -> Result<Vec<&'a RegistrationPageInfo>> {
    let query = range.with_prerelease(true);

    let mut selected = Vec::new();
    for slot in &index.items {
        let lower = Version::parse(&slot.lower)?;
        let upper = Version::parse(&slot.upper)?;
        if page_required(&query, &lower, &upper) {
            selected.push(slot);
        }
    }
    Ok(selected)
}

fn page_required(query: &VersionRange, lower: &Version, upper: &Version) -> bool {
    match (query.lower(), query.upper()) {
        (Some(lo), Some(hi)) => page_contains(lower, upper, lo) || page_contains(lower, upper, hi),
        _ => query.satisfies(lower) || query.satisfies(upper),
    }
}

fn page_contains(lower: &Version, upper: &Version, version: &Version) -> bool {
    lower <= version && version <= upper
}
