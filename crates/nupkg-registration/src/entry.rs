//! Catalog-entry decoding into [`DependencyInfo`] records.

use crate::types::{CatalogDependencyGroup, CatalogEntry};
use chrono::DateTime;
use nupkg_core::{
    DependencyInfo, FrameworkTag, PackageDependency, PackageDependencyGroup, PackageIdentity,
    ResolveError, Result, Version, VersionRange,
};

/// Publish date marking a version as unlisted, as YYYYMMDD.
const UNLISTED_SENTINEL: &str = "19000101";

/// Decodes one catalog entry against the caller's requested `range`.
///
/// Returns `Ok(None)` for entries that are filtered rather than broken:
/// unlisted versions (sentinel publish date) and versions outside the
/// range. The identity keeps the entry's own id text — the server's casing
/// is canonical, not the query's.
///
/// # Errors
///
/// Returns [`ResolveError::BadDocument`] (tagged with `context_url`, the
/// document the entry came from) when the entry's version does not parse,
/// a dependency has no id, or a dependency carries a range string that
/// does not parse. An absent dependency range is fine and means any
/// version.
pub(crate) fn decode_entry(
    entry: &CatalogEntry,
    range: &VersionRange,
    context_url: &str,
) -> Result<Option<DependencyInfo>> {
    let version = Version::parse(&entry.version).map_err(|e| {
        ResolveError::bad_document(
            context_url,
            format!("catalog entry for '{}': {e}", entry.id),
        )
    })?;

    if let Some(published) = &entry.published {
        if is_unlisted(published) {
            tracing::debug!("dropping unlisted {} {}", entry.id, version);
            return Ok(None);
        }
    }

    if !range.satisfies(&version) {
        return Ok(None);
    }

    let mut groups = Vec::new();
    if let Some(wire_groups) = &entry.dependency_groups {
        for wire in wire_groups {
            groups.push(decode_group(wire, range, context_url, &entry.id)?);
        }
    }

    Ok(Some(DependencyInfo::new(
        PackageIdentity::new(entry.id.clone(), version),
        groups,
    )))
}

fn decode_group(
    wire: &CatalogDependencyGroup,
    range: &VersionRange,
    context_url: &str,
    entry_id: &str,
) -> Result<PackageDependencyGroup> {
    let target_framework = match &wire.target_framework {
        Some(moniker) => FrameworkTag::parse(moniker),
        None => FrameworkTag::any(),
    };

    let mut dependencies = Vec::new();
    if let Some(wire_deps) = &wire.dependencies {
        for dep in wire_deps {
            let id = dep
                .id
                .as_deref()
                .filter(|id| !id.is_empty())
                .ok_or_else(|| {
                    ResolveError::bad_document(
                        context_url,
                        format!("dependency of '{entry_id}' is missing an id"),
                    )
                })?;

            let dep_range = match &dep.range {
                None => None,
                Some(raw) => {
                    let parsed = VersionRange::parse(raw).map_err(|e| {
                        ResolveError::bad_document(
                            context_url,
                            format!("dependency '{id}' of '{entry_id}': {e}"),
                        )
                    })?;
                    // The caller's pre-release preference flows into the
                    // edges it will chase next.
                    Some(parsed.with_prerelease(range.include_prerelease()))
                }
            };

            dependencies.push(PackageDependency::new(id, dep_range));
        }
    }

    Ok(PackageDependencyGroup::new(target_framework, dependencies))
}

/// Whether `published` normalizes to the unlisted sentinel date.
///
/// An unparseable timestamp never matches; the sentinel comparison is this
/// field's only consumer.
fn is_unlisted(published: &str) -> bool {
    match DateTime::parse_from_rfc3339(published) {
        Ok(stamp) => stamp.date_naive().format("%Y%m%d").to_string() == UNLISTED_SENTINEL,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry_from(value: serde_json::Value) -> CatalogEntry {
        serde_json::from_value(value).unwrap()
    }

    fn any_range() -> VersionRange {
        VersionRange::all().with_prerelease(true)
    }

    const URL: &str = "https://reg.test/pkg/index.json";

    #[test]
    fn test_entry_without_groups_yields_zero_groups() {
        let entry = entry_from(json!({"id": "A", "version": "1.0.0"}));
        let info = decode_entry(&entry, &any_range(), URL).unwrap().unwrap();

        assert_eq!(info.identity, PackageIdentity::new("A", Version::new(1, 0, 0)));
        assert!(info.groups.is_empty());
    }

    #[test]
    fn test_empty_group_maps_to_any_framework() {
        let entry = entry_from(json!({
            "id": "A",
            "version": "1.0.0",
            "dependencyGroups": [{}]
        }));
        let info = decode_entry(&entry, &any_range(), URL).unwrap().unwrap();

        assert_eq!(info.groups.len(), 1);
        assert!(info.groups[0].target_framework.is_any());
        assert!(info.groups[0].dependencies.is_empty());
    }

    #[test]
    fn test_group_with_dependencies() {
        let entry = entry_from(json!({
            "id": "A",
            "version": "1.0.0",
            "dependencyGroups": [{
                "targetFramework": "net6.0",
                "dependencies": [
                    {"id": "B", "range": "[2.0.0, 3.0.0)"},
                    {"id": "C"}
                ]
            }]
        }));
        let info = decode_entry(&entry, &any_range(), URL).unwrap().unwrap();

        let group = &info.groups[0];
        assert_eq!(group.target_framework.as_str(), "net6.0");
        assert_eq!(group.dependencies.len(), 2);
        assert!(group.dependencies[0].range.is_some());
        // absent range means any version
        assert!(group.dependencies[1].range.is_none());
    }

    #[test]
    fn test_dependency_missing_id_is_bad_document() {
        let entry = entry_from(json!({
            "id": "A",
            "version": "1.0.0",
            "dependencyGroups": [{"dependencies": [{"range": "1.0.0"}]}]
        }));
        let result = decode_entry(&entry, &any_range(), URL);
        assert!(matches!(result, Err(ResolveError::BadDocument { .. })));
    }

    #[test]
    fn test_dependency_unparseable_range_is_bad_document() {
        let entry = entry_from(json!({
            "id": "A",
            "version": "1.0.0",
            "dependencyGroups": [{"dependencies": [{"id": "B", "range": "banana"}]}]
        }));
        let result = decode_entry(&entry, &any_range(), URL);
        assert!(matches!(result, Err(ResolveError::BadDocument { .. })));
    }

    #[test]
    fn test_entry_bad_version_is_bad_document() {
        let entry = entry_from(json!({"id": "A", "version": "one.two"}));
        let result = decode_entry(&entry, &any_range(), URL);
        assert!(matches!(result, Err(ResolveError::BadDocument { .. })));
    }

    #[test]
    fn test_unlisted_entry_is_dropped() {
        let entry = entry_from(json!({
            "id": "X",
            "version": "1.0.0",
            "published": "1900-01-01T00:00:00Z"
        }));
        assert!(decode_entry(&entry, &any_range(), URL).unwrap().is_none());
    }

    #[test]
    fn test_unlisted_sentinel_with_offset() {
        let entry = entry_from(json!({
            "id": "X",
            "version": "1.0.0",
            "published": "1900-01-01T00:00:00+00:00"
        }));
        assert!(decode_entry(&entry, &any_range(), URL).unwrap().is_none());
    }

    #[test]
    fn test_listed_publish_date_is_kept() {
        let entry = entry_from(json!({
            "id": "X",
            "version": "1.0.0",
            "published": "2021-06-15T09:30:00Z"
        }));
        assert!(decode_entry(&entry, &any_range(), URL).unwrap().is_some());
    }

    #[test]
    fn test_malformed_publish_date_is_treated_as_listed() {
        let entry = entry_from(json!({
            "id": "X",
            "version": "1.0.0",
            "published": "yesterday"
        }));
        assert!(decode_entry(&entry, &any_range(), URL).unwrap().is_some());
    }

    #[test]
    fn test_version_outside_range_is_dropped() {
        let entry = entry_from(json!({"id": "A", "version": "3.0.0"}));
        let range = VersionRange::parse("[1.0.0, 2.0.0]").unwrap();
        assert!(decode_entry(&entry, &range, URL).unwrap().is_none());
    }

    #[test]
    fn test_prerelease_filtered_when_not_included() {
        let entry = entry_from(json!({"id": "A", "version": "1.5.0-beta.1"}));
        let range = VersionRange::parse("[1.0.0, 2.0.0]").unwrap();

        assert!(decode_entry(&entry, &range, URL).unwrap().is_none());
        assert!(decode_entry(&entry, &range.with_prerelease(true), URL)
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_prerelease_preference_propagates_to_dependency_ranges() {
        let entry = entry_from(json!({
            "id": "A",
            "version": "1.0.0",
            "dependencyGroups": [{
                "dependencies": [{"id": "B", "range": "[1.0.0, 2.0.0]"}]
            }]
        }));
        let range = VersionRange::all().with_prerelease(true);
        let info = decode_entry(&entry, &range, URL).unwrap().unwrap();

        let dep_range = info.groups[0].dependencies[0].range.as_ref().unwrap();
        assert!(dep_range.include_prerelease());
    }

    #[test]
    fn test_server_casing_is_preserved() {
        let entry = entry_from(json!({"id": "Newtonsoft.Json", "version": "13.0.1"}));
        let info = decode_entry(&entry, &any_range(), URL).unwrap().unwrap();
        assert_eq!(info.identity.id, "Newtonsoft.Json");
    }
}
