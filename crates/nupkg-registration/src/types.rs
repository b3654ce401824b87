//! Wire schema of the registration-index protocol.
//!
//! The index partitions a package id's versions into pages bounded by
//! `lower`/`upper` version strings. A page either embeds its leaves inline
//! under `items` or points to a separately fetchable document via `@id`.

use serde::Deserialize;

/// Top-level registration index for one package id.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationIndex {
    #[serde(default)]
    pub items: Vec<RegistrationPageInfo>,
}

/// One page slot in the index.
///
/// When `items` is present the page is already embedded and must be used
/// directly; otherwise the page document lives at `url`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationPageInfo {
    #[serde(rename = "@id")]
    pub url: String,
    pub lower: String,
    pub upper: String,
    #[serde(default)]
    pub items: Option<Vec<RegistrationLeaf>>,
}

/// A page document fetched from a page slot's `@id`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationPage {
    #[serde(default)]
    pub items: Vec<RegistrationLeaf>,
}

/// One leaf of a page, wrapping the catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationLeaf {
    #[serde(rename = "catalogEntry")]
    pub catalog_entry: CatalogEntry,
}

/// The per-version record carrying id, listing state, and declared
/// dependencies.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub version: String,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default, rename = "dependencyGroups")]
    pub dependency_groups: Option<Vec<CatalogDependencyGroup>>,
}

/// A dependency group as serialized in a catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDependencyGroup {
    #[serde(default, rename = "targetFramework")]
    pub target_framework: Option<String>,
    #[serde(default)]
    pub dependencies: Option<Vec<CatalogDependency>>,
}

/// A single dependency edge as serialized in a catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDependency {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub range: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_deserializes_inline_and_remote_pages() {
        let doc = json!({
            "items": [
                {
                    "@id": "https://reg.test/a/page/1.0.0/1.5.0.json",
                    "lower": "1.0.0",
                    "upper": "1.5.0",
                    "items": [
                        {"catalogEntry": {"id": "A", "version": "1.0.0"}}
                    ]
                },
                {
                    "@id": "https://reg.test/a/page/2.0.0/2.0.0.json",
                    "lower": "2.0.0",
                    "upper": "2.0.0"
                }
            ]
        });

        let index: RegistrationIndex = serde_json::from_value(doc).unwrap();
        assert_eq!(index.items.len(), 2);
        assert!(index.items[0].items.is_some());
        assert!(index.items[1].items.is_none());
    }

    #[test]
    fn test_catalog_entry_optionals_default() {
        let doc = json!({"id": "A", "version": "1.0.0"});
        let entry: CatalogEntry = serde_json::from_value(doc).unwrap();
        assert!(entry.published.is_none());
        assert!(entry.dependency_groups.is_none());
    }

    #[test]
    fn test_index_missing_page_bound_is_rejected() {
        let doc = json!({
            "items": [{"@id": "https://reg.test/p.json", "lower": "1.0.0"}]
        });
        assert!(serde_json::from_value::<RegistrationIndex>(doc).is_err());
    }

    #[test]
    fn test_empty_page_document() {
        let page: RegistrationPage = serde_json::from_value(json!({})).unwrap();
        assert!(page.items.is_empty());
    }
}
