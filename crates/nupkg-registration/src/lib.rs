//! Paged registration-index protocol support for nupkg-meta.
//!
//! This crate implements the hierarchical registration protocol: a per-id
//! index document partitioned into version-range pages that are fetched on
//! demand, decoded into [`nupkg_core::DependencyInfo`] records, and
//! deduplicated per release.

mod entry;
mod pages;
pub mod registry;
pub mod types;

pub use registry::RegistrationClient;
pub use types::{
    CatalogDependency, CatalogDependencyGroup, CatalogEntry, RegistrationIndex, RegistrationLeaf,
    RegistrationPage, RegistrationPageInfo,
};
