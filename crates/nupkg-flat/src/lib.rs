//! Flat-listing protocol support for nupkg-meta.
//!
//! The legacy flat protocol returns every version of a package id in one
//! call. This crate adapts any [`FlatFeed`] implementation to the same
//! result shape the paged registration client produces.

pub mod feed;
pub mod registry;

pub use feed::{FlatDependencySet, FlatFeed, FlatPackage};
pub use registry::FlatResolver;
