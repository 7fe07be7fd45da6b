//! Furniture catalog asset.
//!
//! The catalog is loaded once from JSON (or taken from the built-in table)
//! and installed as an immutable resource.

/// Furniture archetypes with base dimensions and display colours.
pub mod furniture_catalog;
