//! Startup loading of the furniture catalog asset.

/// Loads the JSON catalog, validates it and installs it as a resource,
/// falling back to the built-in table.
pub mod catalog_loader;
