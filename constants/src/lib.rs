//! Shared configuration for the AR placement engine.
//!
//! Built-in furniture catalog, page element identifiers, timing and
//! presentation constants.

/// Built-in furniture catalog used when no catalog asset is available.
pub mod furniture;

/// Presentation settings for the proxy box and its dimension label.
pub mod render_settings;

/// Deferred signal timings.
pub mod timing;

/// Page element identifiers shared with the hosting web page.
pub mod ui;
