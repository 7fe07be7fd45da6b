//! Runtime input systems shared by native and web builds.

/// Development keyboard shortcuts (native only).
pub mod keyboard_shortcuts;
