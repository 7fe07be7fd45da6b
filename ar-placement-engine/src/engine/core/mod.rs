//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration and plugin
//! initialisation for both native and WASM targets.

/// Application setup and plugin configuration.
pub mod app_setup;

/// Ordering of the per-frame placement pipeline.
pub mod frame_sets;

/// Loading → running state machine.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Targets the page canvas on the web and keeps the framebuffer transparent
/// so the camera feed shows through.
pub mod window_config;
