//! JSON-RPC 2.0 bridge between the hosting web page and the engine.
//!
//! The page owns every DOM control (furniture selector, six range inputs,
//! lock toggle, measurement display) and the marker tracker. It forwards
//! their events here over `postMessage`; the engine answers and pushes state
//! changes back the same way.
//!
//! ## Message Flow
//!
//! ```text
//! Page (controls + tracker)  <──postMessage──>  Bevy (canvas)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Parse into PlacementCommand
//!        │                                        ├─ Write Bevy event
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! Requests without an ID are dispatched the same way but get no response,
//! which suits high-frequency traffic such as `marker_pose`.
//!
//! ## Methods
//!
//! - `select_furniture` `{ "type": "table" }`
//! - `set_control` `{ "control": "scale-x", "value": "1.5" }`: value may be a
//!   string or a number; unparsable values are accepted here and dropped by
//!   the control handler, which keeps the last valid value
//! - `toggle_lock`
//! - `marker_pose` `{ "position": [x, y, z], "rotation": [x, y, z], "visible": true }`:
//!   rotation in degrees
//! - `camera_init`
//! - `get_catalog`
//! - `get_placement_state`
//!
//! ## Notifications Sent
//!
//! - `catalog_loaded`, `placement_lock_changed`, `measurements_updated`,
//!   `dimension_label_updated`, `resize`, `placement_error`
//!
//! ## Error Codes
//!
//! - `-32700`: Parse error
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error

/// Request parsing, dispatch, and the WASM message listener.
pub mod web_rpc;
