//! AR scene composition: world root, marker, tracked furniture, camera,
//! lighting and the native overlays.

pub mod setup;
