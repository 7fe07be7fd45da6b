//! Derived dimensions, readout formatting and orientation conversion.

use crate::engine::assets::furniture_catalog::FurnitureSpec;
use bevy::prelude::*;
use constants::render_settings::LABEL_VERTICAL_CLEARANCE;

/// Real-world size of the proxy box: base dimensions times per-axis scale.
pub fn effective_dimensions(spec: &FurnitureSpec, scale: Vec3) -> Vec3 {
    spec.size() * scale
}

/// Readout shown in the measurement display, two decimals per axis.
pub fn format_measurements(dimensions: Vec3) -> String {
    format!(
        "Width: {:.2}m | Height: {:.2}m | Depth: {:.2}m",
        dimensions.x, dimensions.y, dimensions.z
    )
}

/// Euler angles in degrees (X, then Y, then Z) to a quaternion.
pub fn rotation_from_degrees(degrees: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        degrees.x.to_radians(),
        degrees.y.to_radians(),
        degrees.z.to_radians(),
    )
}

/// Multi-line label floating above the box.
pub fn dimension_label_text(name: &str, dimensions: Vec3) -> String {
    format!(
        "{name}\nW: {}m\nH: {}m\nD: {}m",
        dimensions.x, dimensions.y, dimensions.z
    )
}

/// Label position in the box's local frame: centred, clear of the top face.
pub fn label_offset(height: f32) -> Vec3 {
    Vec3::new(0.0, height / 2.0 + LABEL_VERTICAL_CLEARANCE, 0.0)
}
