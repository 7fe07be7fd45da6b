use bevy::color::Color;
use bevy::math::Vec3;

/// Fixed opacity of the furniture proxy material.
pub const FURNITURE_OPACITY: f32 = 0.8;

/// Height above the top face at which the dimension label floats (metres).
pub const LABEL_VERTICAL_CLEARANCE: f32 = 0.3;

pub const LABEL_SCALE: Vec3 = Vec3::splat(0.6);
pub const LABEL_COLOR: Color = Color::BLACK;

/// Label used when a catalog entry carries no display name.
pub const DEFAULT_ITEM_NAME: &str = "Furniture";

/// Upper bound on hierarchy depth when resolving world poses.
pub const MAX_HIERARCHY_DEPTH: usize = 64;
