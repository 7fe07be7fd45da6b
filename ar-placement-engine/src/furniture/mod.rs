//! Furniture proxy: type selection, transform controls and measurements.
//!
//! ## Data Flow
//!
//! ```text
//! select_furniture RPC ─> FurnitureSelected ─> apply_furniture_selection
//!                                                 ├─> mesh + material swap
//!                                                 └─> FurnitureSelection
//! set_control RPC ─────> ControlInput ───────> apply_control_inputs
//!                                                 ├─> ControlValues
//!                                                 └─> Transform scale/rotation
//! ControlValues | FurnitureSelection changed ─> publish_measurements
//!                                                 ├─> measurements_updated
//!                                                 └─> dimension_label_updated
//! ```
//!
//! Numeric input that does not parse is dropped and the last valid value is
//! kept, so a half-typed value never disturbs the box.

/// Range controls and their last valid readings.
pub mod controls;

/// Pure helpers: effective dimensions, readout text, degree conversion.
pub mod measurement;

/// Measurement readout and dimension label publishing.
pub mod readout;

/// Catalog lookup and box geometry updates.
pub mod selection;

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;
use crate::engine::core::frame_sets::{FrameSet, configure_frame_sets};
use controls::{ControlInput, ControlValues, apply_control_inputs};
use readout::publish_measurements;
use selection::{FurnitureSelected, apply_furniture_selection};

pub struct FurniturePlugin;

impl Plugin for FurniturePlugin {
    fn build(&self, app: &mut App) {
        configure_frame_sets(app);
        app.init_resource::<ControlValues>()
            .add_event::<FurnitureSelected>()
            .add_event::<ControlInput>()
            .add_systems(
                Update,
                (
                    (apply_furniture_selection, apply_control_inputs)
                        .chain()
                        .in_set(FrameSet::Apply),
                    publish_measurements.in_set(FrameSet::Publish),
                )
                    .run_if(in_state(AppState::Running)),
            );
    }
}
