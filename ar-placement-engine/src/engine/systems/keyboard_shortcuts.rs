use crate::engine::assets::furniture_catalog::FurnitureCatalog;
use crate::engine::camera::camera_fix::CameraInitialized;
use crate::furniture::controls::{ControlId, ControlInput, ControlValues};
use crate::furniture::selection::FurnitureSelected;
use crate::placement::systems::{MarkerPoseUpdate, ToggleLockRequest};
use bevy::prelude::*;

const SCALE_STEP: f32 = 0.1;
const ROTATION_STEP: f32 = 15.0;

/// Drive the same events the page bridge produces, for native runs without a
/// page or tracker.
///
/// - `L` toggle lock, `C` camera initialised, `M` show marker one metre ahead
/// - `1`-`9` select catalog entries in order
/// - `Q`/`A`, `W`/`S`, `E`/`D` grow/shrink X, Y, Z
/// - `R`/`F` rotate about Y
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    catalog: Res<FurnitureCatalog>,
    controls: Res<ControlValues>,
    mut toggles: EventWriter<ToggleLockRequest>,
    mut selections: EventWriter<FurnitureSelected>,
    mut inputs: EventWriter<ControlInput>,
    mut camera_events: EventWriter<CameraInitialized>,
    mut marker_poses: EventWriter<MarkerPoseUpdate>,
) {
    if keyboard.just_pressed(KeyCode::KeyL) {
        toggles.write(ToggleLockRequest);
    }
    if keyboard.just_pressed(KeyCode::KeyC) {
        camera_events.write(CameraInitialized);
    }
    if keyboard.just_pressed(KeyCode::KeyM) {
        marker_poses.write(MarkerPoseUpdate {
            translation: Vec3::new(0.0, -0.5, -1.0),
            rotation_degrees: Vec3::ZERO,
            visible: true,
        });
    }

    const DIGITS: [KeyCode; 9] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];
    for (key, furniture_type) in DIGITS.iter().zip(catalog.ids()) {
        if keyboard.just_pressed(*key) {
            selections.write(FurnitureSelected {
                furniture_type: furniture_type.to_string(),
            });
        }
    }

    let steps = [
        (KeyCode::KeyQ, ControlId::ScaleX, SCALE_STEP),
        (KeyCode::KeyA, ControlId::ScaleX, -SCALE_STEP),
        (KeyCode::KeyW, ControlId::ScaleY, SCALE_STEP),
        (KeyCode::KeyS, ControlId::ScaleY, -SCALE_STEP),
        (KeyCode::KeyE, ControlId::ScaleZ, SCALE_STEP),
        (KeyCode::KeyD, ControlId::ScaleZ, -SCALE_STEP),
        (KeyCode::KeyR, ControlId::RotationY, ROTATION_STEP),
        (KeyCode::KeyF, ControlId::RotationY, -ROTATION_STEP),
    ];
    for (key, control, step) in steps {
        if keyboard.just_pressed(key) {
            inputs.write(ControlInput {
                control,
                raw: (controls.get(control) + step).to_string(),
            });
        }
    }
}

/// No-op for WASM builds; the page drives everything over RPC.
#[cfg(target_arch = "wasm32")]
pub fn handle_keyboard_shortcuts() {}
