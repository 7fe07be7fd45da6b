use crate::error::PlacementError;
use crate::furniture::measurement::rotation_from_degrees;
use crate::placement::components::TrackedFurniture;
use crate::placement::lock::PlacementLock;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;
use constants::ui::{
    ROTATION_X_ID, ROTATION_Y_ID, ROTATION_Z_ID, SCALE_X_ID, SCALE_Y_ID, SCALE_Z_ID,
};
use serde::{Deserialize, Serialize};

/// The six numeric range controls on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlId {
    ScaleX,
    ScaleY,
    ScaleZ,
    RotationX,
    RotationY,
    RotationZ,
}

impl ControlId {
    pub const ALL: [ControlId; 6] = [
        Self::ScaleX,
        Self::ScaleY,
        Self::ScaleZ,
        Self::RotationX,
        Self::RotationY,
        Self::RotationZ,
    ];

    /// Map a page element id (`scale-x`, `rot-z`, ...) to a control.
    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.element_id() == id)
    }

    pub fn element_id(self) -> &'static str {
        match self {
            Self::ScaleX => SCALE_X_ID,
            Self::ScaleY => SCALE_Y_ID,
            Self::ScaleZ => SCALE_Z_ID,
            Self::RotationX => ROTATION_X_ID,
            Self::RotationY => ROTATION_Y_ID,
            Self::RotationZ => ROTATION_Z_ID,
        }
    }

    pub fn is_scale(self) -> bool {
        matches!(self, Self::ScaleX | Self::ScaleY | Self::ScaleZ)
    }
}

/// Last valid reading of every control.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ControlValues {
    pub scale: Vec3,
    /// Degrees.
    pub rotation: Vec3,
}

impl Default for ControlValues {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
        }
    }
}

impl ControlValues {
    /// Parse and store a raw control reading.
    ///
    /// Anything that is not a finite number, or a scale that is not strictly
    /// positive, is rejected and the last valid value is kept.
    pub fn apply_input(&mut self, control: ControlId, raw: &str) -> Result<f32, PlacementError> {
        let rejected = || PlacementError::UnparsableInput {
            control: control.element_id().to_string(),
            raw: raw.to_string(),
        };

        let value = raw.trim().parse::<f32>().map_err(|_| rejected())?;
        if !value.is_finite() || (control.is_scale() && value <= 0.0) {
            return Err(rejected());
        }

        *self.slot_mut(control) = value;
        Ok(value)
    }

    pub fn get(&self, control: ControlId) -> f32 {
        match control {
            ControlId::ScaleX => self.scale.x,
            ControlId::ScaleY => self.scale.y,
            ControlId::ScaleZ => self.scale.z,
            ControlId::RotationX => self.rotation.x,
            ControlId::RotationY => self.rotation.y,
            ControlId::RotationZ => self.rotation.z,
        }
    }

    fn slot_mut(&mut self, control: ControlId) -> &mut f32 {
        match control {
            ControlId::ScaleX => &mut self.scale.x,
            ControlId::ScaleY => &mut self.scale.y,
            ControlId::ScaleZ => &mut self.scale.z,
            ControlId::RotationX => &mut self.rotation.x,
            ControlId::RotationY => &mut self.rotation.y,
            ControlId::RotationZ => &mut self.rotation.z,
        }
    }

    pub fn orientation(&self) -> Quat {
        rotation_from_degrees(self.rotation)
    }
}

/// Raw `input` notification from one of the range controls.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ControlInput {
    pub control: ControlId,
    pub raw: String,
}

/// Fold control input into `ControlValues` and drive the tracked object's
/// scale and rotation from the result.
///
/// Only the part an input touched is written: scale inputs leave the
/// rotation alone. Rotation is applied through the placement lock, so a
/// world-anchored box turns about its locked pose.
pub fn apply_control_inputs(
    mut inputs: EventReader<ControlInput>,
    mut controls: ResMut<ControlValues>,
    mut furniture: Query<(&mut Transform, &PlacementLock), With<TrackedFurniture>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let mut next = *controls;
    for input in inputs.read() {
        if let Err(error) = next.apply_input(input.control, &input.raw) {
            warn!("Ignoring control input: {error}");
            rpc_interface.send_error("set_control", &error);
        }
    }

    if next == *controls {
        return;
    }
    let scale_changed = next.scale != controls.scale;
    let rotation_changed = next.rotation != controls.rotation;
    *controls = next;

    for (mut transform, lock) in &mut furniture {
        if scale_changed {
            transform.scale = next.scale;
        }
        if rotation_changed {
            transform.rotation = lock.orientation(next.orientation());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ids_round_trip() {
        for control in ControlId::ALL {
            assert_eq!(ControlId::from_element_id(control.element_id()), Some(control));
        }
        assert_eq!(ControlId::from_element_id("scale-w"), None);
    }

    #[test]
    fn valid_input_is_stored() {
        let mut values = ControlValues::default();
        assert_eq!(values.apply_input(ControlId::ScaleX, " 2.5 "), Ok(2.5));
        assert_eq!(values.apply_input(ControlId::RotationY, "-45"), Ok(-45.0));
        assert_eq!(values.scale, Vec3::new(2.5, 1.0, 1.0));
        assert_eq!(values.rotation, Vec3::new(0.0, -45.0, 0.0));
    }

    #[test]
    fn unparsable_input_keeps_last_valid_value() {
        let mut values = ControlValues::default();
        values.apply_input(ControlId::ScaleZ, "0.5").unwrap();

        for raw in ["", "abc", "NaN", "inf", "0", "-1"] {
            let result = values.apply_input(ControlId::ScaleZ, raw);
            assert!(
                matches!(result, Err(PlacementError::UnparsableInput { .. })),
                "{raw:?} should be rejected"
            );
            assert_eq!(values.get(ControlId::ScaleZ), 0.5);
        }

        // Negative and zero rotations are fine.
        assert!(values.apply_input(ControlId::RotationX, "0").is_ok());
        assert!(values.apply_input(ControlId::RotationX, "NaN").is_err());
        assert_eq!(values.get(ControlId::RotationX), 0.0);
    }
}
