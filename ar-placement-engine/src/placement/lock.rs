use super::scene_graph::SceneGraph;
use crate::error::PlacementError;
use bevy::prelude::*;
use constants::ui::{LOCK_LABEL_LOCKED, LOCK_LABEL_UNLOCKED, LOCKED_STYLE_CLASS};
use serde::{Deserialize, Serialize};

/// Frame the tracked object is currently attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Child of the tracked marker; follows it around.
    #[default]
    Marker,
    /// Child of the world root; stays put whatever the marker does.
    World,
}

impl Anchor {
    pub fn is_locked(self) -> bool {
        self == Anchor::World
    }

    /// Text for the lock toggle: names the action the toggle performs next.
    pub fn indicator_label(self) -> &'static str {
        match self {
            Anchor::Marker => LOCK_LABEL_UNLOCKED,
            Anchor::World => LOCK_LABEL_LOCKED,
        }
    }

    pub fn indicator_class(self) -> Option<&'static str> {
        self.is_locked().then_some(LOCKED_STYLE_CLASS)
    }
}

/// The three nodes a lock toggle touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementHandles {
    pub object: Entity,
    pub marker: Entity,
    pub world: Entity,
}

/// Placement state of a tracked object.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlacementLock {
    anchor: Anchor,
    /// Rotation the lock put in front of the object's marker-local rotation.
    /// Identity while marker-anchored.
    rotation_base: Quat,
}

impl PlacementLock {
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Local rotation for a control orientation under the current anchor.
    /// While locked the control turns the box about its lock-time pose
    /// instead of replacing it.
    pub fn orientation(&self, control_rotation: Quat) -> Quat {
        self.rotation_base * control_rotation
    }

    /// Flip between marker and world anchoring.
    ///
    /// Locking re-parents to the world node keeping the resolved world pose.
    /// Unlocking re-parents to the marker and snaps the object to the marker
    /// origin with identity rotation; the previous world pose is discarded and
    /// scale is kept. Either way, if any handle cannot be resolved nothing is
    /// touched and the state stays as it was.
    pub fn toggle(
        &mut self,
        graph: &mut impl SceneGraph,
        handles: &PlacementHandles,
    ) -> Result<Anchor, PlacementError> {
        if !graph.contains(handles.object) {
            return Err(PlacementError::MissingHandle("tracked object"));
        }
        if !graph.contains(handles.marker) {
            return Err(PlacementError::MissingHandle("marker"));
        }
        if !graph.contains(handles.world) {
            return Err(PlacementError::MissingHandle("world root"));
        }

        let next = match self.anchor {
            Anchor::Marker => {
                let marker_local = graph
                    .local_transform(handles.object)
                    .ok_or(PlacementError::MissingHandle("tracked object transform"))?
                    .rotation;
                let world_local =
                    graph.reparent_preserving_world_transform(handles.object, handles.world)?;
                self.rotation_base = world_local.rotation * marker_local.inverse();
                Anchor::World
            }
            Anchor::World => {
                let scale = graph
                    .local_transform(handles.object)
                    .ok_or(PlacementError::MissingHandle("tracked object transform"))?
                    .scale;
                graph.set_parent(handles.object, handles.marker)?;
                graph.set_local_transform(handles.object, Transform::from_scale(scale))?;
                self.rotation_base = Quat::IDENTITY;
                Anchor::Marker
            }
        };

        self.anchor = next;
        Ok(next)
    }
}
