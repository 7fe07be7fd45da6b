//! Placement lock: marker-anchored versus world-anchored furniture.
//!
//! ## Scene Layout
//!
//! ```text
//! WorldRoot
//!   └─> MarkerAnchor            (pose pushed by the page-side tracker)
//!         └─> TrackedFurniture  (while marker-anchored)
//!   └─> TrackedFurniture        (while world-anchored)
//! ```
//!
//! ## Toggle Semantics
//!
//! - **Lock** (marker → world): the object's resolved world pose is computed
//!   from the hierarchy, the object is moved under `WorldRoot`, and its local
//!   transform rewritten so nothing moves on screen.
//! - **Unlock** (world → marker): the object is moved back under the marker
//!   and snapped to the marker origin with identity rotation. The world pose
//!   held while locked is not restored, so lock → unlock → lock generally ends
//!   somewhere else than it started.
//!
//! A toggle that cannot resolve all three nodes is logged and dropped without
//! touching the hierarchy.

/// Marker, world root and tracked object tags.
pub mod components;

/// Anchor state machine.
pub mod lock;

/// Scene-graph abstraction with world-pose preserving re-parenting.
pub mod scene_graph;

/// Toggle and marker tracking systems.
pub mod systems;

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;
use crate::engine::core::frame_sets::{FrameSet, configure_frame_sets};
use systems::{MarkerPoseUpdate, ToggleLockRequest, apply_lock_toggles, apply_marker_poses};

pub struct PlacementPlugin;

impl Plugin for PlacementPlugin {
    fn build(&self, app: &mut App) {
        configure_frame_sets(app);
        app.add_event::<ToggleLockRequest>()
            .add_event::<MarkerPoseUpdate>()
            .add_systems(
                Update,
                (
                    apply_marker_poses.in_set(FrameSet::Apply),
                    apply_lock_toggles.in_set(FrameSet::Lock),
                )
                    .run_if(in_state(AppState::Running)),
            );
    }
}
