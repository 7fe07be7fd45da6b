use super::components::{LockIndicatorText, MarkerAnchor, TrackedFurniture, WorldRoot};
use super::lock::{Anchor, PlacementHandles, PlacementLock};
use crate::error::PlacementError;
use crate::furniture::measurement::rotation_from_degrees;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;
use constants::ui::LOCK_TOGGLE_ID;

/// Request to flip the tracked object between marker and world anchoring.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ToggleLockRequest;

/// Pose reported by the page-side marker tracker.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MarkerPoseUpdate {
    pub translation: Vec3,
    pub rotation_degrees: Vec3,
    pub visible: bool,
}

/// Apply every pending lock toggle in order.
///
/// Runs exclusively so each toggle reads and writes the hierarchy with no
/// other system in between.
pub fn apply_lock_toggles(world: &mut World) {
    let pending = world
        .resource_mut::<Events<ToggleLockRequest>>()
        .drain()
        .count();

    for _ in 0..pending {
        match toggle_tracked_object(world) {
            Ok(anchor) => {
                info!("Placement lock toggled: now {:?}-anchored", anchor);
                publish_lock_state(world, anchor);
            }
            Err(error) => {
                error!("Lock toggle aborted: {error}");
                if let Some(mut rpc) = world.get_resource_mut::<WebRpcInterface>() {
                    rpc.send_error("toggle_lock", &error);
                }
            }
        }
    }
}

fn single_entity<F: QueryFilter>(
    world: &mut World,
    what: &'static str,
) -> Result<Entity, PlacementError> {
    world
        .query_filtered::<Entity, F>()
        .single(world)
        .map_err(|_| PlacementError::MissingHandle(what))
}

/// Locate the tracked object, the marker and the world root.
pub fn resolve_handles(world: &mut World) -> Result<PlacementHandles, PlacementError> {
    Ok(PlacementHandles {
        object: single_entity::<With<TrackedFurniture>>(world, "tracked object")?,
        marker: single_entity::<With<MarkerAnchor>>(world, "marker")?,
        world: single_entity::<With<WorldRoot>>(world, "world root")?,
    })
}

fn toggle_tracked_object(world: &mut World) -> Result<Anchor, PlacementError> {
    let handles = resolve_handles(world)?;
    let mut lock = *world
        .get::<PlacementLock>(handles.object)
        .ok_or(PlacementError::MissingHandle("placement state"))?;

    let anchor = lock.toggle(world, &handles)?;

    if let Some(mut stored) = world.get_mut::<PlacementLock>(handles.object) {
        *stored = lock;
    }
    Ok(anchor)
}

/// Push the indicator label and style to the overlay and the page.
fn publish_lock_state(world: &mut World, anchor: Anchor) {
    let mut labels = world.query_filtered::<&mut Text, With<LockIndicatorText>>();
    for mut text in labels.iter_mut(world) {
        text.0 = anchor.indicator_label().to_string();
    }

    if let Some(mut rpc) = world.get_resource_mut::<WebRpcInterface>() {
        rpc.send_notification("placement_lock_changed", lock_state_json(anchor));
    }
}

pub fn lock_state_json(anchor: Anchor) -> serde_json::Value {
    serde_json::json!({
        "element_id": LOCK_TOGGLE_ID,
        "anchor": anchor,
        "locked": anchor.is_locked(),
        "label": anchor.indicator_label(),
        "style_class": anchor.indicator_class(),
    })
}

/// Move the marker node to the latest tracked pose. Visibility propagates to
/// marker-anchored children only.
pub fn apply_marker_poses(
    mut updates: EventReader<MarkerPoseUpdate>,
    mut markers: Query<(&mut Transform, &mut Visibility), With<MarkerAnchor>>,
) {
    let Some(update) = updates.read().last() else {
        return;
    };
    let Ok((mut transform, mut visibility)) = markers.single_mut() else {
        warn!("Marker pose received but no marker node exists");
        return;
    };

    transform.translation = update.translation;
    transform.rotation = rotation_from_degrees(update.rotation_degrees);
    *visibility = if update.visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
}
