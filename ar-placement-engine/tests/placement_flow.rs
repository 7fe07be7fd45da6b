mod common;

use ar_placement_engine::furniture::controls::{ControlId, ControlInput, ControlValues};
use ar_placement_engine::furniture::selection::{FurnitureSelected, FurnitureSelection};
use ar_placement_engine::placement::components::MarkerAnchor;
use ar_placement_engine::placement::lock::{Anchor, PlacementLock};
use ar_placement_engine::placement::scene_graph::SceneGraph;
use ar_placement_engine::placement::systems::{MarkerPoseUpdate, ToggleLockRequest};
use bevy::prelude::*;
use common::*;

const EPS: f32 = 1e-5;

fn anchor(app: &mut App) -> Anchor {
    let object = object(app);
    app.world().get::<PlacementLock>(object).unwrap().anchor()
}

fn toggle(app: &mut App) {
    app.world_mut().send_event(ToggleLockRequest);
    app.update();
}

fn move_marker(app: &mut App, translation: Vec3, rotation_degrees: Vec3) {
    app.world_mut().send_event(MarkerPoseUpdate {
        translation,
        rotation_degrees,
        visible: true,
    });
    app.update();
}

#[test]
fn scene_starts_marker_anchored() {
    let mut app = placement_app();
    let object = object(&mut app);
    let marker = marker(&mut app);

    assert_eq!(anchor(&mut app), Anchor::Marker);
    assert_eq!(app.world().parent(object), Some(marker));
    // Table rests on the marker plane.
    let local = app.world().local_transform(object).unwrap();
    assert!((local.translation.y - 0.4).abs() < EPS);
}

#[test]
fn lock_keeps_pose_and_unlock_snaps_to_marker() {
    let mut app = placement_app();
    move_marker(&mut app, Vec3::new(1.0, -0.5, -2.0), Vec3::new(0.0, 90.0, 0.0));

    let object = object(&mut app);
    let root = world_root(&mut app);
    let marker = marker(&mut app);
    let before = app.world().world_transform(object).unwrap();

    toggle(&mut app);
    assert_eq!(anchor(&mut app), Anchor::World);
    assert_eq!(app.world().parent(object), Some(root));
    let after = app.world().world_transform(object).unwrap();
    assert!(
        before
            .translation()
            .abs_diff_eq(after.translation(), EPS)
    );
    assert!(before.rotation().abs_diff_eq(after.rotation(), EPS));

    let locked = last_notification(&app, "placement_lock_changed").unwrap();
    assert_eq!(locked["locked"], true);
    assert_eq!(locked["label"], "Unlock Placement");
    assert_eq!(locked["style_class"], "locked");

    // Tracker updates no longer move a world-anchored object.
    move_marker(&mut app, Vec3::new(-3.0, 0.0, 0.0), Vec3::ZERO);
    let still = app.world().world_transform(object).unwrap();
    assert!(still.translation().abs_diff_eq(after.translation(), EPS));

    toggle(&mut app);
    assert_eq!(anchor(&mut app), Anchor::Marker);
    assert_eq!(app.world().parent(object), Some(marker));
    let local = app.world().local_transform(object).unwrap();
    assert_eq!(local.translation, Vec3::ZERO);
    assert_eq!(local.rotation, Quat::IDENTITY);

    let unlocked = last_notification(&app, "placement_lock_changed").unwrap();
    assert_eq!(unlocked["locked"], false);
    assert_eq!(unlocked["label"], "Lock Placement");
    assert_eq!(unlocked["style_class"], serde_json::Value::Null);
}

#[test]
fn toggle_without_marker_changes_nothing() {
    let mut app = placement_app();
    let object = object(&mut app);
    let marker = marker(&mut app);
    let local_before = app.world().local_transform(object).unwrap();

    app.world_mut().entity_mut(marker).remove::<MarkerAnchor>();
    toggle(&mut app);

    assert_eq!(anchor(&mut app), Anchor::Marker);
    assert_eq!(app.world().parent(object), Some(marker));
    assert_eq!(app.world().local_transform(object), Some(local_before));

    let error = last_notification(&app, "placement_error").unwrap();
    assert_eq!(error["operation"], "toggle_lock");
    assert_eq!(error["kind"], "missing_handle");
    assert!(last_notification(&app, "placement_lock_changed").is_none());
}

#[test]
fn controls_drive_transform_and_readout() {
    let mut app = placement_app();
    for (control, raw) in [(ControlId::ScaleX, "2"), (ControlId::ScaleZ, "0.5")] {
        app.world_mut().send_event(ControlInput {
            control,
            raw: raw.to_string(),
        });
    }
    app.update();

    let object = object(&mut app);
    let transform = app.world().local_transform(object).unwrap();
    assert_eq!(transform.scale, Vec3::new(2.0, 1.0, 0.5));

    let readout = last_notification(&app, "measurements_updated").unwrap();
    assert_eq!(
        readout["text"],
        "Width: 2.40m | Height: 0.80m | Depth: 0.40m"
    );
    assert_eq!(readout["element_id"], "measurement-display");

    // A half-typed value leaves everything as it was.
    app.world_mut().send_event(ControlInput {
        control: ControlId::ScaleX,
        raw: "2.x".to_string(),
    });
    app.update();
    assert_eq!(app.world().resource::<ControlValues>().scale.x, 2.0);
    let error = last_notification(&app, "placement_error").unwrap();
    assert_eq!(error["kind"], "unparsable_input");
}

#[test]
fn rotation_control_uses_degrees() {
    let mut app = placement_app();
    app.world_mut().send_event(ControlInput {
        control: ControlId::RotationY,
        raw: "90".to_string(),
    });
    app.update();

    let object = object(&mut app);
    let rotation = app.world().local_transform(object).unwrap().rotation;
    assert!(rotation.abs_diff_eq(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2), EPS));
}

#[test]
fn selecting_furniture_swaps_geometry() {
    let mut app = placement_app();
    app.world_mut().send_event(FurnitureSelected {
        furniture_type: "bed".to_string(),
    });
    app.update();

    assert_eq!(
        app.world().resource::<FurnitureSelection>().furniture_type(),
        "bed"
    );
    let object = object(&mut app);
    let local = app.world().local_transform(object).unwrap();
    assert!((local.translation.y - 0.25).abs() < EPS);

    let label = last_notification(&app, "dimension_label_updated").unwrap();
    assert_eq!(label["text"], "Bed\nW: 1.4m\nH: 0.5m\nD: 1.9m");

    app.world_mut().send_event(FurnitureSelected {
        furniture_type: "sofa".to_string(),
    });
    app.update();

    assert_eq!(
        app.world().resource::<FurnitureSelection>().furniture_type(),
        "bed"
    );
    let error = last_notification(&app, "placement_error").unwrap();
    assert_eq!(error["operation"], "select_furniture");
    assert_eq!(error["kind"], "invalid_selection");
}

#[test]
fn world_anchored_selection_keeps_translation() {
    let mut app = placement_app();
    move_marker(&mut app, Vec3::new(0.0, 0.0, -1.5), Vec3::ZERO);
    toggle(&mut app);

    let object = object(&mut app);
    let before = app.world().local_transform(object).unwrap().translation;

    app.world_mut().send_event(FurnitureSelected {
        furniture_type: "wardrobe".to_string(),
    });
    app.update();

    let after = app.world().local_transform(object).unwrap().translation;
    assert_eq!(before, after);
}

fn yaw(degrees: f32) -> Quat {
    Quat::from_rotation_y(degrees.to_radians())
}

fn world_rotation(app: &mut App) -> Quat {
    let object = object(app);
    app.world().world_transform(object).unwrap().rotation()
}

#[test]
fn scale_input_keeps_locked_orientation() {
    let mut app = placement_app();
    move_marker(&mut app, Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 90.0, 0.0));
    toggle(&mut app);
    let locked = world_rotation(&mut app);
    assert!(locked.abs_diff_eq(yaw(90.0), EPS));

    app.world_mut().send_event(ControlInput {
        control: ControlId::ScaleX,
        raw: "1.5".to_string(),
    });
    app.update();

    assert!(world_rotation(&mut app).abs_diff_eq(locked, EPS));
    let object = object(&mut app);
    assert_eq!(app.world().local_transform(object).unwrap().scale.x, 1.5);
}

#[test]
fn rotation_input_turns_locked_box_about_marker_frame() {
    let mut app = placement_app();
    move_marker(&mut app, Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 90.0, 0.0));
    toggle(&mut app);

    app.world_mut().send_event(ControlInput {
        control: ControlId::RotationY,
        raw: "45".to_string(),
    });
    app.update();

    assert!(world_rotation(&mut app).abs_diff_eq(yaw(135.0), EPS));
}

#[test]
fn control_input_lands_before_same_frame_toggle() {
    let mut app = placement_app();
    move_marker(&mut app, Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 90.0, 0.0));

    app.world_mut().send_event(ControlInput {
        control: ControlId::RotationY,
        raw: "45".to_string(),
    });
    app.world_mut().send_event(ToggleLockRequest);
    app.update();

    assert_eq!(anchor(&mut app), Anchor::World);
    assert!(world_rotation(&mut app).abs_diff_eq(yaw(135.0), EPS));

    // Nothing left over to disturb the locked pose.
    app.update();
    assert!(world_rotation(&mut app).abs_diff_eq(yaw(135.0), EPS));
}

#[test]
fn selection_lands_before_same_frame_toggle() {
    let mut app = placement_app();
    move_marker(&mut app, Vec3::new(0.5, 1.0, -2.0), Vec3::ZERO);

    app.world_mut().send_event(FurnitureSelected {
        furniture_type: "bed".to_string(),
    });
    app.world_mut().send_event(ToggleLockRequest);
    app.update();

    assert_eq!(anchor(&mut app), Anchor::World);
    let object = object(&mut app);
    let resolved = app.world().world_transform(object).unwrap();
    assert!(
        resolved
            .translation()
            .abs_diff_eq(Vec3::new(0.5, 1.25, -2.0), EPS)
    );
}
