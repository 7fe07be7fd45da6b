use crate::furniture::controls::ControlValues;
use crate::furniture::readout::MeasurementDisplayText;
use crate::furniture::selection::{FurnitureGeometry, FurnitureSelection};
use crate::placement::components::{LockIndicatorText, MarkerAnchor, TrackedFurniture, WorldRoot};
use crate::placement::lock::{Anchor, PlacementLock};
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;

/// Spawn the world root, the marker under it and the furniture under the
/// marker, using the current selection and control values.
pub fn spawn_placement_scene(
    mut commands: Commands,
    selection: Res<FurnitureSelection>,
    controls: Res<ControlValues>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let furniture_type = selection.furniture_type();
    let geometry = match FurnitureGeometry::from_spec(furniture_type, selection.spec()) {
        Ok(geometry) => geometry,
        Err(error) => {
            error!("Failed to initialise furniture proxy: {error}");
            return;
        }
    };

    let root = commands
        .spawn((
            WorldRoot,
            Transform::IDENTITY,
            Visibility::default(),
            Name::new("WorldRoot"),
        ))
        .id();

    let marker = commands
        .spawn((
            MarkerAnchor,
            Transform::IDENTITY,
            // Hidden until the tracker reports the marker.
            Visibility::Hidden,
            ChildOf(root),
            Name::new("Marker"),
        ))
        .id();

    commands.spawn((
        TrackedFurniture,
        PlacementLock::default(),
        Mesh3d(meshes.add(geometry.mesh())),
        MeshMaterial3d(materials.add(geometry.material())),
        Transform::from_translation(geometry.resting_offset)
            .with_rotation(controls.orientation())
            .with_scale(controls.scale),
        Visibility::default(),
        ChildOf(marker),
        Name::new(format!("{}_proxy", selection.furniture_type())),
    ));

    info!("Placement scene spawned with '{}'", selection.furniture_type());
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
    commands.insert_resource(AmbientLight {
        brightness: 400.0,
        ..default()
    });
}

/// The AR camera sits at the origin; marker poses arrive in its frame.
fn spawn_ar_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(Color::NONE),
            ..default()
        },
        Transform::IDENTITY,
        Name::new("ArCamera"),
    ));
}

/// Startup: lighting, the AR camera and, on native builds, the overlays.
pub fn setup(mut commands: Commands) {
    spawn_lighting(&mut commands);
    spawn_ar_camera(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                MeasurementDisplayText,
            ));
            parent.spawn((
                Text::new(Anchor::Marker.indicator_label()),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.8, 0.2)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                LockIndicatorText,
            ));
        });
}
