#![allow(dead_code)]

use ar_placement_engine::engine::assets::furniture_catalog::FurnitureCatalog;
use ar_placement_engine::engine::core::app_state::AppState;
use ar_placement_engine::engine::scene::setup::spawn_placement_scene;
use ar_placement_engine::furniture::FurniturePlugin;
use ar_placement_engine::furniture::selection::FurnitureSelection;
use ar_placement_engine::placement::PlacementPlugin;
use ar_placement_engine::placement::components::{MarkerAnchor, TrackedFurniture, WorldRoot};
use ar_placement_engine::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

/// Headless app with the placement scene spawned and the engine running.
pub fn placement_app() -> App {
    placement_app_with(|_| {})
}

/// Like [`placement_app`], with extra plugins or resources added before the
/// first frame.
pub fn placement_app_with(configure: impl FnOnce(&mut App)) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin))
        .init_asset::<Mesh>()
        .init_asset::<StandardMaterial>()
        .init_resource::<WebRpcInterface>()
        .init_state::<AppState>()
        .add_plugins((PlacementPlugin, FurniturePlugin))
        .add_systems(OnEnter(AppState::Running), spawn_placement_scene);
    configure(&mut app);

    let catalog = FurnitureCatalog::builtin();
    app.insert_resource(FurnitureSelection::from_catalog(&catalog).unwrap())
        .insert_resource(catalog);
    app.world_mut()
        .resource_mut::<NextState<AppState>>()
        .set(AppState::Running);
    app.update();
    app.update();
    app
}

pub fn single<C: Component>(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<C>>()
        .single(app.world())
        .unwrap()
}

pub fn object(app: &mut App) -> Entity {
    single::<TrackedFurniture>(app)
}

pub fn marker(app: &mut App) -> Entity {
    single::<MarkerAnchor>(app)
}

pub fn world_root(app: &mut App) -> Entity {
    single::<WorldRoot>(app)
}

/// Notification methods queued for the page, oldest first.
pub fn notifications(app: &App) -> Vec<(String, serde_json::Value)> {
    app.world()
        .resource::<WebRpcInterface>()
        .pending_notifications()
        .iter()
        .map(|n| (n.method.clone(), n.params.clone()))
        .collect()
}

pub fn last_notification(app: &App, method: &str) -> Option<serde_json::Value> {
    notifications(app)
        .into_iter()
        .rev()
        .find(|(m, _)| m == method)
        .map(|(_, params)| params)
}
