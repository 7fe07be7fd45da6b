use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
// Crate engine modules
use crate::engine::assets::furniture_catalog::FurnitureCatalog;
use crate::engine::camera::camera_fix::CameraFixPlugin;
use crate::engine::core::app_state::AppState;
use crate::engine::core::frame_sets::FrameSet;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::catalog_loader::{CatalogLoader, load_catalog_system, start_loading};
use crate::engine::scene::setup::{setup, spawn_placement_scene};
use crate::engine::systems::keyboard_shortcuts::handle_keyboard_shortcuts;
// Domain plugins
use crate::furniture::FurniturePlugin;
use crate::placement::PlacementPlugin;
// Create Web RPC modules
use crate::rpc::web_rpc::WebRpcPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(JsonAssetPlugin::<FurnitureCatalog>::new(&["catalog.json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(PlacementPlugin)
        .add_plugins(FurniturePlugin)
        .add_plugins(CameraFixPlugin)
        .init_resource::<CatalogLoader>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            load_catalog_system.run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::Running), spawn_placement_scene)
        .add_systems(
            Update,
            // Native shortcuts or no-op for WASM
            handle_keyboard_shortcuts
                .in_set(FrameSet::Ingest)
                .run_if(in_state(AppState::Running)),
        );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
