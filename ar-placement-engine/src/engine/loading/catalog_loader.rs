use crate::engine::assets::furniture_catalog::FurnitureCatalog;
use crate::engine::core::app_state::{AppState, announce_running};
use crate::furniture::selection::FurnitureSelection;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::furniture::CATALOG_ASSET_PATH;
use constants::ui::FURNITURE_SELECTOR_ID;
use serde::Serialize;

#[derive(Resource, Default)]
pub struct CatalogLoader {
    handle: Option<Handle<FurnitureCatalog>>,
    installed: bool,
}

/// Where the installed catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Asset,
    Builtin,
}

// Start the loading process
pub fn start_loading(mut loader: ResMut<CatalogLoader>, asset_server: Res<AssetServer>) {
    info!("Loading furniture catalog from: {}", CATALOG_ASSET_PATH);
    loader.handle = Some(asset_server.load(CATALOG_ASSET_PATH));
}

/// Use the loaded catalog if it validates, otherwise the built-in one.
pub fn choose_catalog(loaded: Option<&FurnitureCatalog>) -> (FurnitureCatalog, CatalogSource) {
    match loaded.map(|catalog| (catalog, catalog.validate())) {
        Some((catalog, Ok(()))) => (catalog.clone(), CatalogSource::Asset),
        Some((_, Err(error))) => {
            error!("Catalog asset rejected, using built-in catalog: {error}");
            (FurnitureCatalog::builtin(), CatalogSource::Builtin)
        }
        None => (FurnitureCatalog::builtin(), CatalogSource::Builtin),
    }
}

// Install the catalog once it has loaded (or failed to) and move on.
pub fn load_catalog_system(
    mut loader: ResMut<CatalogLoader>,
    asset_server: Res<AssetServer>,
    catalogs: Res<Assets<FurnitureCatalog>>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if loader.installed {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    let (catalog, source) = if let Some(loaded) = catalogs.get(&handle) {
        choose_catalog(Some(loaded))
    } else if let Some(LoadState::Failed(error)) = asset_server.get_load_state(&handle) {
        warn!("Catalog asset unavailable ({error}), using built-in catalog");
        choose_catalog(None)
    } else {
        return;
    };

    // A validated catalog always contains its default type.
    let selection = match FurnitureSelection::from_catalog(&catalog) {
        Ok(selection) => selection,
        Err(error) => {
            error!("Catalog has no usable default type: {error}");
            return;
        }
    };

    info!(
        "✓ Furniture catalog installed ({:?}, {} types)",
        source,
        catalog.furniture.len()
    );
    rpc_interface.send_notification(
        "catalog_loaded",
        serde_json::json!({
            "element_id": FURNITURE_SELECTOR_ID,
            "source": source,
            "catalog": catalog.to_json(),
        }),
    );

    commands.insert_resource(selection);
    commands.insert_resource(catalog);
    loader.installed = true;

    announce_running();
    next_state.set(AppState::Running);
}
