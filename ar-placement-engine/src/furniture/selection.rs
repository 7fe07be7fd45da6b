use crate::engine::assets::furniture_catalog::{FurnitureCatalog, FurnitureSpec};
use crate::error::PlacementError;
use crate::placement::components::TrackedFurniture;
use crate::placement::lock::{Anchor, PlacementLock};
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::color::Alpha;
use bevy::prelude::*;
use constants::render_settings::FURNITURE_OPACITY;

/// Currently displayed furniture type and its spec.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FurnitureSelection {
    furniture_type: String,
    spec: FurnitureSpec,
}

impl FurnitureSelection {
    /// Start from the catalog's default type.
    pub fn from_catalog(catalog: &FurnitureCatalog) -> Result<Self, PlacementError> {
        Ok(Self {
            furniture_type: catalog.default_type.clone(),
            spec: catalog.default_spec()?.clone(),
        })
    }

    /// Switch to `furniture_type`. On an unknown type the current selection
    /// is kept.
    pub fn select(
        &mut self,
        catalog: &FurnitureCatalog,
        furniture_type: &str,
    ) -> Result<&FurnitureSpec, PlacementError> {
        let spec = catalog.get(furniture_type)?;
        self.furniture_type = furniture_type.to_string();
        self.spec = spec.clone();
        Ok(&self.spec)
    }

    pub fn furniture_type(&self) -> &str {
        &self.furniture_type
    }

    pub fn spec(&self) -> &FurnitureSpec {
        &self.spec
    }
}

/// Box geometry and material derived from a catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FurnitureGeometry {
    pub size: Vec3,
    pub color: Color,
    /// Local translation that rests the box base on the marker plane.
    pub resting_offset: Vec3,
}

impl FurnitureGeometry {
    pub fn from_spec(id: &str, spec: &FurnitureSpec) -> Result<Self, PlacementError> {
        Ok(Self {
            size: spec.size(),
            color: spec.base_color(id)?.with_alpha(FURNITURE_OPACITY),
            resting_offset: Vec3::new(0.0, spec.height / 2.0, 0.0),
        })
    }

    pub fn mesh(&self) -> Mesh {
        Cuboid::from_size(self.size).into()
    }

    pub fn material(&self) -> StandardMaterial {
        StandardMaterial {
            base_color: self.color,
            alpha_mode: AlphaMode::Blend,
            ..default()
        }
    }
}

/// Request from the furniture selector.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct FurnitureSelected {
    pub furniture_type: String,
}

/// Swap the tracked object's box and material for the selected type.
///
/// While marker-anchored the box is lifted so its base rests on the marker
/// plane; a world-anchored box keeps its translation.
pub fn apply_furniture_selection(
    mut requests: EventReader<FurnitureSelected>,
    catalog: Res<FurnitureCatalog>,
    mut selection: ResMut<FurnitureSelection>,
    mut furniture: Query<
        (
            &mut Mesh3d,
            &mut MeshMaterial3d<StandardMaterial>,
            &mut Transform,
            &PlacementLock,
        ),
        With<TrackedFurniture>,
    >,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for request in requests.read() {
        let geometry = catalog
            .get(&request.furniture_type)
            .and_then(|spec| FurnitureGeometry::from_spec(&request.furniture_type, spec));
        let geometry = match geometry {
            Ok(geometry) => geometry,
            Err(error) => {
                error!("Error changing furniture type: {error}");
                rpc_interface.send_error("select_furniture", &error);
                continue;
            }
        };

        if selection.furniture_type() != request.furniture_type {
            if let Err(error) = selection.select(&catalog, &request.furniture_type) {
                error!("Error changing furniture type: {error}");
                continue;
            }
        }

        let Ok((mut mesh, mut material, mut transform, lock)) = furniture.single_mut() else {
            error!(
                "Error changing furniture type: {}",
                PlacementError::MissingHandle("tracked object")
            );
            continue;
        };

        mesh.0 = meshes.add(geometry.mesh());
        material.0 = materials.add(geometry.material());
        if lock.anchor() == Anchor::Marker {
            transform.translation = geometry.resting_offset;
        }

        info!("Furniture type selected: {}", request.furniture_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_geometry() {
        let catalog = FurnitureCatalog::builtin();
        let geometry = FurnitureGeometry::from_spec("table", catalog.get("table").unwrap()).unwrap();

        assert_eq!(geometry.size, Vec3::new(1.2, 0.8, 0.8));
        assert_eq!(geometry.resting_offset, Vec3::new(0.0, 0.4, 0.0));
        assert_eq!(geometry.color, Color::srgba_u8(0xFF, 0x57, 0x33, 255).with_alpha(0.8));
        assert_eq!(geometry.material().alpha_mode, AlphaMode::Blend);
    }

    #[test]
    fn bad_colour_names_the_catalog_key() {
        let mut spec = FurnitureCatalog::builtin().get("bed").unwrap().clone();
        spec.color = "#GG0000".to_string();

        let error = FurnitureGeometry::from_spec("bed", &spec).unwrap_err();
        assert!(matches!(error, PlacementError::InvalidCatalog { id, .. } if id == "bed"));
    }

    #[test]
    fn unknown_type_keeps_previous_selection() {
        let catalog = FurnitureCatalog::builtin();
        let mut selection = FurnitureSelection::from_catalog(&catalog).unwrap();
        selection.select(&catalog, "wardrobe").unwrap();
        let before = selection.clone();

        let result = selection.select(&catalog, "hammock");

        assert_eq!(
            result,
            Err(PlacementError::InvalidSelection("hammock".to_string()))
        );
        assert_eq!(selection, before);
        assert_eq!(selection.spec().height, 2.0);
    }
}
