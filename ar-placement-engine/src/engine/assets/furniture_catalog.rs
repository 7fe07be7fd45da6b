use crate::error::PlacementError;
use bevy::color::Srgba;
use bevy::prelude::*;
use constants::furniture::{DEFAULT_FURNITURE_TYPE, FURNITURE_MAP};
use constants::render_settings::DEFAULT_ITEM_NAME;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Base geometry and colour of one furniture archetype. Dimensions are metres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureSpec {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl FurnitureSpec {
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(DEFAULT_ITEM_NAME)
    }

    /// Parse the `#RRGGBB` display token. `id` is the catalog key, used in
    /// the error.
    pub fn base_color(&self, id: &str) -> Result<Color, PlacementError> {
        Srgba::hex(&self.color)
            .map(Color::Srgba)
            .map_err(|e| PlacementError::InvalidCatalog {
                id: id.to_string(),
                reason: format!("colour {:?}: {e}", self.color),
            })
    }

    fn validate(&self, id: &str) -> Result<(), PlacementError> {
        let dims = [self.width, self.height, self.depth];
        if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(PlacementError::InvalidCatalog {
                id: id.to_string(),
                reason: format!("dimensions must be positive, got {dims:?}"),
            });
        }
        self.base_color(id).map(|_| ())
    }
}

fn default_type() -> String {
    DEFAULT_FURNITURE_TYPE.to_string()
}

/// Immutable mapping from furniture-type identifier to its spec.
/// Mirrors the JSON catalog file exactly.
#[derive(Asset, TypePath, Resource, Debug, Clone, Serialize, Deserialize)]
pub struct FurnitureCatalog {
    #[serde(default = "default_type")]
    pub default_type: String,
    pub furniture: BTreeMap<String, FurnitureSpec>,
}

impl FurnitureCatalog {
    /// Catalog compiled into the binary.
    pub fn builtin() -> Self {
        let furniture = FURNITURE_MAP
            .iter()
            .map(|info| {
                (
                    info.id.to_string(),
                    FurnitureSpec {
                        width: info.width,
                        height: info.height,
                        depth: info.depth,
                        color: info.color.to_string(),
                        display_name: Some(info.name.to_string()),
                    },
                )
            })
            .collect();

        Self {
            default_type: default_type(),
            furniture,
        }
    }

    pub fn get(&self, id: &str) -> Result<&FurnitureSpec, PlacementError> {
        self.furniture
            .get(id)
            .ok_or_else(|| PlacementError::InvalidSelection(id.to_string()))
    }

    pub fn default_spec(&self) -> Result<&FurnitureSpec, PlacementError> {
        self.get(&self.default_type)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.furniture.keys().map(String::as_str)
    }

    /// Reject empty catalogs, a dangling default type, non-positive
    /// dimensions and unparsable colours.
    pub fn validate(&self) -> Result<(), PlacementError> {
        if self.furniture.is_empty() {
            return Err(PlacementError::InvalidCatalog {
                id: "*".to_string(),
                reason: "catalog is empty".to_string(),
            });
        }
        for (id, spec) in &self.furniture {
            spec.validate(id)?;
        }
        if !self.furniture.contains_key(&self.default_type) {
            return Err(PlacementError::InvalidCatalog {
                id: self.default_type.clone(),
                reason: "default type is not in the catalog".to_string(),
            });
        }
        Ok(())
    }

    /// Catalog listing sent to the page.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "default_type": self.default_type,
            "furniture": self.furniture,
        })
    }
}
