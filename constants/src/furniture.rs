/// Base geometry and colour for one built-in furniture archetype.
pub struct FurnitureInfo {
    pub id: &'static str,
    pub name: &'static str,
    /// Metres.
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub color: &'static str,
}

/// Furniture type selected when the engine starts.
pub const DEFAULT_FURNITURE_TYPE: &str = "table";

/// Relative asset path of the JSON catalog.
pub const CATALOG_ASSET_PATH: &str = "catalog/furniture.catalog.json";

pub const FURNITURE_MAP: &[FurnitureInfo] = &[
    FurnitureInfo {
        id: "table",
        name: "Table",
        width: 1.2,
        height: 0.8,
        depth: 0.8,
        color: "#FF5733",
    },
    FurnitureInfo {
        id: "bed",
        name: "Bed",
        width: 1.4,
        height: 0.5,
        depth: 1.9,
        color: "#28B463",
    },
    FurnitureInfo {
        id: "wardrobe",
        name: "Wardrobe",
        width: 1.0,
        height: 2.0,
        depth: 0.6,
        color: "#F1C40F",
    },
    FurnitureInfo {
        id: "chair",
        name: "Chair",
        width: 0.5,
        height: 1.0,
        depth: 0.5,
        color: "#3498DB",
    },
];
