// Tile grids
//
// `TileGrid` is the read-only view the game needs of a tile layer: its
// dimensions, the definition placed in each cell and the mapping between
// cells and world positions. `TileMap` is the in-crate implementation loaded
// from level files.

mod map;

pub use map::{TileDefinitionFile, TileMap, TileMapFile};

use glam::Vec2;
use serde_json::Value;
use std::collections::HashMap;

use crate::core::math::Rect;

/// Tile map errors
#[derive(Debug, thiserror::Error)]
pub enum TileMapError {
    #[error("Tile map '{map}': tile size must be positive, got {width}x{height}")]
    InvalidTileSize { map: String, width: f32, height: f32 },

    #[error("Tile map '{map}': expected {expected} rows of tiles, found {actual}")]
    RowCount {
        map: String,
        expected: usize,
        actual: usize,
    },

    #[error("Tile map '{map}': row {row} has {actual} columns, expected {expected}")]
    ColumnCount {
        map: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Tile map '{map}': unknown tile '{tile}'")]
    UnknownTile { map: String, tile: String },

    #[error("Tile map '{map}': duplicate tile definition '{tile}'")]
    DuplicateTile { map: String, tile: String },

    #[error("Tile map '{map}': cell ({column}, {row}) is outside the grid")]
    OutOfBounds {
        map: String,
        column: usize,
        row: usize,
    },
}

/// Column/row address of a tile cell. Row 0 is the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoordinates {
    pub column: usize,
    pub row: usize,
}

impl TileCoordinates {
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

/// Shared record for every cell showing the same tile
#[derive(Debug, Clone, PartialEq)]
pub struct TileDefinition {
    pub name: String,
    /// Size of the tile's image in pixels
    pub size: Vec2,
    /// Free-form metadata authored with the tile
    pub user_data: HashMap<String, Value>,
}

impl TileDefinition {
    pub fn new(name: &str, size: Vec2) -> Self {
        Self {
            name: name.to_string(),
            size,
            user_data: HashMap::new(),
        }
    }

    pub fn with_user_data(mut self, key: &str, value: Value) -> Self {
        self.user_data.insert(key.to_string(), value);
        self
    }

    /// Whether `key` is present in the user data, whatever its value
    pub fn has_flag(&self, key: &str) -> bool {
        self.user_data.contains_key(key)
    }
}

/// Read-only access to a tile layer
pub trait TileGrid {
    fn rows(&self) -> usize;

    fn columns(&self) -> usize;

    /// Definition placed in a cell, `None` for empty or out-of-range cells
    fn tile_definition(&self, coordinates: TileCoordinates) -> Option<&TileDefinition>;

    /// World-space center of a cell
    fn center_of_tile(&self, coordinates: TileCoordinates) -> Vec2;

    /// Cell containing a world position, `None` outside the grid
    fn tile_coordinates(&self, position: Vec2) -> Option<TileCoordinates>;

    /// Size of one cell in world units
    fn tile_size(&self) -> Vec2;

    /// World-space rectangle covered by the grid
    fn frame(&self) -> Rect;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flag_is_key_presence() {
        let tile = TileDefinition::new("rock", Vec2::splat(32.0))
            .with_user_data("obstacle", json!(true))
            .with_user_data("breakable", json!(false))
            .with_user_data("marker", json!(1))
            .with_user_data("empty", Value::Null);

        assert!(tile.has_flag("obstacle"));
        assert!(tile.has_flag("marker"));
        assert!(tile.has_flag("breakable"));
        assert!(tile.has_flag("empty"));
        assert!(!tile.has_flag("missing"));
    }

    #[test]
    fn test_error_display() {
        let err = TileMapError::UnknownTile {
            map: "obstacles".to_string(),
            tile: "lava".to_string(),
        };
        assert_eq!(err.to_string(), "Tile map 'obstacles': unknown tile 'lava'");
    }
}
