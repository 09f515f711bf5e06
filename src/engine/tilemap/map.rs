// Tile map layer loaded from level files

use glam::Vec2;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use super::{TileCoordinates, TileDefinition, TileGrid, TileMapError};
use crate::core::math::Rect;

/// A tile layer as written in a level file
#[derive(Debug, Deserialize, Clone)]
pub struct TileMapFile {
    pub name: String,
    pub columns: usize,
    pub rows: usize,
    pub tile_size: [f32; 2],
    /// Center of the map in world space
    #[serde(default)]
    pub position: [f32; 2],
    #[serde(default)]
    pub tile_set: Vec<TileDefinitionFile>,
    /// Tile names, one list per row from the top row down. Empty means an
    /// empty layer.
    #[serde(default)]
    pub tiles: Vec<Vec<Option<String>>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TileDefinitionFile {
    pub name: String,
    /// Image size; defaults to the map's tile size
    #[serde(default)]
    pub size: Option<[f32; 2]>,
    #[serde(default)]
    pub user_data: HashMap<String, Value>,
}

/// A rectangular grid of tiles centered on `position`
#[derive(Debug, Clone)]
pub struct TileMap {
    name: String,
    columns: usize,
    rows: usize,
    tile_size: Vec2,
    position: Vec2,
    tile_set: Vec<TileDefinition>,
    /// Index into `tile_set` per cell, row-major from row 0 (bottom)
    cells: Vec<Option<usize>>,
}

impl TileMap {
    /// Create an empty map
    pub fn new(
        name: &str,
        columns: usize,
        rows: usize,
        tile_size: Vec2,
        position: Vec2,
    ) -> Result<Self, TileMapError> {
        if !(tile_size.x > 0.0 && tile_size.y > 0.0) {
            return Err(TileMapError::InvalidTileSize {
                map: name.to_string(),
                width: tile_size.x,
                height: tile_size.y,
            });
        }

        Ok(Self {
            name: name.to_string(),
            columns,
            rows,
            tile_size,
            position,
            tile_set: Vec::new(),
            cells: vec![None; columns * rows],
        })
    }

    /// Build a map from its level-file form, validating dimensions and names
    pub fn from_file(file: &TileMapFile) -> Result<Self, TileMapError> {
        let mut map = Self::new(
            &file.name,
            file.columns,
            file.rows,
            Vec2::from(file.tile_size),
            Vec2::from(file.position),
        )?;

        for definition in &file.tile_set {
            let size = definition.size.map(Vec2::from).unwrap_or(map.tile_size);
            let mut tile = TileDefinition::new(&definition.name, size);
            tile.user_data = definition.user_data.clone();
            map.add_definition(tile)?;
        }

        if file.tiles.is_empty() {
            return Ok(map);
        }

        if file.tiles.len() != file.rows {
            return Err(TileMapError::RowCount {
                map: file.name.clone(),
                expected: file.rows,
                actual: file.tiles.len(),
            });
        }

        for (line, cells) in file.tiles.iter().enumerate() {
            if cells.len() != file.columns {
                return Err(TileMapError::ColumnCount {
                    map: file.name.clone(),
                    row: line,
                    expected: file.columns,
                    actual: cells.len(),
                });
            }

            // Rows are authored top-down; row 0 is the bottom of the map
            let row = file.rows - 1 - line;
            for (column, tile) in cells.iter().enumerate() {
                map.set_tile(TileCoordinates::new(column, row), tile.as_deref())?;
            }
        }

        Ok(map)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Register a tile definition; names must be unique within a map
    pub fn add_definition(&mut self, definition: TileDefinition) -> Result<(), TileMapError> {
        if self.tile_set_definition(&definition.name).is_some() {
            return Err(TileMapError::DuplicateTile {
                map: self.name.clone(),
                tile: definition.name,
            });
        }
        self.tile_set.push(definition);
        Ok(())
    }

    /// Look up a tile definition by name
    pub fn tile_set_definition(&self, name: &str) -> Option<&TileDefinition> {
        self.tile_set.iter().find(|tile| tile.name == name)
    }

    /// Place a named tile in a cell, or clear it with `None`
    pub fn set_tile(
        &mut self,
        coordinates: TileCoordinates,
        tile: Option<&str>,
    ) -> Result<(), TileMapError> {
        let index = self
            .cell_index(coordinates)
            .ok_or_else(|| TileMapError::OutOfBounds {
                map: self.name.clone(),
                column: coordinates.column,
                row: coordinates.row,
            })?;

        let definition = match tile {
            Some(name) => Some(
                self.tile_set
                    .iter()
                    .position(|tile| tile.name == name)
                    .ok_or_else(|| TileMapError::UnknownTile {
                        map: self.name.clone(),
                        tile: name.to_string(),
                    })?,
            ),
            None => None,
        };

        self.cells[index] = definition;
        Ok(())
    }

    fn cell_index(&self, coordinates: TileCoordinates) -> Option<usize> {
        if coordinates.column < self.columns && coordinates.row < self.rows {
            Some(coordinates.row * self.columns + coordinates.column)
        } else {
            None
        }
    }

    /// World position of the map's bottom-left corner
    fn origin(&self) -> Vec2 {
        self.position - self.map_size() / 2.0
    }

    fn map_size(&self) -> Vec2 {
        Vec2::new(self.columns as f32, self.rows as f32) * self.tile_size
    }
}

impl TileGrid for TileMap {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn tile_definition(&self, coordinates: TileCoordinates) -> Option<&TileDefinition> {
        let index = self.cell_index(coordinates)?;
        self.cells[index].map(|definition| &self.tile_set[definition])
    }

    fn center_of_tile(&self, coordinates: TileCoordinates) -> Vec2 {
        let cell = Vec2::new(coordinates.column as f32, coordinates.row as f32);
        self.origin() + (cell + Vec2::splat(0.5)) * self.tile_size
    }

    fn tile_coordinates(&self, position: Vec2) -> Option<TileCoordinates> {
        let local = (position - self.origin()) / self.tile_size;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }

        let coordinates = TileCoordinates::new(local.x.floor() as usize, local.y.floor() as usize);
        self.cell_index(coordinates).map(|_| coordinates)
    }

    fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    fn frame(&self) -> Rect {
        Rect::from_center_size(self.position, self.map_size())
    }
}
