// Level files: tile layers, player spawn and camera settings

use log::warn;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::tilemap::{TileMap, TileMapError, TileMapFile};

/// Level loading errors
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("Failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse level JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Level validation failed: {0}")]
    Invalid(String),

    #[error(transparent)]
    TileMap(#[from] TileMapError),
}

#[derive(Debug, Deserialize, Clone)]
pub struct LevelFile {
    pub version: String,
    pub level_id: String,
    pub tile_maps: Vec<TileMapFile>,
    #[serde(default)]
    pub player: PlayerSpawn,
    #[serde(default)]
    pub camera: Option<LevelCamera>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlayerSpawn {
    #[serde(default = "default_character")]
    pub character: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

impl Default for PlayerSpawn {
    fn default() -> Self {
        Self {
            character: default_character(),
            x: 0.0,
            y: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LevelCamera {
    #[serde(default = "default_scale")]
    pub scale_x: f32,
    #[serde(default = "default_scale")]
    pub scale_y: f32,
}

impl LevelFile {
    /// The tile layer called `name`
    pub fn tile_map(&self, name: &str) -> Option<&TileMapFile> {
        self.tile_maps.iter().find(|map| map.name == name)
    }

    /// Build the tile layer called `name`, `None` if the level has no such layer
    pub fn build_tile_map(&self, name: &str) -> Option<Result<TileMap, TileMapError>> {
        self.tile_map(name).map(TileMap::from_file)
    }
}

pub fn parse_level(raw: &str) -> Result<LevelFile, LevelError> {
    let level: LevelFile = serde_json::from_str(raw)?;
    validate_level(&level)?;
    Ok(level)
}

pub fn load_level_from_path(level_path: &Path) -> Result<LevelFile, LevelError> {
    let raw = fs::read_to_string(level_path).map_err(|source| LevelError::Io {
        path: level_path.to_path_buf(),
        source,
    })?;
    parse_level(&raw)
}

fn validate_level(level: &LevelFile) -> Result<(), LevelError> {
    if level.tile_maps.is_empty() {
        return Err(LevelError::Invalid("tile_maps array is empty".to_string()));
    }

    let mut names = HashSet::new();
    for map in &level.tile_maps {
        if !names.insert(map.name.as_str()) {
            return Err(LevelError::Invalid(format!(
                "duplicate tile map name '{}'",
                map.name
            )));
        }
        if map.tiles.is_empty() {
            warn!("Tile map '{}' has no tiles. This is allowed but often accidental.", map.name);
        }
        // Dimensions and tile names are checked by building the map once
        TileMap::from_file(map)?;
    }

    if let Some(camera) = &level.camera {
        if !(camera.scale_x > 0.0 && camera.scale_y > 0.0) {
            return Err(LevelError::Invalid(format!(
                "camera scale must be positive, got {}x{}",
                camera.scale_x, camera.scale_y
            )));
        }
    }

    Ok(())
}

fn default_character() -> String {
    "hero".to_string()
}

const fn default_scale() -> f32 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "pest_control_level_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    const VALID_LEVEL: &str = r#"
    {
      "version": "0.1",
      "level_id": "meadow",
      "tile_maps": [
        {
          "name": "terrain",
          "columns": 2,
          "rows": 2,
          "tile_size": [32.0, 32.0],
          "tile_set": [ { "name": "grass" } ],
          "tiles": [["grass", "grass"], ["grass", "grass"]]
        },
        {
          "name": "obstacles",
          "columns": 2,
          "rows": 2,
          "tile_size": [32.0, 32.0],
          "tile_set": [ { "name": "rock", "user_data": { "obstacle": true } } ],
          "tiles": [[null, "rock"], [null, null]]
        }
      ],
      "player": { "x": 4.0, "y": -8.0 }
    }
    "#;

    #[test]
    fn load_level_from_path_parses_valid_level() {
        let path = temp_file_path("valid");
        fs::write(&path, VALID_LEVEL).expect("failed to write temp level file");

        let level = load_level_from_path(&path).expect("valid level should load");
        assert_eq!(level.level_id, "meadow");
        assert_eq!(level.tile_maps.len(), 2);
        assert_eq!(level.player.character, "hero");
        assert_eq!(level.player.x, 4.0);
        assert!(level.camera.is_none());
        assert!(level.tile_map("obstacles").is_some());
        assert!(level.build_tile_map("terrain").unwrap().is_ok());
        assert!(level.build_tile_map("bugspray").is_none());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_level_from_missing_path_is_io_error() {
        let path = temp_file_path("missing");
        let err = load_level_from_path(&path).expect_err("missing file should fail");
        assert!(matches!(err, LevelError::Io { .. }));
    }

    #[test]
    fn parse_level_rejects_bad_json() {
        assert!(matches!(parse_level("{ not json"), Err(LevelError::Parse(_))));
    }

    #[test]
    fn parse_level_rejects_empty_tile_maps() {
        let err = parse_level(r#"{ "version": "0.1", "level_id": "x", "tile_maps": [] }"#)
            .expect_err("empty tile maps should fail");
        assert!(err.to_string().contains("tile_maps array is empty"));
    }

    #[test]
    fn parse_level_rejects_duplicate_map_names() {
        let raw = VALID_LEVEL.replace("\"obstacles\"", "\"terrain\"");
        let err = parse_level(&raw).expect_err("duplicate names should fail");
        assert!(err.to_string().contains("duplicate tile map name 'terrain'"));
    }

    #[test]
    fn parse_level_rejects_unknown_tiles() {
        let raw = VALID_LEVEL.replace("[null, \"rock\"]", "[null, \"lava\"]");
        let err = parse_level(&raw).expect_err("unknown tile should fail");
        assert!(matches!(
            err,
            LevelError::TileMap(TileMapError::UnknownTile { .. })
        ));
    }

    #[test]
    fn level_camera_scale_defaults_to_one() {
        let raw = VALID_LEVEL.replace(
            "\"player\": { \"x\": 4.0, \"y\": -8.0 }",
            "\"camera\": { \"scale_y\": 2.0 }",
        );
        let level = parse_level(&raw).expect("camera block should parse");
        let camera = level.camera.expect("camera present");
        assert_eq!(camera.scale_x, 1.0);
        assert_eq!(camera.scale_y, 2.0);
        assert_eq!(level.player.x, 0.0);
    }

    #[test]
    fn parse_level_rejects_zero_camera_scale() {
        let raw = VALID_LEVEL.replace(
            "\"player\": { \"x\": 4.0, \"y\": -8.0 }",
            "\"camera\": { \"scale_x\": 0.0 }",
        );
        assert!(matches!(parse_level(&raw), Err(LevelError::Invalid(_))));
    }
}
