// Texture registry

use super::{AssetError, AssetHandle, AssetId, AssetLoader, AssetType, TextureHandle};
use glam::Vec2;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// What the game knows about a registered texture
#[derive(Debug, Clone, PartialEq)]
pub struct TextureInfo {
    pub key: String,
    /// Size in pixels
    pub size: Vec2,
    /// Source file, `None` for textures registered in memory
    pub path: Option<PathBuf>,
}

/// Central registry of the textures sprites may show
///
/// Only keys and pixel sizes are tracked; drawing is left to whatever
/// presents the sprites.
pub struct AssetManager {
    loader: AssetLoader,

    textures: HashMap<AssetId, TextureInfo>,

    /// Key to ID mapping for textures
    texture_keys: HashMap<String, AssetId>,
}

impl AssetManager {
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        Self {
            loader: AssetLoader::new(asset_path),
            textures: HashMap::new(),
            texture_keys: HashMap::new(),
        }
    }

    /// Register a texture that has no file behind it
    pub fn register_texture(&mut self, key: &str, size: Vec2) -> Result<TextureHandle, AssetError> {
        if self.texture_keys.contains_key(key) {
            return Err(AssetError::AlreadyLoaded(key.to_string()));
        }

        Ok(self.insert(TextureInfo {
            key: key.to_string(),
            size,
            path: None,
        }))
    }

    /// Load a texture's metadata from `textures/{key}.png` (or jpg)
    pub fn load_texture(&mut self, key: &str) -> Result<TextureHandle, AssetError> {
        if let Some(&id) = self.texture_keys.get(key) {
            return Ok(AssetHandle::new(id));
        }

        let path = self
            .loader
            .find(AssetType::Texture, key)
            .ok_or_else(|| AssetError::NotFound(key.to_string()))?;

        let (width, height) = image::image_dimensions(&path)?;
        debug!("Loaded texture '{}' ({}x{})", key, width, height);

        Ok(self.insert(TextureInfo {
            key: key.to_string(),
            size: Vec2::new(width as f32, height as f32),
            path: Some(path),
        }))
    }

    /// Load every texture in the textures directory, returning how many
    /// were found
    pub fn scan_textures(&mut self) -> Result<usize, AssetError> {
        let keys = self.loader.list_assets(AssetType::Texture)?;
        for key in &keys {
            self.load_texture(key)?;
        }

        info!(
            "Registered {} textures from {}",
            keys.len(),
            self.loader.base_path().display()
        );
        Ok(keys.len())
    }

    fn insert(&mut self, texture: TextureInfo) -> TextureHandle {
        let id = AssetId::from_key(&texture.key);
        self.texture_keys.insert(texture.key.clone(), id);
        self.textures.insert(id, texture);
        AssetHandle::new(id)
    }

    /// Handle for a registered texture, `NotFound` if the key is unknown
    pub fn require_texture(&self, key: &str) -> Result<TextureHandle, AssetError> {
        self.texture_keys
            .get(key)
            .map(|&id| AssetHandle::new(id))
            .ok_or_else(|| AssetError::NotFound(key.to_string()))
    }

    pub fn get_texture(&self, handle: TextureHandle) -> Option<&TextureInfo> {
        self.textures.get(&handle.id())
    }

    pub fn texture_size(&self, key: &str) -> Option<Vec2> {
        let handle = self.require_texture(key).ok()?;
        self.get_texture(handle).map(|texture| texture.size)
    }

    /// Get statistics about loaded assets
    pub fn stats(&self) -> AssetStats {
        AssetStats {
            texture_count: self.textures.len(),
        }
    }

    pub fn loader(&self) -> &AssetLoader {
        &self.loader
    }
}

/// Statistics about loaded assets
#[derive(Debug, Clone, Copy)]
pub struct AssetStats {
    pub texture_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_require() {
        let mut assets = AssetManager::new("assets");
        let handle = assets
            .register_texture("hero_down_stand", Vec2::new(16.0, 24.0))
            .unwrap();

        assert_eq!(assets.require_texture("hero_down_stand").unwrap(), handle);
        assert_eq!(assets.texture_size("hero_down_stand"), Some(Vec2::new(16.0, 24.0)));
        assert!(assets.get_texture(handle).unwrap().path.is_none());
        assert_eq!(assets.stats().texture_count, 1);
    }

    #[test]
    fn test_require_missing_texture() {
        let assets = AssetManager::new("assets");
        let err = assets.require_texture("hero_up_walk1").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(ref key) if key == "hero_up_walk1"));
    }

    #[test]
    fn test_register_twice_fails() {
        let mut assets = AssetManager::new("assets");
        assets.register_texture("rock", Vec2::splat(32.0)).unwrap();
        assert!(matches!(
            assets.register_texture("rock", Vec2::splat(32.0)),
            Err(AssetError::AlreadyLoaded(_))
        ));
    }

    #[test]
    fn test_scan_reads_image_sizes() {
        let dir = std::env::temp_dir().join("pest_control_manager_scan");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("textures")).unwrap();
        image::RgbaImage::new(16, 24)
            .save(dir.join("textures/hero_down_stand.png"))
            .unwrap();

        let mut assets = AssetManager::new(&dir);
        assert_eq!(assets.scan_textures().unwrap(), 1);
        assert_eq!(assets.texture_size("hero_down_stand"), Some(Vec2::new(16.0, 24.0)));

        // Loading again returns the cached entry
        let first = assets.require_texture("hero_down_stand").unwrap();
        assert_eq!(assets.load_texture("hero_down_stand").unwrap(), first);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_scan_accepts_uppercase_extension() {
        let dir = std::env::temp_dir().join("pest_control_manager_upper");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("textures")).unwrap();
        let lower = dir.join("textures/hero_down_stand.png");
        image::RgbaImage::new(16, 16).save(&lower).unwrap();
        std::fs::rename(&lower, dir.join("textures/hero_down_stand.PNG")).unwrap();

        let mut assets = AssetManager::new(&dir);
        assert_eq!(assets.scan_textures().unwrap(), 1);
        assert_eq!(assets.texture_size("hero_down_stand"), Some(Vec2::splat(16.0)));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
