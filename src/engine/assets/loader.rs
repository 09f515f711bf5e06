// Asset file lookup

use super::AssetError;
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Texture,
    Level,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Texture => "textures",
            AssetType::Level => "levels",
        }
    }

    /// Get supported file extensions for this asset type
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            AssetType::Texture => &["png", "jpg", "jpeg"],
            AssetType::Level => &["json"],
        }
    }
}

/// Finds asset files below a base directory
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset file
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Find the file for an asset key. Extensions match in any case.
    pub fn find(&self, asset_type: AssetType, key: &str) -> Option<PathBuf> {
        let exact = asset_type
            .extensions()
            .iter()
            .map(|ext| self.resolve_path(asset_type, &format!("{key}.{ext}")))
            .find(|path| path.is_file());
        if exact.is_some() {
            return exact;
        }

        let dir = self.base_path.join(asset_type.default_directory());
        std::fs::read_dir(dir)
            .ok()?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .find(|path| {
                path.is_file()
                    && has_supported_extension(path, asset_type)
                    && path.file_stem().is_some_and(|stem| stem == key)
            })
    }

    /// Check if an asset file exists
    pub fn exists(&self, asset_type: AssetType, name: &str) -> bool {
        self.resolve_path(asset_type, name).exists()
    }

    /// List the keys (file stems) of every asset of a given type
    pub fn list_assets(&self, asset_type: AssetType) -> Result<Vec<String>, AssetError> {
        let dir = self.base_path.join(asset_type.default_directory());

        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut assets = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();

            if !path.is_file() {
                continue;
            }
            if !has_supported_extension(&path, asset_type) {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                assets.push(stem.to_string_lossy().to_string());
            }
        }

        assets.sort();
        Ok(assets)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

fn has_supported_extension(path: &Path, asset_type: AssetType) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| asset_type.extensions().contains(&ext.as_str()))
}
