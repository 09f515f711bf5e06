// Asset management
//
// Texture keys used by sprites and animations are registered here before a
// scene is built, so missing art is reported at setup instead of mid-game.

mod handle;
mod loader;
mod manager;

pub use handle::{AssetHandle, AssetId, TextureAsset, TextureHandle};
pub use loader::{AssetLoader, AssetType};
pub use manager::{AssetManager, AssetStats, TextureInfo};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset already loaded: {0}")]
    AlreadyLoaded(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("hero_up_walk1".to_string());
        assert_eq!(err.to_string(), "Asset not found: hero_up_walk1");
    }
}
