// Type-safe asset handles

use std::marker::PhantomData;

/// Unique identifier for an asset, derived from its key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Create an asset ID from an asset key
    pub fn from_key(key: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Handle to a registered asset
///
/// The `T` parameter ties a handle to the kind of asset it names.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct AssetHandle<T> {
    pub(crate) id: AssetId,
    _phantom: PhantomData<T>,
}

// Manual impls: the marker types are not Copy themselves
impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AssetHandle<T> {}

impl<T> AssetHandle<T> {
    pub(crate) fn new(id: AssetId) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    pub fn id(&self) -> AssetId {
        self.id
    }
}

// Marker type
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TextureAsset;

pub type TextureHandle = AssetHandle<TextureAsset>;
