// Game layer: characters, level data and the scene that runs them

pub mod characters;
pub mod level;
pub mod obstacles;
pub mod scene;

pub use level::{load_level_from_path, parse_level, LevelError, LevelFile};
pub use scene::{GameScene, SceneError};
