// Character system
//
// - `direction`: four-way facing from a velocity
// - `animation`: per-direction walk loops and the `Animatable` capability
// - `movement`: touch-to-target controller
// - `status`: status effects shown on the sprite
// - `character` / `stats`: the character entity and its tuning

pub mod animation;
pub mod character;
pub mod direction;
pub mod movement;
pub mod stats;
pub mod status;

// Re-export commonly used types
pub use animation::{Animatable, AnimationSet};
pub use character::Character;
pub use direction::Direction;
pub use movement::{MovementController, MovementState, ANIMATION_KEY};
pub use stats::{CharacterStats, HERO_STATS};
pub use status::{StatusEffect, StatusEffects};
