// Directional walk animations

use std::ops::Index;

use super::direction::Direction;
use crate::engine::assets::{AssetError, AssetManager};
use crate::engine::physics::RigidBodyHandle;
use crate::engine::renderer::{ActionRunner, SpriteAction};

/// Seconds each walk frame is shown
pub const WALK_FRAME_DURATION: f32 = 0.2;

/// Asset key of one walk frame (`frame` is 1 or 2)
pub fn walk_texture_key(character: &str, direction: Direction, frame: u8) -> String {
    format!("{}_{}_walk{}", character, direction.name(), frame)
}

/// Asset key of the standing pose
pub fn stand_texture_key(character: &str, direction: Direction) -> String {
    format!("{}_{}_stand", character, direction.name())
}

/// The four looping walk cycles of a character, indexed by `Direction`
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSet {
    character: String,
    walks: [SpriteAction; 4],
}

impl AnimationSet {
    /// Build the walk loops for `character` with the standard frame time
    pub fn build(character: &str) -> Self {
        Self::with_frame_duration(character, WALK_FRAME_DURATION)
    }

    /// Build the walk loops with a custom frame time
    pub fn with_frame_duration(character: &str, frame_duration: f32) -> Self {
        let walk = |direction: Direction| {
            SpriteAction::animate(
                [
                    walk_texture_key(character, direction, 1),
                    walk_texture_key(character, direction, 2),
                ],
                frame_duration,
            )
            .repeat_forever()
        };

        Self {
            character: character.to_string(),
            walks: Direction::ALL.map(walk),
        }
    }

    /// Build the walk loops and make sure every frame is a registered texture
    pub fn build_checked(character: &str, assets: &AssetManager) -> Result<Self, AssetError> {
        let set = Self::build(character);
        set.verify(assets)?;
        Ok(set)
    }

    /// Fails with the first texture key `assets` does not know
    pub fn verify(&self, assets: &AssetManager) -> Result<(), AssetError> {
        for key in self.texture_keys() {
            assets.require_texture(key)?;
        }
        Ok(())
    }

    pub fn character(&self) -> &str {
        &self.character
    }

    pub fn get(&self, direction: Direction) -> &SpriteAction {
        &self.walks[direction.index()]
    }

    /// Every texture key used by the set, in direction order
    pub fn texture_keys(&self) -> Vec<&str> {
        self.walks.iter().flat_map(SpriteAction::textures).collect()
    }
}

impl Index<Direction> for AnimationSet {
    type Output = SpriteAction;

    fn index(&self, direction: Direction) -> &SpriteAction {
        self.get(direction)
    }
}

/// An entity that shows walk animations and may own a physics body
pub trait Animatable {
    fn animations(&self) -> &AnimationSet;

    /// Where animations are run and cancelled
    fn action_runner(&mut self) -> &mut dyn ActionRunner;

    /// `None` until the entity is attached to a physics world
    fn body_handle(&self) -> Option<RigidBodyHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_keys_follow_naming_convention() {
        assert_eq!(walk_texture_key("hero", Direction::Down, 1), "hero_down_walk1");
        assert_eq!(stand_texture_key("hero", Direction::Down), "hero_down_stand");
    }

    #[test]
    fn test_build_orders_by_direction() {
        let set = AnimationSet::build("hero");
        assert_eq!(set.character(), "hero");
        assert_eq!(
            set.texture_keys(),
            vec![
                "hero_up_walk1",
                "hero_up_walk2",
                "hero_down_walk1",
                "hero_down_walk2",
                "hero_left_walk1",
                "hero_left_walk2",
                "hero_right_walk1",
                "hero_right_walk2",
            ]
        );
    }

    #[test]
    fn test_walks_loop_forever_at_fixed_rate() {
        let set = AnimationSet::build("hero");
        for direction in Direction::ALL {
            let walk = &set[direction];
            assert!(walk.is_infinite());
            match walk {
                SpriteAction::RepeatForever(inner) => {
                    assert_eq!(inner.duration(), Some(2.0 * WALK_FRAME_DURATION));
                }
                other => panic!("expected a looping walk, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_index_matches_get() {
        let set = AnimationSet::build("hero");
        assert_eq!(&set[Direction::Left], set.get(Direction::Left));
        assert_eq!(set[Direction::Down].textures()[0], "hero_down_walk1");
    }

    #[test]
    fn test_build_checked_reports_missing_texture() {
        let mut assets = AssetManager::new("assets");
        for direction in Direction::ALL {
            for frame in 1..=2 {
                if direction == Direction::Right && frame == 2 {
                    continue;
                }
                assets
                    .register_texture(&walk_texture_key("hero", direction, frame), Vec2::splat(16.0))
                    .unwrap();
            }
        }

        let err = AnimationSet::build_checked("hero", &assets).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(ref key) if key == "hero_right_walk2"));

        assets
            .register_texture("hero_right_walk2", Vec2::splat(16.0))
            .unwrap();
        assert!(AnimationSet::build_checked("hero", &assets).is_ok());
    }
}
