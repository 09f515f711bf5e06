// Status effects shown on a character's sprite

use glam::{Vec2, Vec4};
use log::debug;

use crate::engine::renderer::{ActionRunner, Sprite, SpriteAction};

const BLINK_DURATION: f32 = 0.2;

/// A temporary condition with a visible effect on the sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusEffect {
    /// Carrying bug spray: enlarged and blinking green
    Bugspray,
}

impl StatusEffect {
    /// Action key of the effect's blink; unique per effect
    pub fn action_key(self) -> &'static str {
        match self {
            StatusEffect::Bugspray => "blink_bugspray",
        }
    }

    pub fn scale(self) -> f32 {
        match self {
            StatusEffect::Bugspray => 1.5,
        }
    }

    pub fn tint(self) -> Vec4 {
        match self {
            StatusEffect::Bugspray => Vec4::new(0.0, 1.0, 0.0, 1.0),
        }
    }

    fn blink(self) -> SpriteAction {
        SpriteAction::sequence(vec![
            SpriteAction::colorize(self.tint(), 1.0, BLINK_DURATION),
            SpriteAction::colorize_blend(0.0, BLINK_DURATION),
        ])
        .repeat_forever()
    }
}

/// The status effects active on one entity
#[derive(Debug, Clone, Default)]
pub struct StatusEffects {
    active: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, effect: StatusEffect) -> bool {
        self.active.contains(&effect)
    }

    pub fn active(&self) -> &[StatusEffect] {
        &self.active
    }

    /// Largest scale among active effects, 1.0 with none
    pub fn composite_scale(&self) -> f32 {
        self.active
            .iter()
            .map(|effect| effect.scale())
            .fold(1.0, f32::max)
    }

    /// Start an effect. Returns false if it was already active.
    pub fn apply(&mut self, effect: StatusEffect, sprite: &mut Sprite) -> bool {
        if self.is_active(effect) {
            return false;
        }

        debug!("Status {:?} applied", effect);
        self.active.push(effect);
        self.sync_scale(sprite);
        sprite.run_action(effect.blink(), Some(effect.action_key()));
        true
    }

    /// End an effect. Returns false if it was not active.
    pub fn remove(&mut self, effect: StatusEffect, sprite: &mut Sprite) -> bool {
        let Some(index) = self.active.iter().position(|active| *active == effect) else {
            return false;
        };

        debug!("Status {:?} removed", effect);
        self.active.remove(index);
        self.sync_scale(sprite);
        // Fade out under the same key so a quick re-apply replaces it
        sprite.run_action(
            SpriteAction::colorize_blend(0.0, BLINK_DURATION),
            Some(effect.action_key()),
        );
        true
    }

    /// Restart the blink of every active effect, e.g. after the sprite's
    /// actions were all cancelled
    pub fn restore(&self, sprite: &mut Sprite) {
        for effect in &self.active {
            if !sprite.has_action(effect.action_key()) {
                sprite.run_action(effect.blink(), Some(effect.action_key()));
            }
        }
    }

    /// Scale the sprite to the composite scale, keeping a horizontal flip
    fn sync_scale(&self, sprite: &mut Sprite) {
        let scale = self.composite_scale();
        let flip = if sprite.scale.x < 0.0 { -1.0 } else { 1.0 };
        sprite.scale = Vec2::new(flip * scale, scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> Sprite {
        Sprite::with_texture("hero_down_stand", Vec2::splat(16.0))
    }

    #[test]
    fn test_apply_scales_and_blinks() {
        let mut sprite = hero();
        let mut status = StatusEffects::new();

        assert!(status.apply(StatusEffect::Bugspray, &mut sprite));
        assert!(status.is_active(StatusEffect::Bugspray));
        assert_eq!(sprite.scale, Vec2::splat(1.5));
        assert!(sprite.has_action("blink_bugspray"));
        assert_eq!(sprite.color(), StatusEffect::Bugspray.tint());
    }

    #[test]
    fn test_double_apply_is_noop() {
        let mut sprite = hero();
        let mut status = StatusEffects::new();

        status.apply(StatusEffect::Bugspray, &mut sprite);
        assert!(!status.apply(StatusEffect::Bugspray, &mut sprite));
        assert_eq!(status.active().len(), 1);
        assert_eq!(sprite.action_count(), 1);
    }

    #[test]
    fn test_flip_is_preserved() {
        let mut sprite = hero();
        sprite.scale.x = -1.0;
        let mut status = StatusEffects::new();

        status.apply(StatusEffect::Bugspray, &mut sprite);
        assert_eq!(sprite.scale, Vec2::new(-1.5, 1.5));

        status.remove(StatusEffect::Bugspray, &mut sprite);
        assert_eq!(sprite.scale, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_remove_fades_out() {
        let mut sprite = hero();
        let mut status = StatusEffects::new();

        status.apply(StatusEffect::Bugspray, &mut sprite);
        sprite.update(0.2);
        assert!(status.remove(StatusEffect::Bugspray, &mut sprite));
        assert!(!status.remove(StatusEffect::Bugspray, &mut sprite));

        // The fade finishes and leaves no tint behind
        sprite.update(0.25);
        assert_eq!(sprite.action_count(), 0);
        assert_eq!(sprite.color_blend_factor(), 0.0);
        assert_eq!(status.composite_scale(), 1.0);
    }

    #[test]
    fn test_restore_after_actions_cleared() {
        let mut sprite = hero();
        let mut status = StatusEffects::new();
        status.apply(StatusEffect::Bugspray, &mut sprite);

        sprite.remove_all_actions();
        status.restore(&mut sprite);
        assert!(sprite.has_action("blink_bugspray"));
    }
}
