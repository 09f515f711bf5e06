// Sprite state and the action runner that drives it

use glam::{Vec2, Vec4};

use super::action::{SpriteAction, SpriteLook};
use super::ActionRunner;

/// An action currently running on a sprite
#[derive(Debug, Clone)]
struct RunningAction {
    key: Option<String>,
    action: SpriteAction,
    elapsed: f32,
    start: SpriteLook,
}

/// A 2D sprite: transform, look and the actions animating it
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Position in world space
    pub position: Vec2,
    /// Scale (1.0 = original size, negative x = flipped)
    pub scale: Vec2,
    /// Size in pixels (width, height)
    pub size: Vec2,
    /// Z-order for layering (higher = drawn on top)
    pub z_position: f32,
    look: SpriteLook,
    actions: Vec<RunningAction>,
}

impl Sprite {
    /// Create a new sprite
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            scale: Vec2::ONE,
            size,
            z_position: 0.0,
            look: SpriteLook::default(),
            actions: Vec::new(),
        }
    }

    /// Create a sprite showing a texture
    pub fn with_texture(texture: &str, size: Vec2) -> Self {
        let mut sprite = Self::new(Vec2::ZERO, size);
        sprite.look.texture = Some(texture.to_string());
        sprite
    }

    pub fn texture(&self) -> Option<&str> {
        self.look.texture.as_deref()
    }

    pub fn color(&self) -> Vec4 {
        self.look.color
    }

    pub fn color_blend_factor(&self) -> f32 {
        self.look.color_blend_factor
    }

    /// Number of running actions
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// The action running under `key`, if any
    pub fn action(&self, key: &str) -> Option<&SpriteAction> {
        self.actions
            .iter()
            .find(|running| running.key.as_deref() == Some(key))
            .map(|running| &running.action)
    }

    /// Advance every running action by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let mut look = self.look.clone();

        for running in &mut self.actions {
            running.elapsed += dt;
            running.action.apply(running.elapsed, &running.start, &mut look);
        }

        // Finished actions leave their final state behind
        self.actions.retain(|running| match running.action.duration() {
            Some(duration) => running.elapsed < duration,
            None => true,
        });

        self.look = look;
    }
}

impl ActionRunner for Sprite {
    fn run_action(&mut self, action: SpriteAction, key: Option<&str>) {
        if let Some(key) = key {
            self.remove_action(key);
        }

        let start = self.look.clone();
        // The first frame shows immediately, like a freshly started animation
        action.apply(0.0, &start, &mut self.look);

        self.actions.push(RunningAction {
            key: key.map(str::to_string),
            action,
            elapsed: 0.0,
            start,
        });
    }

    fn remove_action(&mut self, key: &str) {
        self.actions
            .retain(|running| running.key.as_deref() != Some(key));
    }

    fn remove_all_actions(&mut self) {
        self.actions.clear();
    }

    fn has_action(&self, key: &str) -> bool {
        self.action(key).is_some()
    }
}
