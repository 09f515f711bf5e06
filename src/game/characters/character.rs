// Character entity

use glam::Vec2;
use log::info;

use super::animation::{stand_texture_key, Animatable, AnimationSet};
use super::direction::Direction;
use super::stats::CharacterStats;
use super::status::{StatusEffect, StatusEffects};
use crate::engine::assets::{AssetError, AssetManager};
use crate::engine::physics::{body::presets, BodyAccess, ColliderHandle, PhysicsWorld, RigidBodyHandle};
use crate::engine::renderer::{ActionRunner, Sprite};

/// A walking character: sprite, walk animations, status effects and
/// (once attached) a physics body
#[derive(Debug)]
pub struct Character {
    /// Character name, also the prefix of its texture keys
    pub name: String,
    pub stats: CharacterStats,
    pub sprite: Sprite,
    pub status: StatusEffects,
    animations: AnimationSet,

    // Physics, set by `attach_to_world`
    body_handle: Option<RigidBodyHandle>,
    collider_handle: Option<ColliderHandle>,
}

impl Character {
    /// Create a character standing face down.
    ///
    /// Fails if the standing texture or any walk frame is not registered.
    pub fn new(name: &str, stats: CharacterStats, assets: &AssetManager) -> Result<Self, AssetError> {
        let stand = stand_texture_key(name, Direction::Down);
        let size = assets
            .texture_size(&stand)
            .ok_or_else(|| AssetError::NotFound(stand.clone()))?;

        let animations = AnimationSet::with_frame_duration(name, stats.frame_duration);
        animations.verify(assets)?;

        let mut sprite = Sprite::with_texture(&stand, size);
        sprite.z_position = stats.z_position;

        Ok(Self {
            name: name.to_string(),
            stats,
            sprite,
            status: StatusEffects::new(),
            animations,
            body_handle: None,
            collider_handle: None,
        })
    }

    /// Give the character a round body at `position`. A character that
    /// already has a body is moved there instead.
    pub fn attach_to_world(&mut self, physics: &mut PhysicsWorld, position: Vec2) {
        self.sprite.position = position;

        if let Some(body) = self.body_handle {
            if physics.set_body_position(body, position) {
                return;
            }
        }

        let body = physics.add_rigid_body(presets::character_body(
            position,
            self.stats.linear_damping,
        ));
        let radius = self.sprite.size.x / 2.0;
        let collider = physics.add_collider(
            presets::character_collider(radius, self.stats.restitution),
            body,
        );

        info!("'{}' spawned at {} (radius {})", self.name, position, radius);
        self.body_handle = Some(body);
        self.collider_handle = Some(collider);
    }

    pub fn is_attached(&self) -> bool {
        self.body_handle.is_some()
    }

    pub fn collider_handle(&self) -> Option<ColliderHandle> {
        self.collider_handle
    }

    pub fn position<P: BodyAccess + ?Sized>(&self, physics: &P) -> Option<Vec2> {
        self.body_handle.and_then(|body| physics.body_position(body))
    }

    pub fn velocity<P: BodyAccess + ?Sized>(&self, physics: &P) -> Option<Vec2> {
        self.body_handle.and_then(|body| physics.body_velocity(body))
    }

    /// Move the sprite to the body and advance its actions
    pub fn update<P: BodyAccess + ?Sized>(&mut self, physics: &P, dt: f32) {
        if let Some(position) = self.position(physics) {
            self.sprite.position = position;
        }
        self.sprite.update(dt);
    }

    pub fn apply_status(&mut self, effect: StatusEffect) -> bool {
        self.status.apply(effect, &mut self.sprite)
    }

    pub fn remove_status(&mut self, effect: StatusEffect) -> bool {
        self.status.remove(effect, &mut self.sprite)
    }

    pub fn has_status(&self, effect: StatusEffect) -> bool {
        self.status.is_active(effect)
    }
}

impl Animatable for Character {
    fn animations(&self) -> &AnimationSet {
        &self.animations
    }

    fn action_runner(&mut self) -> &mut dyn ActionRunner {
        &mut self.sprite
    }

    fn body_handle(&self) -> Option<RigidBodyHandle> {
        self.body_handle
    }
}
