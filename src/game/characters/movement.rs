// Touch-to-target movement

use glam::Vec2;
use log::debug;

use super::animation::Animatable;
use super::direction::Direction;
use super::stats::CharacterStats;
use crate::engine::physics::BodyAccess;

/// Action key the walk loop runs under
pub const ANIMATION_KEY: &str = "animation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementState {
    /// No target
    Idle,
    /// Walking toward a target
    Moving,
}

/// Drives an entity toward a target point and keeps its walk animation in
/// step with the body's velocity.
///
/// The physics body owns position and velocity; the controller only owns the
/// target. Every operation quietly does nothing while the entity has no body
/// in `physics`.
#[derive(Debug, Clone)]
pub struct MovementController {
    speed: f32,
    arrival_epsilon: f32,
    target: Option<Vec2>,
    facing: Direction,
}

impl MovementController {
    pub fn new(speed: f32, arrival_epsilon: f32) -> Self {
        Self {
            speed,
            arrival_epsilon,
            target: None,
            facing: Direction::default(),
        }
    }

    pub fn from_stats(stats: &CharacterStats) -> Self {
        Self::new(stats.move_speed, stats.arrival_epsilon)
    }

    pub fn state(&self) -> MovementState {
        if self.target.is_some() {
            MovementState::Moving
        } else {
            MovementState::Idle
        }
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    /// Direction of the last walk animation started
    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Head for `target` at full speed
    pub fn move_to<E, P>(&mut self, entity: &mut E, physics: &mut P, target: Vec2)
    where
        E: Animatable + ?Sized,
        P: BodyAccess + ?Sized,
    {
        let Some(body) = entity.body_handle() else {
            return;
        };
        let Some(position) = physics.body_position(body) else {
            return;
        };

        let velocity = (target - position).normalize_or_zero() * self.speed;
        if !physics.set_body_velocity(body, velocity) {
            return;
        }

        debug!("Moving from {} to {} at {}", position, target, velocity);
        self.target = Some(target);
        self.check_direction(entity, &*physics);
    }

    /// Run the walk loop matching the body's current velocity
    pub fn check_direction<E, P>(&mut self, entity: &mut E, physics: &P)
    where
        E: Animatable + ?Sized,
        P: BodyAccess + ?Sized,
    {
        let Some(velocity) = entity
            .body_handle()
            .and_then(|body| physics.body_velocity(body))
        else {
            return;
        };

        let direction = Direction::from_vector(velocity);
        let walk = entity.animations()[direction].clone();
        entity.action_runner().run_action(walk, Some(ANIMATION_KEY));
        self.facing = direction;
    }

    /// Halt, cancel every action on the entity and forget the target
    pub fn stop<E, P>(&mut self, entity: &mut E, physics: &mut P)
    where
        E: Animatable + ?Sized,
        P: BodyAccess + ?Sized,
    {
        let Some(body) = entity.body_handle() else {
            return;
        };
        if !physics.set_body_velocity(body, Vec2::ZERO) {
            return;
        }

        entity.action_runner().remove_all_actions();
        self.target = None;
    }

    /// Per-step arrival check. Returns true on the step the target is reached.
    pub fn tick<E, P>(&mut self, entity: &mut E, physics: &mut P) -> bool
    where
        E: Animatable + ?Sized,
        P: BodyAccess + ?Sized,
    {
        let Some(target) = self.target else {
            return false;
        };
        let Some(position) = entity
            .body_handle()
            .and_then(|body| physics.body_position(body))
        else {
            return false;
        };

        if position.distance(target) < self.arrival_epsilon {
            debug!("Arrived at {}", target);
            self.stop(entity, physics);
            return true;
        }

        false
    }

    /// A contact involving the entity began; resync the walk loop with
    /// whatever velocity the bounce left behind
    pub fn on_contact<E, P>(&mut self, entity: &mut E, physics: &P)
    where
        E: Animatable + ?Sized,
        P: BodyAccess + ?Sized,
    {
        let moving = entity
            .body_handle()
            .and_then(|body| physics.body_velocity(body))
            .map(|velocity| velocity.length() > 0.0)
            .unwrap_or(false);

        if moving {
            self.check_direction(entity, physics);
        }
    }
}

impl Default for MovementController {
    fn default() -> Self {
        Self::from_stats(&CharacterStats::default())
    }
}
