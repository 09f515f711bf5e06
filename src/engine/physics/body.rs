use super::collision::{CategorySet, ColliderTags, PhysicsCategory};
use crate::core::math::{to_physics, Rect};
use glam::Vec2;
use rapier2d::prelude::*;

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    linvel: Vector<Real>,
    linear_damping: Real,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    fn with_type(body_type: RigidBodyType) -> Self {
        Self {
            body_type,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            linear_damping: 0.0,
            can_sleep: true,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new dynamic body (affected by velocity and collisions)
    pub fn new_dynamic() -> Self {
        Self::with_type(RigidBodyType::Dynamic)
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self::with_type(RigidBodyType::Fixed)
    }

    /// Set the initial position of the body
    pub fn position(mut self, position: Vec2) -> Self {
        self.position = Isometry::translation(position.x, position.y);
        self
    }

    /// Set the initial linear velocity
    pub fn linvel(mut self, velocity: Vec2) -> Self {
        self.linvel = to_physics(velocity);
        self
    }

    /// Velocity lost per second, as a fraction
    pub fn linear_damping(mut self, damping: Real) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (characters never spin on contact)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body. Gravity never applies in a top-down world.
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .linvel(self.linvel)
            .linear_damping(self.linear_damping)
            .gravity_scale(0.0)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    tags: ColliderTags,
    friction: Real,
    restitution: Real,
}

impl ColliderBuilder2D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            tags: ColliderTags::new(PhysicsCategory::Breakable),
            friction: 0.2,
            restitution: 0.2,
        }
    }

    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self::with_shape(SharedShape::cuboid(half_width, half_height))
    }

    /// Create a circle-shaped collider
    pub fn circle(radius: Real) -> Self {
        Self::with_shape(SharedShape::ball(radius))
    }

    /// Create a closed loop of edges around a rectangle
    pub fn edge_loop(rect: Rect) -> Self {
        let vertices: Vec<Point<Real>> = rect
            .corners()
            .iter()
            .map(|corner| point![corner.x, corner.y])
            .collect();
        let indices = vec![[0, 1], [1, 2], [2, 3], [3, 0]];
        Self::with_shape(SharedShape::polyline(vertices, Some(indices)))
    }

    /// Category this collider belongs to
    pub fn category(mut self, category: PhysicsCategory) -> Self {
        self.tags.category = category;
        self
    }

    /// Categories this collider physically collides with
    pub fn collision_mask(mut self, mask: impl Into<CategorySet>) -> Self {
        self.tags.collision_mask = mask.into();
        self
    }

    /// Categories whose contacts with this collider are reported
    pub fn contact_mask(mut self, mask: impl Into<CategorySet>) -> Self {
        self.tags.contact_mask = mask.into();
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        let events = if self.tags.contact_mask.is_empty() {
            ActiveEvents::empty()
        } else {
            ActiveEvents::COLLISION_EVENTS
        };

        ColliderBuilder::new(self.shape)
            .collision_groups(self.tags.interaction_groups())
            .friction(self.friction)
            .restitution(self.restitution)
            .active_events(events)
            .user_data(self.tags.to_user_data())
            .build()
    }
}

/// Common rigid body configurations for scene objects
pub mod presets {
    use super::*;

    /// Dynamic, rotation-locked body for a walking character
    pub fn character_body(position: Vec2, linear_damping: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(position)
            .linear_damping(linear_damping)
            .lock_rotation()
            .can_sleep(false)
            .build()
    }

    /// Round character collider that reports every contact
    pub fn character_collider(radius: Real, restitution: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .category(PhysicsCategory::Player)
            .collision_mask(CategorySet::ALL)
            .contact_mask(CategorySet::ALL)
            .restitution(restitution)
            .friction(0.2)
            .build()
    }

    /// Fixed body at a tile's world center
    pub fn obstacle_body(center: Vec2) -> RigidBody {
        BodyBuilder::new_fixed().position(center).build()
    }

    /// Frictionless tile-sized box
    pub fn obstacle_collider(size: Vec2) -> Collider {
        ColliderBuilder2D::box_shape(size.x / 2.0, size.y / 2.0)
            .category(PhysicsCategory::Breakable)
            .friction(0.0)
            .build()
    }

    /// Fixed body holding the world edge loop
    pub fn edge_body() -> RigidBody {
        BodyBuilder::new_fixed().build()
    }

    /// Edge loop around the world frame
    pub fn edge_collider(frame: Rect) -> Collider {
        ColliderBuilder2D::edge_loop(frame)
            .category(PhysicsCategory::Edge)
            .build()
    }
}
