use glam::Vec2;
use rapier2d::prelude::*;

use super::collision::{ColliderTags, ContactEvent, ContactEventQueue};
use crate::core::math::{from_physics, to_physics};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Physics capabilities the movement layer needs from a simulation
///
/// Every accessor returns `None`/`false` for a body the simulation does not
/// know about, so callers can treat "not attached yet" as a no-op.
pub trait BodyAccess {
    fn body_position(&self, body: RigidBodyHandle) -> Option<Vec2>;

    fn body_velocity(&self, body: RigidBodyHandle) -> Option<Vec2>;

    /// Returns false when the body does not exist
    fn set_body_velocity(&mut self, body: RigidBodyHandle, velocity: Vec2) -> bool;
}

/// Top-down physics world that owns the whole rapier2d simulation
pub struct PhysicsWorld {
    /// Gravity vector (zero for a top-down world)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline for scene queries
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Contact events of the last step
    contact_event_queue: ContactEventQueue,
}

impl PhysicsWorld {
    /// Create a new top-down physics world (no gravity)
    pub fn new() -> Self {
        Self::with_gravity(Vec2::ZERO)
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vec2) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity: to_physics(gravity),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            contact_event_queue: ContactEventQueue::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        // Clear previous step's contact events
        self.contact_event_queue.clear();

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.contact_event_queue,
        );
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Category and masks a collider was built with
    pub fn collider_tags(&self, handle: ColliderHandle) -> Option<ColliderTags> {
        self.collider_set
            .get(handle)
            .and_then(|collider| ColliderTags::from_user_data(collider.user_data))
    }

    /// Teleport a body, keeping its velocity
    pub fn set_body_position(&mut self, handle: RigidBodyHandle, position: Vec2) -> bool {
        match self.rigid_body_set.get_mut(handle) {
            Some(body) => {
                body.set_translation(to_physics(position), true);
                true
            }
            None => false,
        }
    }

    /// Contact events from the last step that passed contact-mask filtering
    pub fn contact_events(&self) -> Vec<ContactEvent> {
        self.contact_event_queue.events()
    }

    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    pub fn collider_count(&self) -> usize {
        self.collider_set.len()
    }

    /// Set the timestep for physics simulation
    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }
}

impl BodyAccess for PhysicsWorld {
    fn body_position(&self, body: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(body)
            .map(|body| from_physics(body.translation()))
    }

    fn body_velocity(&self, body: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(body)
            .map(|body| from_physics(body.linvel()))
    }

    fn set_body_velocity(&mut self, body: RigidBodyHandle, velocity: Vec2) -> bool {
        match self.rigid_body_set.get_mut(body) {
            Some(body) => {
                body.set_linvel(to_physics(velocity), true);
                true
            }
            None => false,
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
