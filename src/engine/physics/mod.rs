// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{BodyBuilder, ColliderBuilder2D};
pub use collision::{CategorySet, ColliderTags, ContactEvent, PhysicsCategory};
pub use world::{BodyAccess, ColliderHandle, PhysicsWorld, RigidBodyHandle};
