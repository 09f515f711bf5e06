// Presentation layer: camera, sprites and the actions animating them
//
// Drawing itself belongs to the host. This module only keeps the state a
// host renderer needs: which texture each sprite shows, its tint and scale,
// and where the camera looks.

pub mod action;
mod camera;
mod sprite;

pub use action::{SpriteAction, SpriteLook};
pub use camera::{compute_follow_region, Camera, CameraConstraints};
pub use sprite::Sprite;

/// Capability to run and cancel actions on an entity
///
/// Running an action under a key replaces whatever was running under that
/// key before; unkeyed actions run until they finish.
pub trait ActionRunner {
    fn run_action(&mut self, action: SpriteAction, key: Option<&str>);

    fn remove_action(&mut self, key: &str);

    fn remove_all_actions(&mut self);

    fn has_action(&self, key: &str) -> bool;
}
