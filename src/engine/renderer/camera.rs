// Camera, viewport and follow constraints for the top-down view

use glam::Vec2;

use crate::core::math::Rect;

/// Region the camera center may occupy while following a target inside
/// `world_bounds`.
///
/// `zoom` is the camera scale: world units shown per viewport unit on each
/// axis. The world is inset by half the visible extent (never more than half
/// the world) so the view never shows past the world edge. An axis where the
/// world is not larger than the view collapses onto the world center.
pub fn compute_follow_region(world_bounds: Rect, viewport_size: Vec2, zoom: Vec2) -> Rect {
    let x_inset = (viewport_size.x / 2.0 * zoom.x).min(world_bounds.width() / 2.0);
    let y_inset = (viewport_size.y / 2.0 * zoom.y).min(world_bounds.height() / 2.0);

    let mut region = world_bounds.inset_by(x_inset, y_inset);
    let center = world_bounds.center();

    if region.min.x >= region.max.x {
        region.min.x = center.x;
        region.max.x = center.x;
    }
    if region.min.y >= region.max.y {
        region.min.y = center.y;
        region.max.y = center.y;
    }

    region
}

/// Constraints applied every time the camera follows its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConstraints {
    /// Maximum distance between the camera and its target (0 = locked on)
    pub lock_distance: f32,
    /// Region the camera position is clamped into
    pub region: Rect,
    /// World the region was computed from, kept for viewport changes
    world_bounds: Rect,
}

impl CameraConstraints {
    pub fn world_bounds(&self) -> Rect {
        self.world_bounds
    }
}

/// 2D camera following a target over a bounded world
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec2,
    /// World units per viewport unit (2.0 = shows twice as much of the world)
    scale: Vec2,
    /// Viewport width
    viewport_width: f32,
    /// Viewport height
    viewport_height: f32,
    constraints: Option<CameraConstraints>,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec2, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position,
            scale: Vec2::ONE,
            viewport_width,
            viewport_height,
            constraints: None,
        }
    }

    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Set camera scale; the follow region is recomputed if constrained
    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale.max(Vec2::splat(0.01));
        self.refresh_constraints();
    }

    /// Resize the viewport; the follow region is recomputed if constrained
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.refresh_constraints();
    }

    /// Keep the camera within `lock_distance` of its target and inside the
    /// follow region of `world_bounds`
    pub fn constrain(&mut self, world_bounds: Rect, lock_distance: f32) {
        self.constraints = Some(CameraConstraints {
            lock_distance: lock_distance.max(0.0),
            region: compute_follow_region(world_bounds, self.viewport_size(), self.scale),
            world_bounds,
        });
        self.position = self.clamp_to_region(self.position);
    }

    pub fn constraints(&self) -> Option<&CameraConstraints> {
        self.constraints.as_ref()
    }

    fn refresh_constraints(&mut self) {
        if let Some(constraints) = self.constraints {
            self.constrain(constraints.world_bounds, constraints.lock_distance);
        }
    }

    fn clamp_to_region(&self, position: Vec2) -> Vec2 {
        match &self.constraints {
            Some(constraints) => constraints.region.clamp_point(position),
            None => position,
        }
    }

    /// Move the camera after its target: first the distance lock, then the
    /// follow region, which wins when the two disagree
    pub fn follow(&mut self, target: Vec2) {
        let Some(constraints) = self.constraints else {
            self.position = target;
            return;
        };

        let offset = self.position - target;
        let distance = offset.length();
        if distance > constraints.lock_distance {
            self.position = target + offset / distance * constraints.lock_distance;
        }

        self.position = constraints.region.clamp_point(self.position);
    }

    /// Convert screen coordinates (pixels, y down) to world coordinates
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        let normalized_x = (screen_pos.x / self.viewport_width) * 2.0 - 1.0;
        let normalized_y = 1.0 - (screen_pos.y / self.viewport_height) * 2.0;

        let half = self.half_extents();

        Vec2::new(
            self.position.x + normalized_x * half.x,
            self.position.y + normalized_y * half.y,
        )
    }

    /// Half of the visible world extent on each axis
    pub fn half_extents(&self) -> Vec2 {
        self.viewport_size() / 2.0 * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn world() -> Rect {
        Rect::new(Vec2::new(-500.0, -300.0), Vec2::new(500.0, 300.0))
    }

    #[test]
    fn test_follow_region_insets_by_half_viewport() {
        let region = compute_follow_region(world(), Vec2::new(400.0, 200.0), Vec2::ONE);
        assert_eq!(region.min, Vec2::new(-300.0, -200.0));
        assert_eq!(region.max, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_follow_region_applies_zoom() {
        let region = compute_follow_region(world(), Vec2::new(400.0, 200.0), Vec2::new(2.0, 1.5));
        assert_eq!(region.min, Vec2::new(-100.0, -150.0));
        assert_eq!(region.max, Vec2::new(100.0, 150.0));
    }

    #[test]
    fn test_follow_region_collapses_when_world_is_small() {
        let small = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 80.0));
        let region = compute_follow_region(small, Vec2::new(1280.0, 720.0), Vec2::ONE);

        assert!(region.is_point());
        assert_eq!(region.center(), Vec2::new(50.0, 40.0));
    }

    #[test]
    fn test_follow_region_collapses_single_axis() {
        let wide = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(2000.0, 100.0));
        let region = compute_follow_region(wide, Vec2::new(400.0, 400.0), Vec2::ONE);

        assert_eq!(region.min.x, 200.0);
        assert_eq!(region.max.x, 1800.0);
        assert_eq!(region.min.y, 50.0);
        assert_eq!(region.max.y, 50.0);
    }

    #[test]
    fn test_follow_region_contains_player_inside_large_world() {
        let region = compute_follow_region(world(), Vec2::new(400.0, 200.0), Vec2::ONE);
        let player = Vec2::new(120.0, -80.0);
        assert!(region.width() > 0.0 && region.height() > 0.0);
        assert!(region.contains(player));
    }

    #[test]
    fn test_follow_locks_onto_target() {
        let mut camera = Camera::new(Vec2::ZERO, 400.0, 200.0);
        camera.constrain(world(), 0.0);

        camera.follow(Vec2::new(50.0, -20.0));
        assert_eq!(camera.position, Vec2::new(50.0, -20.0));
    }

    #[test]
    fn test_follow_is_clamped_by_region() {
        let mut camera = Camera::new(Vec2::ZERO, 400.0, 200.0);
        camera.constrain(world(), 0.0);

        camera.follow(Vec2::new(490.0, 290.0));
        assert_eq!(camera.position, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_follow_with_slack() {
        let mut camera = Camera::new(Vec2::ZERO, 400.0, 200.0);
        camera.constrain(world(), 10.0);

        camera.follow(Vec2::new(5.0, 0.0));
        assert_eq!(camera.position, Vec2::ZERO, "inside slack, camera stays");

        camera.follow(Vec2::new(30.0, 0.0));
        assert_relative_eq!(camera.position.x, 20.0, epsilon = 1e-4);
    }

    #[test]
    fn test_resize_recomputes_region() {
        let mut camera = Camera::new(Vec2::ZERO, 400.0, 200.0);
        camera.constrain(world(), 0.0);
        camera.resize(800.0, 400.0);

        let region = camera.constraints().unwrap().region;
        assert_eq!(region.min, Vec2::new(-100.0, -100.0));
        assert_eq!(region.max, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_unconstrained_camera_tracks_target() {
        let mut camera = Camera::new(Vec2::ZERO, 400.0, 200.0);
        camera.follow(Vec2::new(9000.0, 9000.0));
        assert_eq!(camera.position, Vec2::new(9000.0, 9000.0));
    }

    #[test]
    fn test_screen_to_world() {
        let mut camera = Camera::new(Vec2::new(100.0, 50.0), 800.0, 600.0);
        camera.set_scale(Vec2::splat(0.5));

        let center = camera.screen_to_world(Vec2::new(400.0, 300.0));
        assert_relative_eq!(center.x, 100.0);
        assert_relative_eq!(center.y, 50.0);

        let top_left = camera.screen_to_world(Vec2::ZERO);
        assert_relative_eq!(top_left.x, -100.0);
        assert_relative_eq!(top_left.y, 200.0);

        let bottom_right = camera.screen_to_world(Vec2::new(800.0, 600.0));
        assert_relative_eq!(bottom_right.x, 300.0);
        assert_relative_eq!(bottom_right.y, -100.0);
    }
}
