// Math utilities and helper functions

use glam::Vec2;
use rapier2d::prelude::{Real, Vector};

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Convert a glam vector into a rapier (nalgebra) vector
pub fn to_physics(v: Vec2) -> Vector<Real> {
    Vector::new(v.x, v.y)
}

/// Convert a rapier (nalgebra) vector into a glam vector
pub fn from_physics(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Axis-aligned rectangle in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from its center and full size
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Shrink the rectangle by `dx` on the left and right and `dy` on the
    /// top and bottom. The result may be inverted if the insets are larger
    /// than the half extents.
    pub fn inset_by(&self, dx: f32, dy: f32) -> Self {
        Self {
            min: Vec2::new(self.min.x + dx, self.min.y + dy),
            max: Vec2::new(self.max.x - dx, self.max.y - dy),
        }
    }

    /// Check if a point is inside the rectangle (edges included)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Closest point inside the rectangle
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            clamp(point.x, self.min.x, self.max.x),
            clamp(point.y, self.min.y, self.max.y),
        )
    }

    /// True when the rectangle has collapsed to a single point
    pub fn is_point(&self) -> bool {
        self.min == self.max
    }

    /// Corners in counter-clockwise order starting at the bottom left
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }
}
