// Cardinal facing directions

use glam::Vec2;

/// One of the four directions a character can face.
///
/// The ordinal order (Up, Down, Left, Right) is the index of the matching
/// walk loop in an `AnimationSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    /// All directions in ordinal order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Classify a velocity or displacement.
    ///
    /// The vertical axis only wins when strictly larger, so diagonals and the
    /// zero vector resolve horizontally (`(0, 0)` is `Right`).
    pub fn from_vector(v: Vec2) -> Self {
        if v.y.abs() > v.x.abs() {
            if v.y < 0.0 {
                Direction::Down
            } else {
                Direction::Up
            }
        } else if v.x < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name used in asset keys
    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::Down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_dominant() {
        assert_eq!(Direction::from_vector(Vec2::new(0.0, -5.0)), Direction::Down);
        assert_eq!(Direction::from_vector(Vec2::new(3.0, 4.0)), Direction::Up);
        assert_eq!(Direction::from_vector(Vec2::new(-0.1, -0.2)), Direction::Down);
    }

    #[test]
    fn test_horizontal_dominant() {
        assert_eq!(Direction::from_vector(Vec2::new(-5.0, 1.0)), Direction::Left);
        assert_eq!(Direction::from_vector(Vec2::new(150.0, 0.0)), Direction::Right);
    }

    #[test]
    fn test_ties_go_horizontal() {
        assert_eq!(Direction::from_vector(Vec2::new(2.0, 2.0)), Direction::Right);
        assert_eq!(Direction::from_vector(Vec2::new(-2.0, 2.0)), Direction::Left);
        assert_eq!(Direction::from_vector(Vec2::new(-2.0, -2.0)), Direction::Left);
    }

    #[test]
    fn test_zero_vector_is_right() {
        for _ in 0..3 {
            assert_eq!(Direction::from_vector(Vec2::ZERO), Direction::Right);
        }
    }

    #[test]
    fn test_classification_sweep() {
        // Sample the plane and check the sign rules hold everywhere
        for i in -10..=10 {
            for j in -10..=10 {
                let v = Vec2::new(i as f32 * 0.7, j as f32 * 1.3);
                let direction = Direction::from_vector(v);
                if v.y.abs() > v.x.abs() {
                    let expected = if v.y < 0.0 { Direction::Down } else { Direction::Up };
                    assert_eq!(direction, expected, "{v:?}");
                } else {
                    let expected = if v.x < 0.0 { Direction::Left } else { Direction::Right };
                    assert_eq!(direction, expected, "{v:?}");
                }
            }
        }
    }

    #[test]
    fn test_ordinals_and_names() {
        for (i, direction) in Direction::ALL.iter().enumerate() {
            assert_eq!(direction.index(), i);
        }
        assert_eq!(Direction::Left.name(), "left");
    }
}
