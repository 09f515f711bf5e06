// Character tuning constants

/// Movement, body and presentation settings for a character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterStats {
    // Movement
    /// Walking speed toward a target (units/second)
    pub move_speed: f32,
    /// Distance below which a target counts as reached
    pub arrival_epsilon: f32,

    // Physics
    /// Linear damping of the body
    pub linear_damping: f32,
    /// Bounciness against walls and obstacles
    pub restitution: f32,

    // Presentation
    /// Draw order of the character sprite
    pub z_position: f32,
    /// Seconds each walk frame is shown
    pub frame_duration: f32,
}

/// Settings for the player's hero
pub const HERO_STATS: CharacterStats = CharacterStats {
    move_speed: 150.0,
    arrival_epsilon: 1.0,

    linear_damping: 0.2,
    restitution: 1.0,

    // Above terrain and obstacle layers
    z_position: 50.0,
    frame_duration: 0.2,
};

impl Default for CharacterStats {
    fn default() -> Self {
        HERO_STATS
    }
}
