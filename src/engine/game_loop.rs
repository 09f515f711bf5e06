/// Fixed timestep scheduling for the scene
///
/// Physics, movement and sprite actions advance in steps of exactly
/// `FIXED_TIMESTEP`; the window redraws at whatever rate it gets.
use log::{debug, info};
use std::time::{Duration, Instant};

/// Scene update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667);

/// Maximum number of fixed updates per frame
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Game loop timing state
pub struct GameLoop {
    /// Time not yet consumed by fixed updates
    accumulator: Duration,

    last_frame_time: Instant,

    paused: bool,

    frame_count: u64,

    update_count: u64,

    /// Length of the last frame in seconds
    frame_delta: f32,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            frame_count: 0,
            update_count: 0,
            frame_delta: 0.0,
        }
    }

    /// Begin a new frame from the wall clock, returns the number of fixed
    /// updates to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Begin a frame that lasted `frame_time`, returns the number of fixed
    /// updates to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;
        self.frame_delta = frame_time.as_secs_f32();

        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }

        // Drop the backlog of a long stall instead of replaying it next frame
        if self.accumulator >= FIXED_TIMESTEP_DURATION {
            debug!(
                "Frame took {:.1}ms, skipping {:.1}ms of updates",
                frame_time.as_secs_f32() * 1000.0,
                self.accumulator.as_secs_f32() * 1000.0
            );
            self.accumulator = Duration::ZERO;
        }

        self.update_count += updates as u64;
        updates
    }

    /// Fixed timestep in seconds
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Length of the last frame in seconds
    pub fn frame_delta(&self) -> f32 {
        self.frame_delta
    }

    /// Fraction of a fixed step left in the accumulator
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / FIXED_TIMESTEP
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            self.last_frame_time = Instant::now();
            info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.update_count(), 0);
        assert!(!game_loop.is_paused());
        assert!((game_loop.fixed_timestep() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_one_frame_one_update() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.advance(FIXED_TIMESTEP_DURATION), 1);
        assert_eq!(game_loop.update_count(), 1);
        assert_eq!(game_loop.frame_count(), 1);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut game_loop = GameLoop::new();
        let half = Duration::from_micros(8_400);

        assert_eq!(game_loop.advance(half), 0);
        assert!(game_loop.alpha() > 0.4 && game_loop.alpha() < 0.6);
        assert_eq!(game_loop.advance(half), 1);
    }

    #[test]
    fn test_max_steps_limit() {
        let mut game_loop = GameLoop::new();

        // 300ms would allow 18 updates
        let updates = game_loop.advance(Duration::from_millis(300));
        assert_eq!(updates, MAX_STEPS_PER_FRAME);
        assert!(game_loop.alpha() < 1.0, "backlog is discarded");
    }

    #[test]
    fn test_paused_no_updates() {
        let mut game_loop = GameLoop::new();
        game_loop.pause();

        assert_eq!(game_loop.advance(Duration::from_millis(50)), 0);
        assert_eq!(game_loop.frame_count(), 1);

        game_loop.toggle_pause();
        assert!(!game_loop.is_paused());
        assert_eq!(game_loop.alpha(), 0.0);
    }

    #[test]
    fn test_begin_frame_counts_frames() {
        let mut game_loop = GameLoop::new();
        game_loop.begin_frame();
        game_loop.begin_frame();
        assert_eq!(game_loop.frame_count(), 2);
        assert!(game_loop.frame_delta() >= 0.0);
    }
}
