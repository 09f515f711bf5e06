// Sprite actions: timed changes applied to a sprite's look

use glam::Vec4;

/// The parts of a sprite that actions are allowed to change
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteLook {
    /// Name of the texture currently shown
    pub texture: Option<String>,
    /// Tint color (RGBA)
    pub color: Vec4,
    /// How much of the tint is blended in (0.0 = none, 1.0 = full)
    pub color_blend_factor: f32,
}

impl Default for SpriteLook {
    fn default() -> Self {
        Self {
            texture: None,
            color: Vec4::ONE,
            color_blend_factor: 0.0,
        }
    }
}

/// A timed action that can run on a sprite
#[derive(Debug, Clone, PartialEq)]
pub enum SpriteAction {
    /// Show each texture in turn for `time_per_frame` seconds
    Animate {
        frames: Vec<String>,
        time_per_frame: f32,
    },
    /// Blend towards a tint over `duration` seconds. `color: None` keeps the
    /// current tint and only changes the blend factor.
    Colorize {
        color: Option<Vec4>,
        blend_factor: f32,
        duration: f32,
    },
    /// Run actions one after another
    Sequence(Vec<SpriteAction>),
    /// Restart the inner action every time it completes
    RepeatForever(Box<SpriteAction>),
}

impl SpriteAction {
    pub fn animate<S: Into<String>>(frames: impl IntoIterator<Item = S>, time_per_frame: f32) -> Self {
        Self::Animate {
            frames: frames.into_iter().map(Into::into).collect(),
            time_per_frame,
        }
    }

    pub fn colorize(color: Vec4, blend_factor: f32, duration: f32) -> Self {
        Self::Colorize {
            color: Some(color),
            blend_factor,
            duration,
        }
    }

    pub fn colorize_blend(blend_factor: f32, duration: f32) -> Self {
        Self::Colorize {
            color: None,
            blend_factor,
            duration,
        }
    }

    pub fn sequence(actions: Vec<SpriteAction>) -> Self {
        Self::Sequence(actions)
    }

    pub fn repeat_forever(self) -> Self {
        Self::RepeatForever(Box::new(self))
    }

    /// Total running time, `None` for actions that never finish
    pub fn duration(&self) -> Option<f32> {
        match self {
            Self::Animate {
                frames,
                time_per_frame,
            } => Some(frames.len() as f32 * time_per_frame),
            Self::Colorize { duration, .. } => Some(*duration),
            Self::Sequence(actions) => actions.iter().map(SpriteAction::duration).sum(),
            Self::RepeatForever(_) => None,
        }
    }

    pub fn is_infinite(&self) -> bool {
        self.duration().is_none()
    }

    /// Texture names this action can show, in order
    pub fn textures(&self) -> Vec<&str> {
        match self {
            Self::Animate { frames, .. } => frames.iter().map(String::as_str).collect(),
            Self::Colorize { .. } => Vec::new(),
            Self::Sequence(actions) => actions.iter().flat_map(SpriteAction::textures).collect(),
            Self::RepeatForever(inner) => inner.textures(),
        }
    }

    /// Write the effect of this action `elapsed` seconds after it started.
    ///
    /// `start` is the look when the action started; only the fields the action
    /// owns are written to `look`.
    pub fn apply(&self, elapsed: f32, start: &SpriteLook, look: &mut SpriteLook) {
        match self {
            Self::Animate {
                frames,
                time_per_frame,
            } => {
                if frames.is_empty() {
                    return;
                }
                let index = if *time_per_frame > 0.0 {
                    (elapsed / time_per_frame).floor() as usize
                } else {
                    frames.len() - 1
                };
                look.texture = Some(frames[index.min(frames.len() - 1)].clone());
            }
            Self::Colorize {
                color,
                blend_factor,
                duration,
            } => {
                let t = if *duration > 0.0 {
                    (elapsed / duration).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                if let Some(color) = color {
                    look.color = *color;
                }
                look.color_blend_factor =
                    start.color_blend_factor + (blend_factor - start.color_blend_factor) * t;
            }
            Self::Sequence(actions) => {
                let mut remaining = elapsed;
                let mut cursor = start.clone();
                for (i, action) in actions.iter().enumerate() {
                    let length = action.duration();
                    let is_last = i + 1 == actions.len();
                    match length {
                        Some(length) if remaining >= length && !is_last => {
                            // Completed step: its end state seeds the next one
                            let step_start = cursor.clone();
                            action.apply(length, &step_start, &mut cursor);
                            action.apply(length, &step_start, look);
                            remaining -= length;
                        }
                        _ => {
                            action.apply(remaining, &cursor, look);
                            return;
                        }
                    }
                }
            }
            Self::RepeatForever(inner) => match inner.duration() {
                Some(length) if length > 0.0 => {
                    let passes = (elapsed / length).floor();
                    let pass_start = if passes >= 1.0 {
                        let mut end = start.clone();
                        inner.apply(length, start, &mut end);
                        end
                    } else {
                        start.clone()
                    };
                    inner.apply(elapsed - passes * length, &pass_start, look);
                }
                _ => inner.apply(elapsed, start, look),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk() -> SpriteAction {
        SpriteAction::animate(["hero_up_walk1", "hero_up_walk2"], 0.2)
    }

    #[test]
    fn test_animate_duration() {
        assert_eq!(walk().duration(), Some(0.4));
        assert!(walk().repeat_forever().is_infinite());
    }

    #[test]
    fn test_animate_frame_selection() {
        let action = walk();
        let start = SpriteLook::default();
        let mut look = SpriteLook::default();

        action.apply(0.0, &start, &mut look);
        assert_eq!(look.texture.as_deref(), Some("hero_up_walk1"));

        action.apply(0.25, &start, &mut look);
        assert_eq!(look.texture.as_deref(), Some("hero_up_walk2"));

        // Past the end: hold the last frame
        action.apply(5.0, &start, &mut look);
        assert_eq!(look.texture.as_deref(), Some("hero_up_walk2"));
    }

    #[test]
    fn test_repeat_forever_loops_frames() {
        let action = walk().repeat_forever();
        let start = SpriteLook::default();
        let mut look = SpriteLook::default();

        action.apply(0.45, &start, &mut look);
        assert_eq!(look.texture.as_deref(), Some("hero_up_walk1"));

        action.apply(0.65, &start, &mut look);
        assert_eq!(look.texture.as_deref(), Some("hero_up_walk2"));
    }

    #[test]
    fn test_colorize_interpolates_from_start() {
        let green = Vec4::new(0.0, 1.0, 0.0, 1.0);
        let action = SpriteAction::colorize(green, 1.0, 0.2);
        let start = SpriteLook::default();
        let mut look = SpriteLook::default();

        action.apply(0.1, &start, &mut look);
        assert!((look.color_blend_factor - 0.5).abs() < 1e-5);
        assert_eq!(look.color, green);

        action.apply(1.0, &start, &mut look);
        assert_eq!(look.color_blend_factor, 1.0);
    }

    #[test]
    fn test_sequence_chains_steps() {
        let green = Vec4::new(0.0, 1.0, 0.0, 1.0);
        let blink = SpriteAction::sequence(vec![
            SpriteAction::colorize(green, 1.0, 0.2),
            SpriteAction::colorize_blend(0.0, 0.2),
        ]);
        assert_eq!(blink.duration(), Some(0.4));

        let start = SpriteLook::default();
        let mut look = SpriteLook::default();

        blink.apply(0.2, &start, &mut look);
        assert!((look.color_blend_factor - 1.0).abs() < 1e-5);

        blink.apply(0.3, &start, &mut look);
        assert!((look.color_blend_factor - 0.5).abs() < 1e-5);
        assert_eq!(look.color, green);

        blink.apply(0.4, &start, &mut look);
        assert!(look.color_blend_factor.abs() < 1e-5);
    }

    #[test]
    fn test_textures_lists_frames() {
        assert_eq!(
            walk().repeat_forever().textures(),
            vec!["hero_up_walk1", "hero_up_walk2"]
        );
    }
}
