// Pointer input: mouse and touch as one world-space pointer

use glam::Vec2;
use log::trace;
use winit::event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent};

use crate::engine::renderer::Camera;

/// A pointer event in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed (mouse button down or touch began)
    Down(Vec2),
    /// Pointer moved while pressed
    Moved(Vec2),
    /// Pointer released or cancelled
    Up(Vec2),
}

impl PointerEvent {
    pub fn position(&self) -> Vec2 {
        match *self {
            PointerEvent::Down(position)
            | PointerEvent::Moved(position)
            | PointerEvent::Up(position) => position,
        }
    }
}

/// Collects pointer events from window events until drained
///
/// Only the left mouse button and the first active touch drive the pointer.
/// Hover movement is ignored.
#[derive(Debug, Default)]
pub struct PointerInput {
    /// Last known cursor position in screen pixels
    cursor: Option<Vec2>,
    pressed: bool,
    /// Touch currently driving the pointer
    active_touch: Option<u64>,
    events: Vec<PointerEvent>,
}

impl PointerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event from winit
    pub fn process_window_event(&mut self, event: &WindowEvent, camera: &Camera) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32), camera);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.mouse_button(*state == ElementState::Pressed, camera);
            }
            WindowEvent::CursorLeft { .. } => self.cancel(camera),
            WindowEvent::Touch(Touch {
                id,
                phase,
                location,
                ..
            }) => {
                self.touch(
                    *id,
                    *phase,
                    Vec2::new(location.x as f32, location.y as f32),
                    camera,
                );
            }
            _ => {}
        }
    }

    /// The cursor moved to `screen_pos` (pixels, y down)
    pub fn cursor_moved(&mut self, screen_pos: Vec2, camera: &Camera) {
        self.cursor = Some(screen_pos);
        if self.pressed && self.active_touch.is_none() {
            self.push(PointerEvent::Moved(camera.screen_to_world(screen_pos)));
        }
    }

    /// The left mouse button changed state
    pub fn mouse_button(&mut self, pressed: bool, camera: &Camera) {
        if self.active_touch.is_some() || pressed == self.pressed {
            return;
        }
        let Some(cursor) = self.cursor else {
            return;
        };

        self.pressed = pressed;
        let world = camera.screen_to_world(cursor);
        self.push(if pressed {
            PointerEvent::Down(world)
        } else {
            PointerEvent::Up(world)
        });
    }

    /// A touch changed phase
    pub fn touch(&mut self, id: u64, phase: TouchPhase, screen_pos: Vec2, camera: &Camera) {
        let world = camera.screen_to_world(screen_pos);

        match phase {
            TouchPhase::Started => {
                if self.active_touch.is_none() && !self.pressed {
                    self.active_touch = Some(id);
                    self.pressed = true;
                    self.push(PointerEvent::Down(world));
                }
            }
            TouchPhase::Moved => {
                if self.active_touch == Some(id) {
                    self.push(PointerEvent::Moved(world));
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.active_touch == Some(id) {
                    self.active_touch = None;
                    self.pressed = false;
                    self.push(PointerEvent::Up(world));
                }
            }
        }
    }

    /// Release the mouse pointer when the cursor leaves the window
    fn cancel(&mut self, camera: &Camera) {
        if self.pressed && self.active_touch.is_none() {
            self.mouse_button(false, camera);
        }
        self.cursor = None;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn push(&mut self, event: PointerEvent) {
        trace!("Pointer {:?}", event);
        self.events.push(event);
    }

    /// Take every event collected since the last drain, oldest first
    pub fn drain(&mut self) -> Vec<PointerEvent> {
        std::mem::take(&mut self.events)
    }
}
