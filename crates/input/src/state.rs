use glam::Vec2;
use std::collections::HashSet;

/// Logical keys the viewer reacts to.
///
/// The windowing layer maps physical keys onto these; camera logic never sees
/// raw window events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Up,
    Down,
    TurnLeft,
    TurnRight,
    LookUp,
    LookDown,
    /// Speed multiplier modifier.
    Boost,
    /// Mouse motion rotates the camera while held.
    MouseLook,
}

/// Input gathered between two frames.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    mouse_delta: Vec2,
    scroll_delta: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Accumulate mouse motion in pixels.
    pub fn add_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.mouse_delta += Vec2::new(dx, dy);
    }

    /// Accumulate scroll in lines; positive scrolls away from the user.
    pub fn add_scroll(&mut self, lines: f32) {
        self.scroll_delta += lines;
    }

    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Clear per-frame deltas. Held keys persist.
    pub fn end_frame(&mut self) {
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
        self.end_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_press_and_release() {
        let mut input = InputState::new();
        input.set_key(Key::Forward, true);
        assert!(input.is_held(Key::Forward));
        input.set_key(Key::Forward, false);
        assert!(!input.is_held(Key::Forward));
    }

    #[test]
    fn deltas_accumulate_until_end_frame() {
        let mut input = InputState::new();
        input.set_key(Key::Boost, true);
        input.add_mouse_delta(3.0, -1.0);
        input.add_mouse_delta(2.0, 4.0);
        input.add_scroll(1.0);
        input.add_scroll(0.5);
        assert_eq!(input.mouse_delta(), Vec2::new(5.0, 3.0));
        assert_eq!(input.scroll_delta(), 1.5);

        input.end_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        assert_eq!(input.scroll_delta(), 0.0);
        assert!(input.is_held(Key::Boost));

        input.clear();
        assert!(!input.is_held(Key::Boost));
    }
}
