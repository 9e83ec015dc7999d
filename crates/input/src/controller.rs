use crate::{InputState, Key};
use glam::Vec3;
use terrainview_common::CameraConfig;
use terrainview_render::OrbitCamera;

/// Camera motion requested for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraIntent {
    /// Camera-space translation: `x` strafe right, `y` up, `z` forward.
    pub translation: Vec3,
    /// Relative yaw in radians, positive turns right.
    pub yaw: f32,
    /// Relative pitch in radians, positive looks up.
    pub pitch: f32,
}

impl CameraIntent {
    pub fn is_idle(&self) -> bool {
        self.translation == Vec3::ZERO && self.yaw == 0.0 && self.pitch == 0.0
    }
}

/// Free-fly control scheme: WASD-style movement, arrow-key rotation,
/// mouse-look while the look button is held and scroll to dolly.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraController {
    pub move_speed: f32,
    pub rotate_speed: f32,
    pub mouse_sensitivity: f32,
    pub scroll_speed: f32,
    pub boost: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl CameraController {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            rotate_speed: config.rotate_speed,
            mouse_sensitivity: config.mouse_sensitivity,
            scroll_speed: config.scroll_speed,
            boost: config.boost,
        }
    }

    /// Turn the input gathered this frame into camera motion.
    pub fn intent(&self, input: &InputState, dt: f32) -> CameraIntent {
        let axis = |pos: Key, neg: Key| -> f32 {
            match (input.is_held(pos), input.is_held(neg)) {
                (true, false) => 1.0,
                (false, true) => -1.0,
                _ => 0.0,
            }
        };

        let speed = if input.is_held(Key::Boost) {
            self.move_speed * self.boost
        } else {
            self.move_speed
        };

        let mut translation = Vec3::new(
            axis(Key::StrafeRight, Key::StrafeLeft),
            axis(Key::Up, Key::Down),
            axis(Key::Forward, Key::Back),
        ) * speed
            * dt;
        translation.z += input.scroll_delta() * self.scroll_speed;

        let mut yaw = axis(Key::TurnRight, Key::TurnLeft) * self.rotate_speed * dt;
        let mut pitch = axis(Key::LookUp, Key::LookDown) * self.rotate_speed * dt;
        if input.is_held(Key::MouseLook) {
            let delta = input.mouse_delta();
            yaw += delta.x * self.mouse_sensitivity;
            pitch -= delta.y * self.mouse_sensitivity;
        }

        CameraIntent {
            translation,
            yaw,
            pitch,
        }
    }

    /// Translate, turn, then tilt. Returns `false` if the pitch was rejected.
    pub fn apply(intent: CameraIntent, camera: &mut OrbitCamera) -> bool {
        camera.translate(intent.translation);
        camera.apply_yaw_delta(intent.yaw);
        let pitched = camera.apply_pitch_delta(intent.pitch);
        if !pitched {
            tracing::trace!("pitch delta {:.3} rejected at {:.3}", intent.pitch, camera.pitch());
        }
        pitched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CameraController {
        CameraController {
            move_speed: 10.0,
            rotate_speed: 1.0,
            mouse_sensitivity: 0.01,
            scroll_speed: 0.5,
            boost: 3.0,
        }
    }

    #[test]
    fn idle_input_produces_no_motion() {
        let intent = controller().intent(&InputState::new(), 0.016);
        assert!(intent.is_idle());
    }

    #[test]
    fn forward_for_one_second() {
        let mut input = InputState::new();
        input.set_key(Key::Forward, true);
        let intent = controller().intent(&input, 1.0);
        assert_eq!(intent.translation, Vec3::new(0.0, 0.0, 10.0));

        let mut camera = OrbitCamera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 4, 3);
        CameraController::apply(intent, &mut camera);
        assert!(camera.position().abs_diff_eq(Vec3::ZERO, 1e-5));
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut input = InputState::new();
        input.set_key(Key::StrafeLeft, true);
        input.set_key(Key::StrafeRight, true);
        assert_eq!(controller().intent(&input, 1.0).translation, Vec3::ZERO);
    }

    #[test]
    fn boost_multiplies_speed() {
        let mut input = InputState::new();
        input.set_key(Key::Up, true);
        input.set_key(Key::Boost, true);
        let intent = controller().intent(&input, 0.5);
        assert_eq!(intent.translation, Vec3::new(0.0, 15.0, 0.0));
    }

    #[test]
    fn mouse_ignored_without_mouse_look() {
        let mut input = InputState::new();
        input.add_mouse_delta(100.0, 50.0);
        let intent = controller().intent(&input, 0.016);
        assert_eq!(intent.yaw, 0.0);
        assert_eq!(intent.pitch, 0.0);

        input.set_key(Key::MouseLook, true);
        let intent = controller().intent(&input, 0.016);
        assert!((intent.yaw - 1.0).abs() < 1e-6);
        assert!((intent.pitch + 0.5).abs() < 1e-6);
    }

    #[test]
    fn arrows_rotate_at_fixed_rate() {
        let mut input = InputState::new();
        input.set_key(Key::TurnLeft, true);
        input.set_key(Key::LookUp, true);
        let intent = controller().intent(&input, 0.25);
        assert_eq!(intent.yaw, -0.25);
        assert_eq!(intent.pitch, 0.25);
    }

    #[test]
    fn scroll_dollies_forward() {
        let mut input = InputState::new();
        input.add_scroll(2.0);
        let intent = controller().intent(&input, 0.016);
        assert_eq!(intent.translation, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn apply_respects_pitch_limit() {
        let mut camera =
            OrbitCamera::new(Vec3::ZERO, Vec3::NEG_Z, 4, 3).with_pitch_limit(Some(1.4));
        camera.move_to(Vec3::ZERO, 0.0, 1.39);
        let intent = CameraIntent {
            pitch: 0.1,
            ..CameraIntent::default()
        };
        assert!(!CameraController::apply(intent, &mut camera));
        assert!((camera.pitch() - 1.39).abs() < 1e-5);
    }
}
