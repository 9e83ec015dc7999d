use glam::{Mat4, Quat, Vec3};
use std::f32::consts::{FRAC_PI_4, PI, TAU};

/// Vertical field of view in radians.
pub const FIELD_OF_VIEW: f32 = FRAC_PI_4;
pub const NEAR_PLANE: f32 = 0.01;
pub const FAR_PLANE: f32 = 100.0;

/// Tilt applied to a direction parallel to `up` so look-at stays defined.
const POLE_NUDGE: f32 = 1e-3;

/// Free-fly camera driven by relative yaw/pitch rotations.
///
/// Orientation is stored as a unit `direction` vector rotated by quaternions;
/// yaw and pitch are derived from it on demand. `view` and `projection` are
/// cached and rebuilt whenever the pose or viewport changes.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    position: Vec3,
    direction: Vec3,
    up: Vec3,
    aspect: f32,
    pitch_limit: Option<f32>,
    view: Mat4,
    projection: Mat4,
}

impl OrbitCamera {
    /// Camera at `position` looking at `target` for a viewport of the given size.
    pub fn new(position: Vec3, target: Vec3, viewport_width: u32, viewport_height: u32) -> Self {
        let direction = off_pole(
            (target - position).try_normalize().unwrap_or(Vec3::NEG_Z),
            Vec3::Y,
        );
        let aspect = aspect_ratio(viewport_width, viewport_height);
        let mut camera = Self {
            position,
            direction,
            up: Vec3::Y,
            aspect,
            pitch_limit: None,
            view: Mat4::IDENTITY,
            projection: Mat4::perspective_rh(FIELD_OF_VIEW, aspect, NEAR_PLANE, FAR_PLANE),
        };
        camera.update_view();
        camera
    }

    /// Reject pitch deltas that would cross `±limit` radians.
    pub fn with_pitch_limit(mut self, limit: Option<f32>) -> Self {
        self.pitch_limit = limit;
        self
    }

    /// Place the camera at an absolute pose.
    pub fn move_to(&mut self, position: Vec3, yaw: f32, pitch: f32) {
        self.position = position;
        let direction = Vec3::new(
            pitch.cos() * yaw.sin(),
            pitch.sin(),
            -pitch.cos() * yaw.cos(),
        )
        .normalize();
        self.direction = off_pole(direction, self.up);
        self.update_view();
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn pitch_limit(&self) -> Option<f32> {
        self.pitch_limit
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Heading in radians within `(-pi, pi]`; 0 looks down -Z and grows
    /// turning right.
    pub fn yaw(&self) -> f32 {
        wrap_angle(PI - self.direction.x.atan2(self.direction.z))
    }

    /// Elevation angle of the view direction in radians.
    pub fn pitch(&self) -> f32 {
        self.direction.y.clamp(-1.0, 1.0).asin()
    }

    /// Horizontal strafe axis.
    pub fn right(&self) -> Vec3 {
        self.direction.cross(self.up).normalize_or_zero()
    }

    /// Move in camera space: `x` strafes right, `y` moves up, `z` moves forward.
    pub fn translate(&mut self, local: Vec3) {
        if local == Vec3::ZERO {
            return;
        }
        self.position += self.right() * local.x + self.up * local.y + self.direction * local.z;
        self.update_view();
    }

    /// Turn by `radians` relative to the current heading. Positive turns right.
    pub fn apply_yaw_delta(&mut self, radians: f32) {
        if radians == 0.0 {
            return;
        }
        let rotation = Quat::from_axis_angle(self.up, -radians);
        self.rotate(rotation);
    }

    /// Tilt by `radians` relative to the current pitch. Positive looks up.
    ///
    /// Returns `false` when the delta was discarded, either because it would
    /// cross the pitch limit or because the direction is parallel to `up`.
    pub fn apply_pitch_delta(&mut self, radians: f32) -> bool {
        if radians == 0.0 {
            return true;
        }
        if let Some(limit) = self.pitch_limit {
            let proposed = self.pitch() + radians;
            if (radians > 0.0 && proposed > limit) || (radians < 0.0 && proposed < -limit) {
                return false;
            }
        }
        let Some(axis) = self.direction.cross(self.up).try_normalize() else {
            return false;
        };
        self.rotate(Quat::from_axis_angle(axis, radians));
        true
    }

    /// Recompute aspect and projection after a viewport resize.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
        self.projection = Mat4::perspective_rh(FIELD_OF_VIEW, self.aspect, NEAR_PLANE, FAR_PLANE);
    }

    fn rotate(&mut self, rotation: Quat) {
        let rotated = rotation * self.direction;
        // Keep the previous direction if repeated transforms ever degenerate.
        if let Some(direction) = rotated.try_normalize() {
            self.direction = off_pole(direction, self.up);
        }
        self.update_view();
    }

    fn update_view(&mut self) {
        self.view = Mat4::look_at_rh(self.position, self.position + self.direction, self.up);
    }
}

/// Tip a direction that is parallel to `up` slightly toward -Z.
fn off_pole(direction: Vec3, up: Vec3) -> Vec3 {
    if direction.cross(up).length_squared() > POLE_NUDGE * POLE_NUDGE {
        return direction;
    }
    (direction + Vec3::NEG_Z * POLE_NUDGE * 2.0).normalize()
}

fn wrap_angle(radians: f32) -> f32 {
    let wrapped = (radians + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { PI } else { wrapped }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 800, 600)
    }

    #[test]
    fn initial_direction_points_at_target() {
        let cam = OrbitCamera::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, 800, 600);
        assert!(cam.direction().abs_diff_eq(Vec3::NEG_Y, 1e-2));
        assert!((cam.aspect() - 800.0 / 600.0).abs() < EPS);
    }

    #[test]
    fn view_matches_look_at() {
        let cam = camera();
        assert!(cam.direction().abs_diff_eq(Vec3::NEG_Z, EPS));
        let expected = Mat4::look_at_rh(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 9.0),
            Vec3::Y,
        );
        assert!(cam.view().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn projection_uses_fixed_frustum() {
        let cam = camera();
        let expected = Mat4::perspective_rh(FIELD_OF_VIEW, 800.0 / 600.0, 0.01, 100.0);
        assert!(cam.projection().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn yaw_and_pitch_accessors() {
        let cam = camera();
        assert!(cam.yaw().abs() < EPS);
        assert!(cam.pitch().abs() < EPS);

        let mut cam = camera();
        cam.move_to(Vec3::ZERO, 0.7, -0.3);
        assert!((cam.yaw() - 0.7).abs() < EPS);
        assert!((cam.pitch() + 0.3).abs() < EPS);
    }

    #[test]
    fn yaw_delta_is_relative() {
        let mut cam = camera();
        cam.apply_yaw_delta(0.25);
        cam.apply_yaw_delta(0.25);
        assert!((cam.yaw() - 0.5).abs() < EPS);
        // Positive yaw turns toward +X.
        assert!(cam.direction().x > 0.0);
    }

    #[test]
    fn zero_yaw_is_noop() {
        let mut cam = camera();
        cam.move_to(Vec3::ONE, 1.1, 0.4);
        let before = cam.direction();
        cam.apply_yaw_delta(0.0);
        assert_eq!(cam.direction(), before);
    }

    #[test]
    fn full_turn_returns_to_start() {
        let mut cam = camera();
        cam.move_to(Vec3::ZERO, 0.3, 0.2);
        let start = cam.direction();
        for _ in 0..8 {
            cam.apply_yaw_delta(TAU / 8.0);
        }
        assert!(cam.direction().abs_diff_eq(start, 1e-4));
    }

    #[test]
    fn direction_stays_normalized() {
        let mut cam = camera();
        for i in 0..1000 {
            let t = i as f32;
            cam.apply_yaw_delta((t * 0.37).sin() * 0.2);
            cam.apply_pitch_delta((t * 0.11).cos() * 0.05);
            assert!((cam.direction().length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn pitch_delta_is_relative() {
        let mut cam = camera();
        assert!(cam.apply_pitch_delta(0.2));
        assert!(cam.apply_pitch_delta(0.2));
        assert!((cam.pitch() - 0.4).abs() < EPS);
        assert!(cam.yaw().abs() < EPS);
    }

    #[test]
    fn pitch_clamp_rejects_crossing_limit() {
        let mut cam = camera().with_pitch_limit(Some(1.4));
        cam.move_to(Vec3::ZERO, 0.0, 1.39);
        let before = cam.direction();

        assert!(!cam.apply_pitch_delta(0.1));
        assert_eq!(cam.direction(), before);
        assert!((cam.pitch() - 1.39).abs() < EPS);

        assert!(cam.apply_pitch_delta(-0.1));
        assert!((cam.pitch() - 1.29).abs() < 1e-4);
    }

    #[test]
    fn pitch_clamp_symmetric_below() {
        let mut cam = camera().with_pitch_limit(Some(1.4));
        cam.move_to(Vec3::ZERO, 0.0, -1.39);
        assert!(!cam.apply_pitch_delta(-0.1));
        assert!(cam.apply_pitch_delta(0.1));
    }

    #[test]
    fn unclamped_pitch_allows_large_delta() {
        let mut cam = camera();
        cam.move_to(Vec3::ZERO, 0.0, 1.39);
        assert!(cam.apply_pitch_delta(0.1));
        assert!((cam.pitch() - 1.49).abs() < 1e-4);
    }

    #[test]
    fn looking_straight_down_stays_controllable() {
        let mut cam = OrbitCamera::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, 800, 600);
        assert!(!cam.view().is_nan());
        assert!(cam.right().length() > 0.5);

        let before = cam.direction();
        cam.apply_yaw_delta(0.5);
        assert!(!cam.direction().abs_diff_eq(before, 1e-6));
        assert!(!cam.view().is_nan());

        let before = cam.direction();
        assert!(cam.apply_pitch_delta(0.1));
        assert!(!cam.direction().abs_diff_eq(before, 1e-3));
        assert!(!cam.view().is_nan());
    }

    #[test]
    fn move_to_pole_keeps_view_finite() {
        let mut cam = camera();
        cam.move_to(Vec3::ZERO, 0.0, FRAC_PI_2);
        assert!(!cam.view().is_nan());
        assert!(cam.pitch() < FRAC_PI_2);
        assert!(cam.apply_pitch_delta(-0.2));
        assert!((cam.direction().length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn pitching_past_the_pole_never_lands_on_it() {
        let mut cam = camera();
        cam.move_to(Vec3::ZERO, 0.0, 1.5);
        let delta = FRAC_PI_2 - cam.pitch();
        assert!(cam.apply_pitch_delta(delta));
        assert!(cam.direction().cross(Vec3::Y).length() > 1e-4);
        assert!(!cam.view().is_nan());
    }

    #[test]
    fn translate_moves_in_camera_space() {
        let mut cam = camera();
        cam.translate(Vec3::new(0.0, 0.0, 2.0));
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, 8.0), EPS));
        cam.translate(Vec3::new(1.0, 3.0, 0.0));
        assert!(cam.position().abs_diff_eq(Vec3::new(1.0, 3.0, 8.0), EPS));

        let expected = Mat4::look_at_rh(cam.position(), cam.position() + Vec3::NEG_Z, Vec3::Y);
        assert!(cam.view().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn viewport_resize_updates_projection() {
        let mut cam = camera();
        cam.set_viewport(1920, 1080);
        let expected = Mat4::perspective_rh(FIELD_OF_VIEW, 1920.0 / 1080.0, NEAR_PLANE, FAR_PLANE);
        assert!(cam.projection().abs_diff_eq(expected, EPS));
        // Zero-height windows (minimized) must not produce NaN.
        cam.set_viewport(800, 0);
        assert!(!cam.projection().is_nan());
    }
}
