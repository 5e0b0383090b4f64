//! View transform: accumulated yaw/pitch to a forward/up/right basis

use crate::config::CameraConfig;
use crate::geometry::Ray;
use crate::math::{Mat3, Vec3, apply, normalized, pitch_matrix, vec3, yaw_matrix};
use crate::renderer::Viewport;

pub const FORWARD_AXIS: Vec3 = Vec3::new(0.0, 0.0, 1.0);
/// Screen rows grow downward, so the "up" axis points down in world space.
pub const UP_AXIS: Vec3 = Vec3::new(0.0, -1.0, 0.0);
pub const RIGHT_AXIS: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// Default field of view scale applied to the screen-space offsets
pub const DEFAULT_FOV: f32 = 2.0;

/// Camera orientation for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,
}

/// Relative movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Back,
    Left,
    Right,
    Ascend,
    Descend,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Accumulated vertical look angle; positive looks down
    pub pitch: f32,
    /// Accumulated horizontal look angle; positive turns right
    pub yaw: f32,
    pub fov: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: vec3(0.0, 1.0, 0.0),
            pitch: 0.0,
            yaw: 0.0,
            fov: DEFAULT_FOV,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3, pitch: f32, yaw: f32, fov: f32) -> Self {
        Self { position, pitch, yaw, fov }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(config.position.into(), config.pitch, config.yaw, config.fov)
    }

    fn yaw_matrix(&self) -> Mat3 {
        yaw_matrix(self.yaw)
    }

    /// Orientation for the current angles: pitch first, then yaw
    pub fn basis(&self) -> Basis {
        let pitch = pitch_matrix(self.pitch);
        let yaw = self.yaw_matrix();
        let orient = |axis: &Vec3| apply(&apply(axis, &pitch), &yaw);

        Basis {
            forward: orient(&FORWARD_AXIS),
            up: orient(&UP_AXIS),
            right: orient(&RIGHT_AXIS),
        }
    }

    /// Primary ray through the centered pixel coordinate (x, y)
    pub fn primary_ray(&self, basis: &Basis, x: i32, y: i32, viewport: Viewport) -> Ray {
        let sx = x as f32 / viewport.width as f32;
        let sy = y as f32 / viewport.height as f32;
        let direction = basis.right * sx * self.fov + basis.up * sy * self.fov + basis.forward;
        Ray::new(self.position, normalized(&direction))
    }

    /// Move relative to the horizontal heading. Pitch is ignored so looking
    /// up or down never tilts movement.
    pub fn translate(&mut self, movement: Movement, elapsed: f32, speed: f32) {
        let yaw = self.yaw_matrix();
        let step = elapsed * speed;

        let delta = match movement {
            Movement::Forward => FORWARD_AXIS,
            Movement::Back => -FORWARD_AXIS,
            Movement::Left => -RIGHT_AXIS,
            Movement::Right => RIGHT_AXIS,
            Movement::Ascend => -UP_AXIS,
            Movement::Descend => UP_AXIS,
        };

        self.position += apply(&delta, &yaw) * step;
    }

    /// Accumulate look angles. Not clamped.
    pub fn look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.pitch += dy * sensitivity;
        self.yaw += dx * sensitivity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: &Vec3, b: &Vec3) -> bool {
        (a - b).norm() < 1e-5
    }

    #[test]
    fn test_default_basis_is_axes() {
        let basis = Camera::default().basis();
        assert_eq!(basis.forward, FORWARD_AXIS);
        assert_eq!(basis.up, UP_AXIS);
        assert_eq!(basis.right, RIGHT_AXIS);
    }

    #[test]
    fn test_yaw_turns_basis() {
        let camera = Camera { yaw: FRAC_PI_2, ..Camera::default() };
        let basis = camera.basis();
        assert!(approx(&basis.forward, &vec3(1.0, 0.0, 0.0)));
        assert!(approx(&basis.right, &vec3(0.0, 0.0, -1.0)));
        assert!(approx(&basis.up, &UP_AXIS));
    }

    #[test]
    fn test_pitch_then_yaw() {
        let camera = Camera { pitch: FRAC_PI_2, yaw: FRAC_PI_2, ..Camera::default() };
        let basis = camera.basis();
        // Looking straight down; yaw does not move a vertical vector
        assert!(approx(&basis.forward, &vec3(0.0, -1.0, 0.0)));
        // Right still follows yaw alone
        assert!(approx(&basis.right, &vec3(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_center_ray_is_forward() {
        let camera = Camera::new(vec3(1.0, 2.0, 3.0), 0.0, 0.0, DEFAULT_FOV);
        let ray = camera.primary_ray(&camera.basis(), 0, 0, Viewport::new(32, 32));
        assert_eq!(ray.origin, vec3(1.0, 2.0, 3.0));
        assert!(approx(&ray.direction, &FORWARD_AXIS));
    }

    #[test]
    fn test_top_left_ray() {
        let camera = Camera::default();
        let viewport = Viewport::new(32, 32);
        let ray = camera.primary_ray(&camera.basis(), -16, -16, viewport);
        // right * -0.5 * 2 + up * -0.5 * 2 + forward = (-1, 1, 1)
        let expected = normalized(&vec3(-1.0, 1.0, 1.0));
        assert!(approx(&ray.direction, &expected));
        assert!((ray.direction.norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_translate_forward_scales_with_time_and_speed() {
        let mut camera = Camera::default();
        camera.translate(Movement::Forward, 0.5, 2.0);
        assert!(approx(&camera.position, &vec3(0.0, 1.0, 1.0)));
        camera.translate(Movement::Back, 0.25, 2.0);
        assert!(approx(&camera.position, &vec3(0.0, 1.0, 0.5)));
    }

    #[test]
    fn test_ascend_moves_up_in_world() {
        let mut camera = Camera::default();
        camera.translate(Movement::Ascend, 1.0, 1.0);
        assert!(approx(&camera.position, &vec3(0.0, 2.0, 0.0)));
        camera.translate(Movement::Descend, 0.5, 1.0);
        assert!(approx(&camera.position, &vec3(0.0, 1.5, 0.0)));
    }

    #[test]
    fn test_strafe_follows_yaw() {
        let mut camera = Camera { yaw: FRAC_PI_2, ..Camera::default() };
        camera.translate(Movement::Right, 1.0, 1.0);
        assert!(approx(&camera.position, &vec3(0.0, 1.0, -1.0)));
        camera.translate(Movement::Left, 2.0, 1.0);
        assert!(approx(&camera.position, &vec3(0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_movement_ignores_pitch() {
        let mut camera = Camera { pitch: 1.0, ..Camera::default() };
        camera.translate(Movement::Forward, 1.0, 1.0);
        assert!(approx(&camera.position, &vec3(0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_look_accumulates() {
        let mut camera = Camera::default();
        camera.look(10.0, -4.0, 0.05);
        camera.look(2.0, 0.0, 0.05);
        assert!((camera.yaw - 0.6).abs() < 1e-6);
        assert!((camera.pitch + 0.2).abs() < 1e-6);
    }
}
