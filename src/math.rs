//! Vector and matrix primitives used by the tracer
//!
//! Points and directions share one type. All operations follow IEEE-754:
//! dividing by zero or normalizing the zero vector yields Inf/NaN instead of
//! panicking, and those values flow through the tracer unchanged.

use nalgebra::{Matrix3, Vector3};

/// A point or direction in world space
pub type Vec3 = Vector3<f32>;

/// Row-major 3x3 rotation matrix
pub type Mat3 = Matrix3<f32>;

pub fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

pub fn dot(a: &Vec3, b: &Vec3) -> f32 {
    a.dot(b)
}

pub fn length(v: &Vec3) -> f32 {
    dot(v, v).sqrt()
}

/// Unit vector in the direction of `v`. The zero vector gives NaN components.
pub fn normalized(v: &Vec3) -> Vec3 {
    v / length(v)
}

/// Vector-matrix product: component i is row i of `m` dotted with `v`.
pub fn apply(v: &Vec3, m: &Mat3) -> Vec3 {
    m * v
}

/// Rotation in the X-Z plane (turning left/right)
pub fn yaw_matrix(angle: f32) -> Mat3 {
    let (sin, cos) = angle.sin_cos();
    Mat3::new(
        cos, 0.0, sin,
        0.0, 1.0, 0.0,
        -sin, 0.0, cos,
    )
}

/// Rotation in the Y-Z plane (looking up/down)
pub fn pitch_matrix(angle: f32) -> Mat3 {
    let (sin, cos) = angle.sin_cos();
    Mat3::new(
        1.0, 0.0, 0.0,
        0.0, cos, -sin,
        0.0, sin, cos,
    )
}
