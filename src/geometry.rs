//! Scene primitives and their ray intersection routines

use crate::math::{Vec3, dot};

/// Smallest plane distance accepted as a hit. Rejects self-intersection at
/// the ray origin and hits behind it.
pub const PLANE_EPSILON: f32 = 1e-5;

/// A ray in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Where a ray met a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub distance: f32,
    pub point: Vec3,
    pub normal: Vec3,
}

/// Anything a ray can be tested against
pub trait Hittable {
    /// `None` means no valid intersection along the ray's positive direction.
    fn ray_intersect(&self, ray: &Ray) -> Option<Hit>;

    fn intersects(&self, ray: &Ray) -> bool {
        self.ray_intersect(ray).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Hittable for Sphere {
    /// Closest-approach test. Always reports the near intersection, and
    /// rejects the sphere whenever its center projects behind the origin,
    /// even if the origin is inside it.
    fn ray_intersect(&self, ray: &Ray) -> Option<Hit> {
        let s = self.center - ray.origin;
        let t = dot(&s, &ray.direction);

        if t < 0.0 {
            return None;
        }

        let projected = ray.at(t);
        let d = projected - self.center;
        let d_squared = dot(&d, &d);
        let r_squared = self.radius * self.radius;

        if d_squared <= r_squared {
            let distance = t - (r_squared - d_squared).sqrt();
            let point = ray.at(distance);
            let normal = (point - self.center) / self.radius;
            Some(Hit { distance, point, normal })
        } else {
            None
        }
    }
}

/// Infinite plane. The normal is used as given and need not be unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }
}

impl Hittable for Plane {
    fn ray_intersect(&self, ray: &Ray) -> Option<Hit> {
        let s = self.point - ray.origin;
        let t = dot(&s, &self.normal) / dot(&ray.direction, &self.normal);

        // Parallel rays divide by zero: NaN and -Inf fail the epsilon test,
        // +Inf fails the finiteness test.
        if t > PLANE_EPSILON && t.is_finite() {
            Some(Hit {
                distance: t,
                point: ray.at(t),
                normal: self.normal,
            })
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { vertices: [v0, v1, v2] }
    }

    /// Plane through the vertices, normal from the (0->1, 0->2) winding
    pub fn supporting_plane(&self) -> Plane {
        let [v0, v1, v2] = self.vertices;
        Plane::new(v0, (v1 - v0).cross(&(v2 - v0)))
    }
}

impl Hittable for Triangle {
    fn ray_intersect(&self, ray: &Ray) -> Option<Hit> {
        let hit = self.supporting_plane().ray_intersect(ray)?;

        for i in 0..3 {
            let start = self.vertices[i];
            let edge = self.vertices[(i + 1) % 3] - start;
            let s = hit.point - start;

            let t = dot(&s, &edge);
            if t > dot(&edge, &edge) || t < 0.0 {
                return None;
            }

            // Projection alone accepts points past the opposite edges
            if dot(&edge.cross(&s), &hit.normal) < 0.0 {
                return None;
            }
        }

        Some(hit)
    }
}

/// The closed set of scene primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
}

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sphere(_) => "sphere",
            Shape::Plane(_) => "plane",
            Shape::Triangle(_) => "triangle",
        }
    }
}

impl Hittable for Shape {
    fn ray_intersect(&self, ray: &Ray) -> Option<Hit> {
        match self {
            Shape::Sphere(sphere) => sphere.ray_intersect(ray),
            Shape::Plane(plane) => plane.ray_intersect(ray),
            Shape::Triangle(triangle) => triangle.ray_intersect(ray),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}
