//! Scene definitions for the console raytracer

use crate::config::{ObjectConfig, SceneConfig};
use crate::geometry::{Plane, Shape, Sphere, Triangle};
use crate::math::{Vec3, vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 8-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// A shape with its surface color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub shape: Shape,
    pub color: Rgb,
}

impl SceneObject {
    pub fn new(shape: impl Into<Shape>, color: Rgb) -> Self {
        Self { shape: shape.into(), color }
    }
}

/// Insertion-ordered set of objects, built once and then only read
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from (shape, color) pairs, keeping their order
    pub fn from_objects<I, S>(objects: I) -> Self
    where
        I: IntoIterator<Item = (S, Rgb)>,
        S: Into<Shape>,
    {
        Self {
            objects: objects
                .into_iter()
                .map(|(shape, color)| SceneObject::new(shape, color))
                .collect(),
        }
    }

    /// Build the scene described by the configuration: random spheres first,
    /// then the configured objects, then the ground plane.
    pub fn from_config(config: &SceneConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut scene = Self::new();
        scene.add_random_spheres(&mut rng, config.random_spheres);
        for object in &config.objects {
            scene.objects.push(object_from_config(object));
        }
        if config.ground {
            scene.objects.push(Self::ground_plane());
        }

        tracing::info!(
            seed,
            objects = scene.len(),
            random_spheres = config.random_spheres,
            ground = config.ground,
            "Scene built"
        );

        scene
    }

    pub fn add(&mut self, shape: impl Into<Shape>, color: Rgb) {
        self.objects.push(SceneObject::new(shape, color));
    }

    /// White plane through the origin facing up
    pub fn ground_plane() -> SceneObject {
        SceneObject::new(
            Plane::new(Vec3::zeros(), vec3(0.0, 1.0, 0.0)),
            Rgb::WHITE,
        )
    }

    /// Scatter spheres in front of the starting camera position
    pub fn add_random_spheres<R: Rng>(&mut self, rng: &mut R, count: usize) {
        for _ in 0..count {
            let center = vec3(
                rng.gen_range(-10..10) as f32,
                rng.gen_range(1..11) as f32,
                rng.gen_range(10..16) as f32,
            );
            let radius = rng.gen_range(1..3) as f32;
            let color = Rgb::new(
                rng.gen_range(55..255),
                rng.gen_range(55..255),
                rng.gen_range(55..255),
            );
            self.add(Sphere::new(center, radius), color);
        }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

fn object_from_config(object: &ObjectConfig) -> SceneObject {
    match *object {
        ObjectConfig::Sphere { center, radius, color } => {
            SceneObject::new(Sphere::new(center.into(), radius), color.into())
        }
        ObjectConfig::Plane { point, normal, color } => {
            SceneObject::new(Plane::new(point.into(), normal.into()), color.into())
        }
        ObjectConfig::Triangle { vertices: [v0, v1, v2], color } => SceneObject::new(
            Triangle::new(v0.into(), v1.into(), v2.into()),
            color.into(),
        ),
    }
}
