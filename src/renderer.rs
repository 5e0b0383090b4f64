//! CPU ray tracer
//!
//! One primary ray per pixel, a linear nearest-hit scan over the scene, and a
//! shadow ray toward a fixed overhead light. The result per pixel is the hit
//! color plus whether the point is lit, shadowed, or background.

use crate::camera::{Basis, Camera};
use crate::geometry::{Hit, Hittable, Ray};
use crate::math::{Vec3, dot, normalized};
use crate::scene::{Rgb, Scene, SceneObject};

/// Direction toward the light: straight up
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Output size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

/// Shading class handed to the pixel encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelClass {
    #[default]
    Background,
    Lit,
    Shadowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub color: Rgb,
    pub class: PixelClass,
}

impl Pixel {
    pub const BACKGROUND: Pixel = Pixel {
        color: Rgb::BLACK,
        class: PixelClass::Background,
    };
}

/// Everything a frame needs, passed explicitly to the renderer
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub scene: &'a Scene,
    pub camera: &'a Camera,
    pub viewport: Viewport,
}

/// Nearest object along the ray, scanning in insertion order.
///
/// The first reported hit is always taken, then replaced by any strictly
/// nearer one (or by anything if the current distance is negative). Equal
/// distances keep the earlier object. A final distance that is not `>= 0`
/// counts as no hit.
pub fn nearest_hit<'a>(scene: &'a Scene, ray: &Ray) -> Option<(&'a SceneObject, Hit)> {
    let mut closest: Option<(&SceneObject, Hit)> = None;

    for object in scene.objects() {
        if let Some(hit) = object.shape.ray_intersect(ray) {
            let replace = match &closest {
                None => true,
                Some((_, best)) => hit.distance < best.distance || best.distance < 0.0,
            };
            if replace {
                closest = Some((object, hit));
            }
        }
    }

    closest.filter(|(_, hit)| hit.distance >= 0.0)
}

/// True if anything at all blocks the ray
pub fn occluded(scene: &Scene, ray: &Ray) -> bool {
    scene.objects().iter().any(|object| object.shape.intersects(ray))
}

/// Unit surface normal on the side the ray arrived from. Plane and triangle
/// normals are stored as given and may be scaled or face away.
fn facing_normal(hit: &Hit, ray: &Ray) -> Vec3 {
    let n = normalized(&hit.normal);
    if dot(&n, &ray.direction) > 0.0 {
        -n
    } else {
        n
    }
}

/// Shade a single primary ray
pub fn trace(scene: &Scene, ray: &Ray, shadow_bias: f32) -> Pixel {
    let Some((object, hit)) = nearest_hit(scene, ray) else {
        return Pixel::BACKGROUND;
    };

    let origin = if shadow_bias == 0.0 {
        hit.point
    } else {
        hit.point + facing_normal(&hit, ray) * shadow_bias
    };
    let shadow_ray = Ray::new(origin, LIGHT_DIRECTION);

    let class = if occluded(scene, &shadow_ray) {
        PixelClass::Shadowed
    } else {
        PixelClass::Lit
    };

    Pixel {
        color: object.color,
        class,
    }
}

/// The frame tracer
pub struct Renderer {
    viewport: Viewport,
    framebuffer: Vec<Pixel>,
    shadow_bias: f32,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        let viewport = Viewport::new(width, height);
        Self {
            viewport,
            framebuffer: vec![Pixel::BACKGROUND; viewport.pixel_count()],
            shadow_bias: 0.0,
        }
    }

    pub fn with_shadow_bias(mut self, shadow_bias: f32) -> Self {
        self.shadow_bias = shadow_bias;
        self
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.viewport = Viewport::new(width, height);
        self.framebuffer = vec![Pixel::BACKGROUND; self.viewport.pixel_count()];
        tracing::debug!(width, height, "Renderer resized");
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn framebuffer(&self) -> &[Pixel] {
        &self.framebuffer
    }

    /// Pixel at (column, row) of the last frame
    pub fn pixel(&self, column: usize, row: usize) -> Option<Pixel> {
        if column >= self.viewport.width {
            return None;
        }
        self.framebuffer
            .get(row * self.viewport.width + column)
            .copied()
    }

    /// Trace every pixel. Resizes first if the frame asks for a different
    /// viewport.
    pub fn render(&mut self, frame: &FrameContext) {
        if frame.viewport != self.viewport {
            self.resize(frame.viewport.width, frame.viewport.height);
        }

        let basis = frame.camera.basis();
        let viewport = self.viewport;

        for row in 0..viewport.height {
            for column in 0..viewport.width {
                let pixel = self.trace_cell(frame, &basis, column, row);
                self.framebuffer[row * viewport.width + column] = pixel;
            }
        }
    }

    fn trace_cell(&self, frame: &FrameContext, basis: &Basis, column: usize, row: usize) -> Pixel {
        let x = column as i32 - (self.viewport.width / 2) as i32;
        let y = row as i32 - (self.viewport.height / 2) as i32;
        let ray = frame.camera.primary_ray(basis, x, y, self.viewport);
        trace(frame.scene, &ray, self.shadow_bias)
    }
}
