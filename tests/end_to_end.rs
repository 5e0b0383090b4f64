use console_raytracer::camera::DEFAULT_FOV;
use console_raytracer::geometry::{Plane, Ray, Shape, Sphere};
use console_raytracer::math::{Vec3, normalized, vec3};
use console_raytracer::renderer::trace;
use console_raytracer::{
    App, AppConfig, Camera, FrameContext, PixelClass, Renderer, Rgb, Scene, Viewport,
};
use std::io::Write;

const SPHERE_COLOR: Rgb = Rgb::new(200, 50, 50);

fn ground_and_sphere() -> Scene {
    Scene::from_objects([
        (Shape::from(Plane::new(Vec3::zeros(), vec3(0.0, 1.0, 0.0))), Rgb::WHITE),
        (Shape::from(Sphere::new(vec3(0.0, 3.0, 10.0), 1.0)), SPHERE_COLOR),
    ])
}

#[test]
fn ray_at_sphere_center_sees_its_shadowed_underside() {
    let scene = ground_and_sphere();
    let ray = Ray::new(Vec3::zeros(), normalized(&vec3(0.0, 3.0, 10.0)));

    let pixel = trace(&scene, &ray, 0.0);
    assert_eq!(pixel.color, SPHERE_COLOR);
    // The near hit is on the lower half of the sphere, which the sphere
    // itself blocks from the overhead light
    assert_eq!(pixel.class, PixelClass::Shadowed);
}

#[test]
fn rendered_pixel_through_sphere_center() {
    let scene = ground_and_sphere();
    let camera = Camera::new(Vec3::zeros(), 0.0, 0.0, DEFAULT_FOV);
    let viewport = Viewport::new(20, 20);
    let mut renderer = Renderer::new(20, 20);

    renderer.render(&FrameContext {
        scene: &scene,
        camera: &camera,
        viewport,
    });

    // Column 10 is x = 0; row 7 is y = -3, giving the direction (0, 0.3, 1)
    let pixel = renderer.pixel(10, 7).unwrap();
    assert_eq!(pixel.color, SPHERE_COLOR);
    assert_eq!(pixel.class, PixelClass::Shadowed);

    // Straight ahead passes under the sphere and never meets the ground,
    // which lies at the camera's own height
    let ahead = renderer.pixel(10, 10).unwrap();
    assert_eq!(ahead.class, PixelClass::Background);
}

#[test]
fn rendering_is_deterministic_for_a_seed() {
    let mut config = AppConfig::default();
    config.scene.seed = Some(1234);

    let mut first = App::from_config(config.clone()).unwrap();
    let mut second = App::from_config(config).unwrap();
    assert_eq!(first.render_frame(), second.render_frame());
}

#[test]
fn configured_scene_renders_through_app() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        file,
        r#"
display:
  width: 20
  height: 20
camera:
  position: [0.0, 0.0, 0.0]
scene:
  random_spheres: 0
  ground: true
  objects:
    - shape: sphere
      center: [0.0, 3.0, 10.0]
      radius: 1.0
      color: [200, 50, 50]
"#
    )
    .unwrap();

    let config = AppConfig::load_or_default(Some(file.path())).unwrap();
    let mut app = App::from_config(config).unwrap();
    assert_eq!(app.scene().len(), 2);

    let frame = app.render_frame();
    let lines: Vec<&str> = frame.lines().collect();
    assert_eq!(lines.len(), 20);
    assert!(lines[7].contains("\x1b[38;2;200;050;050m.."));
}

#[test]
fn ground_seen_from_default_camera_is_lit_away_from_spheres() {
    let scene = ground_and_sphere();
    let camera = Camera::default();
    let mut renderer = Renderer::new(32, 32);

    renderer.render(&FrameContext {
        scene: &scene,
        camera: &camera,
        viewport: Viewport::new(32, 32),
    });

    // Bottom left corner looks down and to the side, far from the sphere
    let corner = renderer.pixel(0, 31).unwrap();
    assert_eq!(corner.color, Rgb::WHITE);
    assert_eq!(corner.class, PixelClass::Lit);
}
