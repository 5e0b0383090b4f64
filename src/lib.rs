//! Console Raytracer
//!
//! Renders a scene of spheres, planes and triangles into the terminal every
//! frame. Each pixel is traced with a single primary ray and a single shadow
//! ray toward an overhead light, giving a color plus a lit/shadowed/background
//! class that is printed as a colored glyph pair.

pub mod app;
pub mod camera;
pub mod config;
pub mod encode;
pub mod geometry;
pub mod input;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod terminal;

pub use app::{App, AppError};
pub use camera::Camera;
pub use config::AppConfig;
pub use renderer::{FrameContext, Pixel, PixelClass, Renderer, Viewport};
pub use scene::{Rgb, Scene};
