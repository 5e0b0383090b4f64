//! Interactive frame loop: read input, move the camera, render, print

use crate::camera::{Camera, Movement};
use crate::config::{AppConfig, ConfigError};
use crate::encode::{ChannelOrder, encode_frame};
use crate::input::{InputState, Key};
use crate::renderer::{FrameContext, Renderer, Viewport};
use crate::scene::Scene;
use crate::terminal::TerminalDisplay;
use std::time::{Duration, Instant};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// What changed during an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub resized: bool,
    pub quit: bool,
}

/// Renderer state owned by the frame loop
pub struct App {
    config: AppConfig,
    scene: Scene,
    camera: Camera,
    viewport: Viewport,
    renderer: Renderer,
    channel_order: ChannelOrder,
    zoom_ready_at: Option<Instant>,
}

impl App {
    pub fn new(config: AppConfig, scene: Scene) -> Self {
        let viewport = Viewport::new(config.display.width, config.display.height);
        let renderer = Renderer::new(viewport.width, viewport.height)
            .with_shadow_bias(config.render.shadow_bias);

        Self {
            camera: Camera::from_config(&config.camera),
            channel_order: ChannelOrder::from_legacy_flag(config.display.legacy_channel_order),
            config,
            scene,
            viewport,
            renderer,
            zoom_ready_at: None,
        }
    }

    /// Validate the configuration and build its scene
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        config.validate()?;
        let scene = Scene::from_config(&config.scene);
        Ok(Self::new(config, scene))
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Apply held controls for a frame that took `elapsed`
    pub fn update(&mut self, input: &mut InputState, now: Instant, elapsed: Duration) -> UpdateOutcome {
        if input.quit_requested() {
            return UpdateOutcome {
                resized: false,
                quit: true,
            };
        }

        let dt = elapsed.as_secs_f32();
        let camera_config = &self.config.camera;

        let (dx, dy) = input.take_mouse_delta();
        self.camera.look(dx, dy, camera_config.look_sensitivity);

        let turn = camera_config.turn_rate * dt;
        let axis = |positive: Key, negative: Key| {
            input.is_held(positive, now) as i32 as f32 - input.is_held(negative, now) as i32 as f32
        };
        let turn_x = axis(Key::LookRight, Key::LookLeft);
        let turn_y = axis(Key::LookDown, Key::LookUp);
        self.camera.look(turn_x, turn_y, turn);

        let speed = if input.is_held(Key::Boost, now) {
            camera_config.boost_speed
        } else {
            camera_config.speed
        };

        let moves = [
            (Key::Forward, Movement::Forward),
            (Key::Back, Movement::Back),
            (Key::Left, Movement::Left),
            (Key::Right, Movement::Right),
            (Key::Ascend, Movement::Ascend),
            (Key::Descend, Movement::Descend),
        ];
        for (key, movement) in moves {
            if input.is_held(key, now) {
                self.camera.translate(movement, dt, speed);
            }
        }

        let resized = self.zoom(input, now);

        UpdateOutcome {
            resized,
            quit: false,
        }
    }

    /// Grow or shrink the viewport, rate limited by the zoom cooldown
    fn zoom(&mut self, input: &InputState, now: Instant) -> bool {
        if self.zoom_ready_at.is_some_and(|ready| now < ready) {
            return false;
        }

        let display = &self.config.display;
        let step = display.zoom_step;
        let (width, height) = (self.viewport.width, self.viewport.height);

        let next = if input.is_held(Key::ZoomIn, now) && width < display.max_size {
            Viewport::new(width + step, height + step)
        } else if input.is_held(Key::ZoomOut, now) && width > display.min_size {
            Viewport::new(
                width.saturating_sub(step).max(1),
                height.saturating_sub(step).max(1),
            )
        } else {
            return false;
        };

        self.viewport = next;
        self.zoom_ready_at = Some(now + Duration::from_millis(display.zoom_cooldown_ms));
        tracing::debug!(width = next.width, height = next.height, "Viewport zoomed");
        true
    }

    /// Trace the current frame and return its encoded text
    pub fn render_frame(&mut self) -> String {
        self.renderer.render(&FrameContext {
            scene: &self.scene,
            camera: &self.camera,
            viewport: self.viewport,
        });
        encode_frame(
            self.renderer.framebuffer(),
            self.viewport.width,
            self.channel_order,
        )
    }

    pub fn status_line(&self, elapsed: Duration, uptime: Duration) -> String {
        let fps = 1.0 / elapsed.as_secs_f32();
        let p = self.camera.position;
        format!(
            "Screen: {}, {} | Camera: {:.2}, {:.2}, {:.2} | Orientation: {:.2}, {:.2} | FPS: {:.2} | Time: {:.2}",
            self.viewport.width,
            self.viewport.height,
            p.x,
            p.y,
            p.z,
            self.camera.pitch,
            self.camera.yaw,
            fps,
            uptime.as_secs_f32(),
        )
    }

    /// Run until the quit key is pressed
    pub fn run(mut self) -> Result<(), AppError> {
        let mut terminal = TerminalDisplay::new(self.config.input.mouse_look)?;
        let mut input = InputState::from_config(&self.config.input);
        input.set_release_events(terminal.reports_key_release());

        let started = Instant::now();
        let mut last_frame = started;
        let mut frames: u64 = 0;

        tracing::info!(
            width = self.viewport.width,
            height = self.viewport.height,
            objects = self.scene.len(),
            "Render loop started"
        );

        loop {
            let now = Instant::now();
            let elapsed = now.duration_since(last_frame);
            last_frame = now;

            while let Some(event) = terminal.poll_event(Duration::ZERO)? {
                input.handle_event(&event, now);
            }

            let outcome = self.update(&mut input, now, elapsed);
            if outcome.quit {
                break;
            }
            if outcome.resized {
                terminal.clear()?;
            }

            let frame = self.render_frame();
            let status = self.status_line(elapsed, now.duration_since(started));

            if let Err(e) = terminal.render(&frame, &status) {
                if e.kind() == std::io::ErrorKind::BrokenPipe {
                    break;
                }
                return Err(e.into());
            }

            frames += 1;
            tracing::trace!(frame = frames, elapsed_ms = elapsed.as_secs_f64() * 1000.0, "Frame drawn");
        }

        tracing::info!(
            frames,
            seconds = started.elapsed().as_secs_f64(),
            "Render loop finished"
        );

        Ok(())
    }
}
