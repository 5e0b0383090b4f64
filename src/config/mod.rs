mod loader;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use loader::load_config;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub scene: SceneConfig,
}

/// Viewport size and pixel output options
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default = "default_size")]
    pub width: usize,
    #[serde(default = "default_size")]
    pub height: usize,
    /// Zooming out stops once the width reaches this size
    #[serde(default = "default_min_size")]
    pub min_size: usize,
    /// Zooming in stops once the width reaches this size
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: usize,
    #[serde(default = "default_zoom_cooldown")]
    pub zoom_cooldown_ms: u64,
    /// Print channels in (r, b, g) order to match older frame captures
    #[serde(default)]
    pub legacy_channel_order: bool,
}

fn default_size() -> usize {
    32
}

fn default_min_size() -> usize {
    4
}

fn default_max_size() -> usize {
    78
}

fn default_zoom_step() -> usize {
    2
}

fn default_zoom_cooldown() -> u64 {
    100
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_size(),
            height: default_size(),
            min_size: default_min_size(),
            max_size: default_max_size(),
            zoom_step: default_zoom_step(),
            zoom_cooldown_ms: default_zoom_cooldown(),
            legacy_channel_order: false,
        }
    }
}

/// Starting pose and movement tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub pitch: f32,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default = "default_fov")]
    pub fov: f32,
    /// Units per second
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Units per second while the boost key is held
    #[serde(default = "default_boost_speed")]
    pub boost_speed: f32,
    /// Radians per terminal cell of mouse movement
    #[serde(default = "default_look_sensitivity")]
    pub look_sensitivity: f32,
    /// Radians per second while an arrow key is held
    #[serde(default = "default_turn_rate")]
    pub turn_rate: f32,
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_fov() -> f32 {
    2.0
}

fn default_speed() -> f32 {
    2.0
}

fn default_boost_speed() -> f32 {
    10.0
}

fn default_look_sensitivity() -> f32 {
    0.05
}

fn default_turn_rate() -> f32 {
    1.5
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            pitch: 0.0,
            yaw: 0.0,
            fov: default_fov(),
            speed: default_speed(),
            boost_speed: default_boost_speed(),
            look_sensitivity: default_look_sensitivity(),
            turn_rate: default_turn_rate(),
        }
    }
}

/// Keyboard and mouse handling
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// How long a key counts as held after its last press or repeat
    #[serde(default = "default_hold_window")]
    pub hold_window_ms: u64,
    #[serde(default = "default_mouse_look")]
    pub mouse_look: bool,
}

fn default_hold_window() -> u64 {
    150
}

fn default_mouse_look() -> bool {
    true
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            hold_window_ms: default_hold_window(),
            mouse_look: default_mouse_look(),
        }
    }
}

/// Tracer options
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Distance the shadow ray origin is pushed along the surface normal.
    /// Zero keeps the hit point as the origin.
    #[serde(default)]
    pub shadow_bias: f32,
}

/// Scene population
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SceneConfig {
    /// Seed for the random spheres; a fresh seed is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_random_spheres")]
    pub random_spheres: usize,
    /// Add the white ground plane at y = 0
    #[serde(default = "default_ground")]
    pub ground: bool,
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
}

fn default_random_spheres() -> usize {
    10
}

fn default_ground() -> bool {
    true
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            random_spheres: default_random_spheres(),
            ground: default_ground(),
            objects: Vec::new(),
        }
    }
}

/// A configured scene object
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ObjectConfig {
    Sphere {
        center: [f32; 3],
        radius: f32,
        color: [u8; 3],
    },
    Plane {
        point: [f32; 3],
        normal: [f32; 3],
        color: [u8; 3],
    },
    Triangle {
        vertices: [[f32; 3]; 3],
        color: [u8; 3],
    },
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_config(path)
    }

    /// Load configuration with fallback to the default locations, then to
    /// built-in defaults
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => {
                let default_paths = ["raytracer.yaml", "config.yaml"];
                for p in default_paths {
                    let path = Path::new(p);
                    if path.exists() {
                        return Self::from_file(path);
                    }
                }
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reject values the renderer cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let display = &self.display;
        if display.min_size == 0 || display.min_size > display.max_size {
            return Err(ConfigError::Validation(format!(
                "display.min_size ({}) must be positive and at most display.max_size ({})",
                display.min_size, display.max_size
            )));
        }
        if display.width == 0 || display.height == 0 {
            return Err(ConfigError::Validation(
                "display.width and display.height must be positive".to_string(),
            ));
        }
        if display.zoom_step == 0 {
            return Err(ConfigError::Validation(
                "display.zoom_step must be positive".to_string(),
            ));
        }

        let camera = &self.camera;
        let scalars = [
            ("camera.fov", camera.fov),
            ("camera.speed", camera.speed),
            ("camera.boost_speed", camera.boost_speed),
            ("camera.look_sensitivity", camera.look_sensitivity),
            ("camera.turn_rate", camera.turn_rate),
            ("render.shadow_bias", self.render.shadow_bias),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::Validation(format!("{} must be finite", name)));
            }
        }

        for (i, object) in self.scene.objects.iter().enumerate() {
            if let ObjectConfig::Sphere { radius, .. } = object {
                if radius.is_nan() || *radius <= 0.0 {
                    return Err(ConfigError::Validation(format!(
                        "scene.objects[{}]: sphere radius must be positive",
                        i
                    )));
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_console_renderer() {
        let config = AppConfig::default();
        assert_eq!(config.display.width, 32);
        assert_eq!(config.display.height, 32);
        assert_eq!(config.display.min_size, 4);
        assert_eq!(config.display.max_size, 78);
        assert!(!config.display.legacy_channel_order);
        assert_eq!(config.camera.position, [0.0, 1.0, 0.0]);
        assert_eq!(config.camera.fov, 2.0);
        assert_eq!(config.camera.speed, 2.0);
        assert_eq!(config.camera.boost_speed, 10.0);
        assert_eq!(config.render.shadow_bias, 0.0);
        assert_eq!(config.scene.random_spheres, 10);
        assert!(config.scene.ground);
        assert!(config.scene.seed.is_none());
    }

    #[test]
    fn test_defaults_validate() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_shipped_default_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.yaml.default");
        let config = AppConfig::from_file(path).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.scene.objects.len(), 2);
        assert_eq!(config.display.width, 32);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.display.width, 32);
        assert_eq!(config.input.hold_window_ms, 150);
        assert!(config.input.mouse_look);
    }

    #[test]
    fn test_object_config_deserialize() {
        let yaml = r#"
- shape: sphere
  center: [0.0, 3.0, 10.0]
  radius: 1.0
  color: [200, 50, 50]
- shape: plane
  point: [0.0, 0.0, 0.0]
  normal: [0.0, 1.0, 0.0]
  color: [255, 255, 255]
- shape: triangle
  vertices: [[0.0, 2.0, 5.0], [2.0, 1.0, 5.0], [1.0, 4.0, 5.0]]
  color: [255, 0, 255]
"#;
        let objects: Vec<ObjectConfig> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(objects.len(), 3);
        assert_eq!(
            objects[0],
            ObjectConfig::Sphere {
                center: [0.0, 3.0, 10.0],
                radius: 1.0,
                color: [200, 50, 50],
            }
        );
        assert!(matches!(objects[1], ObjectConfig::Plane { .. }));
        assert!(matches!(objects[2], ObjectConfig::Triangle { color: [255, 0, 255], .. }));
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        let yaml = "- shape: cube\n  color: [1, 2, 3]\n";
        assert!(serde_yaml::from_str::<Vec<ObjectConfig>>(yaml).is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_zoom_bounds() {
        let mut config = AppConfig::default();
        config.display.min_size = 80;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_non_finite_fov() {
        let mut config = AppConfig::default();
        config.camera.fov = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_zero_radius() {
        let mut config = AppConfig::default();
        config.scene.objects.push(ObjectConfig::Sphere {
            center: [0.0, 0.0, 5.0],
            radius: 0.0,
            color: [1, 1, 1],
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scene.objects[0]"));
    }

    #[test]
    fn test_load_or_default_explicit_missing_path() {
        let result = AppConfig::load_or_default(Some(Path::new("/nonexistent/raytracer.yaml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("bad".to_string());
        assert_eq!(err.to_string(), "Configuration validation error: bad");
    }
}
