use std::path::Path;

use super::{AppConfig, ConfigError};

/// Load configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;

    tracing::debug!(path = %path.display(), "Loaded configuration");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ObjectConfig;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_missing_config() {
        let result = load_config("/nonexistent/raytracer.yaml");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let file = write_config("display: [");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_valid() {
        let file = write_config(
            r#"
display:
  width: 40
  height: 24
  legacy_channel_order: true

camera:
  position: [0.0, 2.0, -5.0]
  fov: 1.5
  speed: 3.0

render:
  shadow_bias: 0.001

scene:
  seed: 42
  random_spheres: 0
  ground: true
  objects:
    - shape: sphere
      center: [0.0, 3.0, 10.0]
      radius: 1.0
      color: [200, 50, 50]
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.display.width, 40);
        assert_eq!(config.display.height, 24);
        assert_eq!(config.display.max_size, 78);
        assert!(config.display.legacy_channel_order);
        assert_eq!(config.camera.position, [0.0, 2.0, -5.0]);
        assert_eq!(config.camera.fov, 1.5);
        assert_eq!(config.camera.boost_speed, 10.0);
        assert_eq!(config.render.shadow_bias, 0.001);
        assert_eq!(config.scene.seed, Some(42));
        assert_eq!(config.scene.random_spheres, 0);
        assert!(matches!(
            config.scene.objects.as_slice(),
            [ObjectConfig::Sphere { radius, .. }] if *radius == 1.0
        ));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_minimal() {
        let file = write_config("scene:\n  seed: 7\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.scene.seed, Some(7));
        assert!(config.scene.objects.is_empty());
        assert_eq!(config.display.width, 32);
    }

    #[test]
    fn test_config_from_file() {
        let result = AppConfig::from_file("/nonexistent/path.yaml");
        assert!(result.is_err());
    }
}
