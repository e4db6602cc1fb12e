use std::path::Path;

use ocean_common::Rgba;
use serde::{Deserialize, Serialize};

use crate::driver::DEFAULT_MAX_STEP;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Engine settings. Every section and field is optional in YAML; missing
/// values take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub frame: FrameConfig,
    pub camera: CameraConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Ocean".into(),
        }
    }
}

impl WindowConfig {
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Largest delta fed to one update, in seconds.
    pub max_step: f32,
    pub time_scale: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_step: DEFAULT_MAX_STEP,
            time_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub clear_color: Rgba,
    pub ambient: Rgba,
    pub wireframe: bool,
    pub lighting: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: Rgba::rgb(0.0, 0.0, 0.1),
            ambient: Rgba::rgb(0.1, 0.1, 0.1),
            wireframe: false,
            lighting: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid(
                "window",
                format!("size must be positive, got {}x{}", self.window.width, self.window.height),
            ));
        }
        let frame = &self.frame;
        if !(frame.max_step.is_finite() && frame.max_step > 0.0) {
            return Err(invalid(
                "frame.max_step",
                format!("must be positive, got {}", frame.max_step),
            ));
        }
        if !(frame.time_scale.is_finite() && frame.time_scale >= 0.0) {
            return Err(invalid(
                "frame.time_scale",
                format!("must be non-negative, got {}", frame.time_scale),
            ));
        }
        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(invalid(
                "camera.fov_degrees",
                format!("must be in (0, 180), got {}", camera.fov_degrees),
            ));
        }
        if !(camera.near > 0.0 && camera.near < camera.far && camera.far.is_finite()) {
            return Err(invalid(
                "camera.near",
                format!("need 0 < near < far, got near={} far={}", camera.near, camera.far),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        config.validate().unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.frame.max_step, 0.1);
        assert_eq!(config.camera.far, 1000.0);
        assert!(config.render.lighting);
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = EngineConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_fields() {
        let text = "
window:
  title: Fantasy World
frame:
  time_scale: 0.5
render:
  wireframe: true
  clear_color: { r: 0.2, g: 0.2, b: 0.2 }
";
        let config = EngineConfig::from_yaml_str(text).unwrap();
        assert_eq!(config.window.title, "Fantasy World");
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.frame.time_scale, 0.5);
        assert!(config.render.wireframe);
        assert_eq!(config.render.clear_color, Rgba::rgb(0.2, 0.2, 0.2));
    }

    #[test]
    fn yaml_round_trip() {
        let mut config = EngineConfig::default();
        config.camera.fov_degrees = 60.0;
        let text = config.to_yaml_string().unwrap();
        assert_eq!(EngineConfig::from_yaml_str(&text).unwrap(), config);
    }

    #[test]
    fn rejects_invalid_values() {
        let cases = [
            ("window: { width: 0 }", "window"),
            ("frame: { max_step: 0.0 }", "frame.max_step"),
            ("frame: { time_scale: -1.0 }", "frame.time_scale"),
            ("camera: { fov_degrees: 180.0 }", "camera.fov_degrees"),
            ("camera: { near: 10.0, far: 5.0 }", "camera.near"),
        ];
        for (text, expected) in cases {
            match EngineConfig::from_yaml_str(text) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected, "{text}"),
                other => panic!("{text}: expected invalid {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let err = EngineConfig::from_yaml_str("window: [").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = EngineConfig::load("/nonexistent/ocean.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }
}
