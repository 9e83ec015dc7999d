//! Viewer configuration with defaults and YAML loading.

use crate::types::Technique;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub terrain: TerrainConfig,
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
            title: "terrainview".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grid vertices along X.
    pub width: u32,
    /// Grid vertices along -Z.
    pub height: u32,
    /// Texture coordinates per grid unit.
    pub texture_scale: f32,
    /// Grayscale heightmap asset name; a flat grid when absent.
    pub heightmap: Option<String>,
    /// Elevation of a white heightmap texel.
    pub height_scale: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            texture_scale: 0.25,
            heightmap: None,
            height_scale: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Initial yaw in radians.
    pub yaw: f32,
    /// Initial pitch in radians.
    pub pitch: f32,
    /// Units per second.
    pub move_speed: f32,
    /// Radians per second for keyboard rotation.
    pub rotate_speed: f32,
    /// Radians per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Units per scroll line.
    pub scroll_speed: f32,
    /// Speed multiplier while the boost key is held.
    pub boost: f32,
    /// Pitch limit in radians. `None` disables clamping.
    pub pitch_limit: Option<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(-8.0, 12.0, 8.0),
            yaw: 2.36,
            pitch: -0.6,
            move_speed: 10.0,
            rotate_speed: 1.5,
            mouse_sensitivity: 0.003,
            scroll_speed: 0.5,
            boost: 3.0,
            pitch_limit: Some(1.4),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub technique: Technique,
    /// Texture asset name; a procedural checkerboard when absent.
    pub texture: Option<String>,
    pub light_direction: Vec3,
    pub ambient: f32,
    pub lighting: bool,
    pub clear_color: [f64; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            technique: Technique::Textured,
            texture: None,
            light_direction: Vec3::new(-0.5, -1.0, -0.3),
            ambient: 0.3,
            lighting: true,
            clear_color: [0.1, 0.1, 0.15, 1.0],
        }
    }
}

impl ViewerConfig {
    /// Load a config from a YAML file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let text = serde_yaml::to_string(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.terrain.width < 2 || self.terrain.height < 2 {
            return Err(ConfigError::Invalid(format!(
                "terrain grid must be at least 2x2, got {}x{}",
                self.terrain.width, self.terrain.height
            )));
        }
        if self.render.light_direction.length_squared() == 0.0 {
            return Err(ConfigError::Invalid(
                "light direction must be non-zero".into(),
            ));
        }
        if let Some(limit) = self.camera.pitch_limit {
            if !(0.0..std::f32::consts::FRAC_PI_2).contains(&limit) {
                return Err(ConfigError::Invalid(format!(
                    "pitch limit {limit} must lie in [0, pi/2)"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.camera.pitch_limit, Some(1.4));
        assert_eq!(config.render.technique, Technique::Textured);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = ViewerConfig::from_yaml(
            "terrain:\n  width: 16\nrender:\n  technique: simple\n",
        )
        .unwrap();
        assert_eq!(config.terrain.width, 16);
        assert_eq!(config.terrain.height, 64);
        assert_eq!(config.render.technique, Technique::Simple);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn rejects_degenerate_grid() {
        let err = ViewerConfig::from_yaml("terrain:\n  width: 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.yaml");
        let mut config = ViewerConfig::default();
        config.camera.pitch_limit = None;
        config.render.texture = Some("grass.png".into());
        config.save(&path).unwrap();

        let loaded = ViewerConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
