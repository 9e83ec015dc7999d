//! Shared types and configuration for the terrain viewer.

pub mod config;
mod types;

pub use config::{
    CameraConfig, ConfigError, RenderConfig, TerrainConfig, ViewerConfig, WindowConfig,
};
pub use types::{FrameTime, Technique, UnknownTechnique};
