use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Timing information handed to every component each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Time elapsed since the previous frame.
    pub delta: Duration,
    /// Time elapsed since the loop started.
    pub total: Duration,
}

impl FrameTime {
    pub fn new(delta: Duration, total: Duration) -> Self {
        Self { delta, total }
    }

    /// Frame delta in seconds.
    pub fn dt(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Advance by one frame of `delta`.
    pub fn advance(&self, delta: Duration) -> Self {
        Self {
            delta,
            total: self.total + delta,
        }
    }
}

/// Shader technique used to draw the terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Technique {
    /// Per-vertex color, no lighting.
    Simple,
    /// Texture sampled with per-vertex diffuse lighting.
    #[default]
    Textured,
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => f.write_str("simple"),
            Self::Textured => f.write_str("textured"),
        }
    }
}

/// Error returned when a technique name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown technique `{0}` (expected `simple` or `textured`)")]
pub struct UnknownTechnique(pub String);

impl FromStr for Technique {
    type Err = UnknownTechnique;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "textured" => Ok(Self::Textured),
            other => Err(UnknownTechnique(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_time_advance_accumulates() {
        let t = FrameTime::default()
            .advance(Duration::from_millis(16))
            .advance(Duration::from_millis(17));
        assert_eq!(t.delta, Duration::from_millis(17));
        assert_eq!(t.total, Duration::from_millis(33));
        assert!((t.dt() - 0.017).abs() < 1e-6);
    }

    #[test]
    fn technique_parse_and_display() {
        assert_eq!("Simple".parse::<Technique>(), Ok(Technique::Simple));
        assert_eq!("textured".parse::<Technique>(), Ok(Technique::Textured));
        assert!("phong".parse::<Technique>().is_err());
        assert_eq!(Technique::Simple.to_string(), "simple");
    }
}
