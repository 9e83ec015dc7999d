//! Terrain: heightfield storage and indexed grid mesh generation.
//!
//! # Invariants
//! - A heightfield is at least 2x2 and immutable once built.
//! - Vertex `(x, y)` sits at world `(x, elevation, -y)` with index `x + y * width`.
//! - Every index is below `width * height`; winding faces +Y.

mod heightfield;
mod mesh;

pub use heightfield::HeightField;
pub use mesh::{DEFAULT_COLOR, MeshOptions, TerrainMesh, TerrainVertex};

/// Errors from heightfield construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("terrain grid must be at least 2x2, got {width}x{height}")]
    TooSmall { width: u32, height: u32 },
    #[error("terrain grid {width}x{height} exceeds the 32-bit index range")]
    TooLarge { width: u32, height: u32 },
    #[error("expected {expected} elevation samples, got {actual}")]
    SampleCount { expected: usize, actual: usize },
}
