//! wgpu render backend for the terrain viewer.
//!
//! Uploads the terrain mesh once and draws it with one of two techniques:
//! "Simple" (vertex color) or "Textured" (mirrored, trilinear-filtered
//! texture with per-vertex diffuse lighting).
//!
//! # Invariants
//! - Renderer never mutates the camera or the mesh.
//! - Terrain buffers are written once at creation and released once.
//! - One indexed draw per frame covers the whole index buffer.

mod gpu;
mod shaders;
mod texture;

pub use gpu::{DrawSettings, Lighting, TerrainRenderer};
