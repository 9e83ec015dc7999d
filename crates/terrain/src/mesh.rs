use crate::HeightField;
use glam::{Vec2, Vec3};

/// Default vertex color (white).
pub const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// One grid vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainVertex {
    /// World position `(x, elevation, -y)`.
    pub position: Vec3,
    /// Unit surface normal.
    pub normal: Vec3,
    pub color: [f32; 4],
    pub uv: Vec2,
}

/// Options for [`TerrainMesh::generate_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshOptions {
    pub color: [f32; 4],
    /// Texture coordinates per grid unit.
    pub texture_scale: f32,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            texture_scale: 1.0,
        }
    }
}

impl MeshOptions {
    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn with_texture_scale(mut self, scale: f32) -> Self {
        self.texture_scale = scale;
        self
    }
}

/// Vertex and index arrays for an indexed triangle list over a heightfield.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainMesh {
    width: u32,
    height: u32,
    vertices: Vec<TerrainVertex>,
    indices: Vec<u32>,
}

impl TerrainMesh {
    /// Build the grid mesh with default options.
    pub fn generate(field: &HeightField) -> Self {
        Self::generate_with(field, MeshOptions::default())
    }

    pub fn generate_with(field: &HeightField, options: MeshOptions) -> Self {
        let vertices = generate_vertices(field, &options);
        let indices = generate_indices(field.width(), field.height());
        tracing::debug!(
            "generated {}x{} terrain mesh: {} vertices, {} indices",
            field.width(),
            field.height(),
            vertices.len(),
            indices.len()
        );
        Self {
            width: field.width(),
            height: field.height(),
            vertices,
            indices,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds `(min, max)` of all vertex positions.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.vertices.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(lo, hi), v| (lo.min(v.position), hi.max(v.position)),
        )
    }
}

/// Row-major vertices, `x` fastest, so vertex `(x, y)` has index `x + y * width`.
fn generate_vertices(field: &HeightField, options: &MeshOptions) -> Vec<TerrainVertex> {
    let (w, h) = (field.width(), field.height());
    let mut vertices = Vec::with_capacity(w as usize * h as usize);
    for y in 0..h {
        for x in 0..w {
            let elevation = field.sample_clamped(x as i64, y as i64);
            vertices.push(TerrainVertex {
                position: Vec3::new(x as f32, elevation, -(y as f32)),
                normal: normal_at(field, x, y),
                color: options.color,
                uv: Vec2::new(x as f32, y as f32) * options.texture_scale,
            });
        }
    }
    vertices
}

/// Central-difference normal. Grid `y` runs along world -Z.
fn normal_at(field: &HeightField, x: u32, y: u32) -> Vec3 {
    let (x, y) = (x as i64, y as i64);
    let x0 = (x - 1).max(0);
    let x1 = (x + 1).min(field.width() as i64 - 1);
    let y0 = (y - 1).max(0);
    let y1 = (y + 1).min(field.height() as i64 - 1);

    let dhdx = (field.sample_clamped(x1, y) - field.sample_clamped(x0, y)) / (x1 - x0) as f32;
    let dhdy = (field.sample_clamped(x, y1) - field.sample_clamped(x, y0)) / (y1 - y0) as f32;
    Vec3::new(-dhdx, 1.0, dhdy).normalize()
}

/// Two triangles per cell. With `bl = x + y*w`, `tl = bl + 1`, `br = bl + w`
/// and `tr = br + 1`, the cell emits `[tl, br, bl]` then `[tl, tr, br]`,
/// counter-clockwise when seen from +Y.
fn generate_indices(width: u32, height: u32) -> Vec<u32> {
    let cells = (width as usize - 1) * (height as usize - 1);
    let mut indices = Vec::with_capacity(cells * 6);
    for y in 0..height - 1 {
        for x in 0..width - 1 {
            let bl = x + y * width;
            let tl = (x + 1) + y * width;
            let br = x + (y + 1) * width;
            let tr = (x + 1) + (y + 1) * width;

            indices.extend_from_slice(&[tl, br, bl]);
            indices.extend_from_slice(&[tl, tr, br]);
        }
    }
    indices
}
