//! Content loading: textures and heightmaps resolved by name.
//!
//! Assets live under a content root and are requested by relative name, the
//! way the renderer asks for "grass.png" rather than a filesystem path.
//! Decoded textures are cached so repeated requests share one copy.
//!
//! # Invariants
//! - Names never resolve outside the content root.
//! - Textures are always RGBA8.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use terrainview_terrain::{HeightField, MeshError};

/// Decoded RGBA8 texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8 texels.
    pub pixels: Vec<u8>,
}

impl TextureData {
    pub fn from_image(name: impl Into<String>, image: image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            name: name.into(),
            width,
            height,
            pixels: image.into_raw(),
        }
    }

    /// Two-tone checkerboard with `cells` squares per side.
    pub fn checkerboard(size: u32, cells: u32) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let light = image::Rgba([126u8, 170, 92, 255]);
        let dark = image::Rgba([86u8, 128, 60, 255]);
        let image = image::RgbaImage::from_fn(size, size, |x, y| {
            if ((x / cell) + (y / cell)) % 2 == 0 {
                light
            } else {
                dark
            }
        });
        Self::from_image("checkerboard", image)
    }

    /// Full mip chain, level 0 first, each level half the previous size
    /// (minimum 1x1), filtered with a triangle kernel.
    pub fn mip_chain(&self) -> Vec<TextureData> {
        let mut levels = vec![self.clone()];
        let Some(mut current) =
            image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
        else {
            return levels;
        };
        while current.width() > 1 || current.height() > 1 {
            let w = (current.width() / 2).max(1);
            let h = (current.height() / 2).max(1);
            current = image::imageops::resize(&current, w, h, image::imageops::FilterType::Triangle);
            levels.push(TextureData::from_image(self.name.clone(), current.clone()));
        }
        levels
    }
}

/// Errors from asset loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("invalid asset name `{0}`")]
    InvalidName(String),
    #[error("failed to decode `{name}`: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("heightmap `{name}`: {source}")]
    Terrain {
        name: String,
        #[source]
        source: MeshError,
    },
}

/// Loads assets by name from a content directory.
#[derive(Debug)]
pub struct ContentStore {
    root: PathBuf,
    textures: BTreeMap<String, Arc<TextureData>>,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            textures: BTreeMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative asset name to a path under the content root.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, AssetError> {
        let relative = Path::new(name);
        let is_plain = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_plain {
            return Err(AssetError::InvalidName(name.to_string()));
        }
        let path = self.root.join(relative);
        if !path.is_file() {
            return Err(AssetError::NotFound(path));
        }
        Ok(path)
    }

    /// Load and cache a texture, converting it to RGBA8.
    pub fn texture(&mut self, name: &str) -> Result<Arc<TextureData>, AssetError> {
        if let Some(texture) = self.textures.get(name) {
            return Ok(Arc::clone(texture));
        }
        let image = self.decode(name)?.to_rgba8();
        let texture = Arc::new(TextureData::from_image(name, image));
        tracing::info!(
            "loaded texture {name} ({}x{})",
            texture.width,
            texture.height
        );
        self.textures.insert(name.to_string(), Arc::clone(&texture));
        Ok(texture)
    }

    /// Build a heightfield from a grayscale image: black is 0, white is `scale`.
    pub fn heightmap(&self, name: &str, scale: f32) -> Result<HeightField, AssetError> {
        let luma = self.decode(name)?.to_luma8();
        let field = HeightField::from_fn(luma.width(), luma.height(), |x, y| {
            luma.get_pixel(x, y).0[0] as f32 / 255.0 * scale
        })
        .map_err(|source| AssetError::Terrain {
            name: name.to_string(),
            source,
        })?;
        let (lo, hi) = field.range();
        tracing::info!(
            "loaded heightmap {name} ({}x{}, elevation {lo:.2}..{hi:.2})",
            field.width(),
            field.height()
        );
        Ok(field)
    }

    pub fn cached_textures(&self) -> usize {
        self.textures.len()
    }

    fn decode(&self, name: &str) -> Result<image::DynamicImage, AssetError> {
        let path = self.resolve(name)?;
        image::open(&path).map_err(|source| AssetError::Decode {
            name: name.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &Path, name: &str, image: &image::RgbaImage) {
        image.save(dir.join(name)).unwrap();
    }

    #[test]
    fn loads_and_caches_texture() {
        let dir = tempfile::tempdir().unwrap();
        let image = image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]));
        write_png(dir.path(), "grass.png", &image);

        let mut store = ContentStore::new(dir.path());
        let a = store.texture("grass.png").unwrap();
        assert_eq!((a.width, a.height), (4, 2));
        assert_eq!(&a.pixels[..4], &[10, 20, 30, 255]);

        let b = store.texture("grass.png").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.cached_textures(), 1);
    }

    #[test]
    fn missing_asset_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ContentStore::new(dir.path());
        assert!(matches!(
            store.texture("missing.png"),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn rejects_names_outside_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStore::new(dir.path());
        for name in ["../secret.png", "/etc/passwd", ""] {
            assert!(matches!(
                store.resolve(name),
                Err(AssetError::InvalidName(_))
            ));
        }
    }

    #[test]
    fn undecodable_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.png"), b"not a png").unwrap();
        let mut store = ContentStore::new(dir.path());
        assert!(matches!(
            store.texture("bad.png"),
            Err(AssetError::Decode { .. })
        ));
    }

    #[test]
    fn heightmap_scales_luma() {
        let dir = tempfile::tempdir().unwrap();
        let image = image::RgbaImage::from_fn(3, 2, |x, _| {
            if x == 2 {
                image::Rgba([255, 255, 255, 255])
            } else {
                image::Rgba([0, 0, 0, 255])
            }
        });
        write_png(dir.path(), "hills.png", &image);

        let field = ContentStore::new(dir.path())
            .heightmap("hills.png", 8.0)
            .unwrap();
        assert_eq!((field.width(), field.height()), (3, 2));
        assert_eq!(field.get(0, 0), Some(0.0));
        assert_eq!(field.get(2, 1), Some(8.0));
    }

    #[test]
    fn tiny_heightmap_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_png(
            dir.path(),
            "dot.png",
            &image::RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 255])),
        );
        assert!(matches!(
            ContentStore::new(dir.path()).heightmap("dot.png", 1.0),
            Err(AssetError::Terrain { .. })
        ));
    }

    #[test]
    fn checkerboard_alternates() {
        let tex = TextureData::checkerboard(8, 2);
        assert_eq!(tex.pixels.len(), 8 * 8 * 4);
        let texel = |x: u32, y: u32| {
            let i = ((y * 8 + x) * 4) as usize;
            tex.pixels[i..i + 4].to_vec()
        };
        assert_eq!(texel(0, 0), texel(5, 5));
        assert_ne!(texel(0, 0), texel(4, 0));
    }

    #[test]
    fn mip_chain_halves_to_one() {
        let tex = TextureData::checkerboard(8, 2);
        let sizes: Vec<_> = tex.mip_chain().iter().map(|m| (m.width, m.height)).collect();
        assert_eq!(sizes, [(8, 8), (4, 4), (2, 2), (1, 1)]);
    }
}
