use crate::MeshError;

/// Fixed-size grid of elevations, immutable after construction.
///
/// Samples are stored row-major: the elevation at `(x, y)` lives at
/// `x + y * width`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    width: u32,
    height: u32,
    elevations: Vec<f32>,
}

impl HeightField {
    /// An all-zero (flat) heightfield.
    pub fn flat(width: u32, height: u32) -> Result<Self, MeshError> {
        Self::from_fn(width, height, |_, _| 0.0)
    }

    /// Build a heightfield by sampling `f(x, y)` for every grid point.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> f32,
    ) -> Result<Self, MeshError> {
        check_dimensions(width, height)?;
        let mut elevations = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                elevations.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            elevations,
        })
    }

    /// Wrap a row-major elevation vector.
    pub fn from_elevations(
        width: u32,
        height: u32,
        elevations: Vec<f32>,
    ) -> Result<Self, MeshError> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if elevations.len() != expected {
            return Err(MeshError::SampleCount {
                expected,
                actual: elevations.len(),
            });
        }
        Ok(Self {
            width,
            height,
            elevations,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Elevation at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.elevations[self.index(x, y)])
        } else {
            None
        }
    }

    /// Elevation at `(x, y)` with coordinates clamped to the grid edge.
    pub fn sample_clamped(&self, x: i64, y: i64) -> f32 {
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.elevations[self.index(cx, cy)]
    }

    /// Lowest and highest elevation.
    pub fn range(&self) -> (f32, f32) {
        self.elevations
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }

    pub fn elevations(&self) -> &[f32] {
        &self.elevations
    }

    fn index(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.width as usize
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), MeshError> {
    if width < 2 || height < 2 {
        return Err(MeshError::TooSmall { width, height });
    }
    let count = width as u64 * height as u64;
    if count > u32::MAX as u64 {
        return Err(MeshError::TooLarge { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_is_all_zero() {
        let field = HeightField::flat(4, 3).unwrap();
        assert_eq!(field.elevations().len(), 12);
        assert!(field.elevations().iter().all(|&h| h == 0.0));
        assert_eq!(field.range(), (0.0, 0.0));
    }

    #[test]
    fn from_fn_is_row_major() {
        let field = HeightField::from_fn(3, 2, |x, y| (x + 10 * y) as f32).unwrap();
        assert_eq!(field.elevations(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(field.get(2, 1), Some(12.0));
        assert_eq!(field.get(3, 0), None);
        assert_eq!(field.get(0, 2), None);
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert_eq!(
            HeightField::flat(1, 5),
            Err(MeshError::TooSmall {
                width: 1,
                height: 5
            })
        );
        assert!(HeightField::flat(5, 0).is_err());
    }

    #[test]
    fn rejects_wrong_sample_count() {
        let err = HeightField::from_elevations(2, 2, vec![0.0; 3]).unwrap_err();
        assert_eq!(
            err,
            MeshError::SampleCount {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn clamped_sampling_at_edges() {
        let field = HeightField::from_fn(2, 2, |x, y| (x + 2 * y) as f32).unwrap();
        assert_eq!(field.sample_clamped(-1, 0), 0.0);
        assert_eq!(field.sample_clamped(5, 5), 3.0);
    }
}
