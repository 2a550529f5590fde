//! Per-cell terrain elevation and fluid volume.

use serde::{Deserialize, Serialize};

use super::error::FluidError;

/// Ground elevation and fluid volume over a fixed `width x height` domain.
///
/// Both arrays are row-major (`y * width + x`). The solver reads
/// `ground_height` but never writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluidGrid {
    pub width: usize,
    pub height: usize,
    pub ground_height: Vec<f64>,
    pub volume: Vec<f64>,
    /// Bumped on every elevation write so consumers can detect terrain edits.
    pub ground_revision: u64,
}

impl FluidGrid {
    /// # Panics
    /// If either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Ok(grid) => grid,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(width: usize, height: usize) -> Result<Self, FluidError> {
        if width == 0 || height == 0 {
            return Err(FluidError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            ground_height: vec![0.0; width * height],
            volume: vec![0.0; width * height],
            ground_revision: 0,
        })
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Row-major index of `(x, y)`.
    ///
    /// # Panics
    /// If `(x, y)` is outside the grid. A plain `y * width + x` would silently
    /// alias into the next row for `x >= width`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            self.in_bounds(x, y),
            "cell ({x}, {y}) out of bounds for {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }

    pub fn checked_index(&self, x: usize, y: usize) -> Result<usize, FluidError> {
        if self.in_bounds(x, y) {
            Ok(y * self.width + x)
        } else {
            Err(FluidError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Whether `(x, y)` lies on the outermost one-cell border.
    #[inline]
    pub fn is_ring(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    #[inline]
    pub fn water_level(&self, x: usize, y: usize) -> f64 {
        let idx = self.index(x, y);
        self.ground_height[idx] + self.volume[idx]
    }

    #[inline]
    pub fn ground_level(&self, x: usize, y: usize) -> f64 {
        self.ground_height[self.index(x, y)]
    }

    #[inline]
    pub fn volume_at(&self, x: usize, y: usize) -> f64 {
        self.volume[self.index(x, y)]
    }

    pub fn set_ground_height(&mut self, x: usize, y: usize, height: f64) {
        let idx = self.index(x, y);
        self.ground_height[idx] = height;
        self.ground_revision = self.ground_revision.wrapping_add(1);
    }

    /// Add `amount` (possibly negative) to a single cell.
    pub fn add(&mut self, x: usize, y: usize, amount: f64) {
        let idx = self.index(x, y);
        self.volume[idx] += amount;
    }

    pub fn total_volume(&self) -> f64 {
        self.volume.iter().sum()
    }

    /// Volume held by cells the apply stage may write.
    pub fn interior_volume(&self) -> f64 {
        let mut total = 0.0;
        for y in 1..self.height.saturating_sub(1) {
            for x in 1..self.width.saturating_sub(1) {
                total += self.volume[y * self.width + x];
            }
        }
        total
    }

    pub fn ring_volume(&self) -> f64 {
        self.total_volume() - self.interior_volume()
    }

    pub fn clear_volume(&mut self) {
        self.volume.iter_mut().for_each(|v| *v = 0.0);
    }
}
