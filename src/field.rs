// The intensity field: accumulated heat per surface pixel.

use crate::error::Error;

/// Heat values in [0, 1], row-major, exactly `width * height` cells.
pub struct IntensityField {
    width: usize,
    height: usize,
    cells: Vec<f32>,
}

impl IntensityField {
    /// Fresh all-zero field for a surface of the given size.
    ///
    /// A resize goes through here too: the old field is dropped, never rescaled.
    pub fn allocate(width: usize, height: usize) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(Error::Allocation { width, height })?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| Error::Allocation { width, height })?;
        cells.resize(len, 0.0);

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Zero every cell in place.
    pub fn clear(&mut self) {
        self.cells.fill(0.0);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Value at (x, y), or `None` outside the surface.
    pub fn get(&self, x: i64, y: i64) -> Option<f32> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Add `delta` at (x, y), saturating at 1.0.
    /// Off-surface coordinates and non-positive deltas are ignored.
    #[inline]
    pub fn accumulate(&mut self, x: i64, y: i64, delta: f32) {
        if !delta.is_finite() || delta <= 0.0 {
            return;
        }
        if let Some(idx) = self.index(x, y) {
            let v = self.cells[idx] + delta;
            self.cells[idx] = if v > 1.0 { 1.0 } else { v };
        }
    }
}
