//! Owned batch of square 2D surfaces: raw histograms, score surfaces, PMFs.
//!
//! Logical shape is `[batch, n, n]`. Row index is the v chroma bin, column
//! index is the u chroma bin. The grid is toroidal: indices 0 and n−1 are
//! adjacent neighbors, not boundary endpoints.
use crate::error::EstimateError;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct SurfaceBatch {
    /// Number of batch elements
    pub batch: usize,
    /// Grid size per axis
    pub n: usize,
    /// Backing storage, `batch * n * n` values in row-major order
    pub data: Vec<f32>,
}

impl SurfaceBatch {
    /// Construct a zero-initialized batch of `n × n` surfaces.
    pub fn new(batch: usize, n: usize) -> Self {
        Self {
            batch,
            n,
            data: vec![0.0; batch * n * n],
        }
    }

    /// Wrap an existing buffer; its length must match the dimensions.
    pub fn from_vec(batch: usize, n: usize, data: Vec<f32>) -> Result<Self, EstimateError> {
        let expected = batch * n * n;
        if data.len() != expected {
            return Err(EstimateError::ShapeMismatch {
                context: "SurfaceBatch::from_vec: buffer length",
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { batch, n, data })
    }

    #[inline]
    /// Row-major `n * n` slice of one batch element.
    pub fn slice(&self, b: usize) -> &[f32] {
        let len = self.n * self.n;
        &self.data[b * len..(b + 1) * len]
    }

    #[inline]
    /// Mutable row-major slice of one batch element.
    pub fn slice_mut(&mut self, b: usize) -> &mut [f32] {
        let len = self.n * self.n;
        &mut self.data[b * len..(b + 1) * len]
    }

    #[inline]
    /// Value at (batch, row, column) = (b, v-bin, u-bin).
    pub fn at(&self, b: usize, row: usize, col: usize) -> f32 {
        self.data[(b * self.n + row) * self.n + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_addresses_one_element() {
        let mut batch = SurfaceBatch::new(2, 3);
        batch.slice_mut(1)[4] = 7.0;
        assert_eq!(batch.at(1, 1, 1), 7.0);
        assert!(batch.slice(0).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn from_vec_checks_length() {
        let err = SurfaceBatch::from_vec(1, 3, vec![0.0; 8]).unwrap_err();
        assert!(matches!(err, EstimateError::ShapeMismatch { .. }));
    }
}
