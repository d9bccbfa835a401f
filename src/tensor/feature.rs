//! Multi-channel histogram feature batch.
//!
//! Logical shape is `[batch, n, n, channels]`; storage is planar: one
//! contiguous row-major `n * n` plane per (batch element, channel), channels
//! ordered within each element. Planar planes feed the per-channel 2D FFT
//! without strided access.
use super::SurfaceBatch;
use crate::error::EstimateError;

#[derive(Clone, Debug)]
pub struct FeatureBatch {
    /// Number of batch elements
    pub batch: usize,
    /// Number of feature channels per element
    pub channels: usize,
    /// Grid size per axis
    pub n: usize,
    /// Backing storage, `batch * channels * n * n` values
    pub data: Vec<f32>,
}

impl FeatureBatch {
    /// Concatenate single-channel surface batches along the channel axis.
    ///
    /// All inputs must agree in batch size and grid size.
    pub fn from_channels(channels: &[SurfaceBatch]) -> Result<Self, EstimateError> {
        let first = channels.first().ok_or(EstimateError::InvalidInput {
            context: "FeatureBatch::from_channels: no channels given",
        })?;
        for ch in channels {
            if ch.batch != first.batch {
                return Err(EstimateError::ShapeMismatch {
                    context: "FeatureBatch::from_channels: batch size",
                    expected: first.batch,
                    actual: ch.batch,
                });
            }
            if ch.n != first.n {
                return Err(EstimateError::ShapeMismatch {
                    context: "FeatureBatch::from_channels: grid size",
                    expected: first.n,
                    actual: ch.n,
                });
            }
        }

        let mut data = Vec::with_capacity(first.batch * channels.len() * first.n * first.n);
        for b in 0..first.batch {
            for ch in channels {
                data.extend_from_slice(ch.slice(b));
            }
        }
        Ok(Self {
            batch: first.batch,
            channels: channels.len(),
            n: first.n,
            data,
        })
    }

    #[inline]
    /// Row-major `n * n` plane of one (batch element, channel) pair.
    pub fn plane(&self, b: usize, c: usize) -> &[f32] {
        let len = self.n * self.n;
        let start = (b * self.channels + c) * len;
        &self.data[start..start + len]
    }
}
