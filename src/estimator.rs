//! End-to-end illuminant estimation over an RGB batch.
use crate::config::BinGrid;
use crate::error::EstimateError;
use crate::histogram::featurize;
use crate::pmf::softmax2;
use crate::rescale::idx_to_uv;
use crate::scorer::{eval_features, FilterBank};
use crate::tensor::RgbBatch;
use crate::torus::fit_bivariate;
use log::debug;
use nalgebra::{Matrix2, Vector2};
use serde::Serialize;
use std::time::Instant;

/// Illuminant estimate for one batch element, in physical log-UV units.
#[derive(Clone, Debug, Serialize)]
pub struct Estimate {
    /// White point (u, v)
    pub mu: Vector2<f32>,
    /// Uncertainty covariance, `[[var_u, cov], [cov, var_v]]`
    pub sigma: Matrix2<f32>,
}

/// Batch result with wall-clock latency.
#[derive(Clone, Debug, Serialize)]
pub struct EstimationReport {
    pub estimates: Vec<Estimate>,
    pub latency_ms: f64,
}

/// Scores chroma histograms against a trained filter bank and fits the
/// illuminant posterior on the toroidal grid.
///
/// The grid config and the filter bank are loaded once by the caller and
/// treated as read-only for the lifetime of the estimator.
#[derive(Debug)]
pub struct IlluminantEstimator {
    grid: BinGrid,
    filters: FilterBank,
}

impl IlluminantEstimator {
    /// Fails with `ShapeMismatch` when the filter bank's grid size differs
    /// from the histogram configuration.
    pub fn new(grid: BinGrid, filters: FilterBank) -> Result<Self, EstimateError> {
        if filters.size() != grid.nbins {
            return Err(EstimateError::ShapeMismatch {
                context: "IlluminantEstimator::new: filter bank grid size",
                expected: grid.nbins,
                actual: filters.size(),
            });
        }
        Ok(Self { grid, filters })
    }

    #[inline]
    pub fn grid(&self) -> &BinGrid {
        &self.grid
    }

    /// Runs the full chain: featurize → score → softmax → moment fit →
    /// rescale to physical UV units.
    pub fn estimate(&self, rgb: &RgbBatch) -> Result<EstimationReport, EstimateError> {
        let t0 = Instant::now();

        let features = featurize(rgb, &self.grid)?;
        let scores = eval_features(&features, &self.filters)?;
        let pmf = softmax2(&scores);
        let moments = fit_bivariate(&pmf)?;

        let (mu_idx, sigma_idx): (Vec<_>, Vec<_>) =
            moments.into_iter().map(|m| (m.mu, m.sigma)).unzip();
        let (mu, sigma) = idx_to_uv(&mu_idx, &sigma_idx, self.grid.bin_size, self.grid.first_bin)?;

        let latency_ms = t0.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "IlluminantEstimator: {} element(s), {}x{} px, {:.3} ms",
            rgb.batch, rgb.w, rgb.h, latency_ms
        );

        let estimates = mu
            .into_iter()
            .zip(sigma)
            .map(|(mu, sigma)| Estimate { mu, sigma })
            .collect();
        Ok(EstimationReport {
            estimates,
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::SurfaceBatch;
    use rustfft::num_complex::Complex;

    #[test]
    fn grid_and_filter_bank_must_agree() {
        let grid = BinGrid {
            first_bin: -1.0,
            bin_size: 0.125,
            nbins: 16,
        };
        let bank = FilterBank::new(1, 2, 8, vec![Complex::new(0.0, 0.0); 2 * 64],
            SurfaceBatch::new(1, 8))
        .expect("shapes agree");
        let err = IlluminantEstimator::new(grid, bank).unwrap_err();
        assert!(matches!(err, EstimateError::ShapeMismatch { .. }));
    }

    #[test]
    fn batch_size_mismatch_fails_the_call() {
        let grid = BinGrid {
            first_bin: -1.0,
            bin_size: 0.125,
            nbins: 8,
        };
        let bank = FilterBank::new(2, 2, 8, vec![Complex::new(0.0, 0.0); 2 * 2 * 64],
            SurfaceBatch::new(2, 8))
        .expect("shapes agree");
        let estimator = IlluminantEstimator::new(grid, bank).expect("matching grid");

        let rgb = RgbBatch::new(1, 4, 4);
        let err = estimator.estimate(&rgb).unwrap_err();
        assert!(matches!(err, EstimateError::ShapeMismatch { .. }));
    }
}
