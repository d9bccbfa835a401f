#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod colorspace;
pub mod config;
pub mod error;
pub mod estimator;
pub mod tensor;

// Pipeline stages – public so callers can run partial chains (e.g. a
// training loop that stops at the feature tensor or the label PMF).
pub mod edges;
pub mod fft;
pub mod histogram;
pub mod label;
pub mod pmf;
pub mod rescale;
pub mod scorer;
pub mod splat;
pub mod torus;

// --- High-level re-exports -------------------------------------------------

pub use crate::config::BinGrid;
pub use crate::error::EstimateError;
pub use crate::estimator::{Estimate, EstimationReport, IlluminantEstimator};
pub use crate::scorer::FilterBank;
pub use crate::tensor::{FeatureBatch, RgbBatch, SurfaceBatch};

/// Floor applied to every guarded division and logarithm in the pipeline.
///
/// Applied consistently, not best-effort: a NaN or Inf escaping one stage
/// corrupts the FFT and moment computations for the whole batch element.
pub const EPS: f32 = 1e-9;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use illuminant_estimator::prelude::*;
/// use rustfft::num_complex::Complex;
///
/// # fn main() -> Result<(), illuminant_estimator::EstimateError> {
/// let grid = BinGrid::default();
/// let n = grid.nbins;
/// let filters = vec![Complex::new(0.0f32, 0.0); 2 * n * n];
/// let bank = FilterBank::new(1, 2, n, filters, SurfaceBatch::new(1, n))?;
///
/// let estimator = IlluminantEstimator::new(grid, bank)?;
/// let report = estimator.estimate(&RgbBatch::new(1, 480, 640))?;
/// println!("latency_ms={:.3}", report.latency_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::tensor::{FeatureBatch, RgbBatch, SurfaceBatch};
    pub use crate::{BinGrid, Estimate, EstimateError, FilterBank, IlluminantEstimator};
}
