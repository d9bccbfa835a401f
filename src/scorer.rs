//! Frequency-domain convolution of histogram features against a filter bank.
//!
//! The score surface is
//! `H = Σ_c real(ifft2(fft2(feature_c) ⊙ filter_c)) + bias`,
//! one circular 2D convolution per channel via the multiplication theorem.
//! Channel products are summed in the frequency domain, so a single inverse
//! transform per batch element suffices. Only the real part is kept; for
//! real-valued, circularly consistent inputs the imaginary part is noise.
use crate::error::EstimateError;
use crate::fft::{r2c, Fft2};
use crate::tensor::{FeatureBatch, SurfaceBatch};
use rayon::prelude::*;
use rustfft::num_complex::Complex;

/// Learned frequency-domain filters plus a real bias surface.
///
/// Filter planes share the `[batch, channels, n, n]` planar layout of
/// `FeatureBatch`. Both arrive already materialized from the model owner;
/// this crate never trains or persists them.
#[derive(Clone, Debug)]
pub struct FilterBank {
    batch: usize,
    channels: usize,
    n: usize,
    filters: Vec<Complex<f32>>,
    bias: SurfaceBatch,
}

impl FilterBank {
    /// Validates buffer lengths and the bias shape against the declared
    /// dimensions; fails with `ShapeMismatch` on any disagreement.
    pub fn new(
        batch: usize,
        channels: usize,
        n: usize,
        filters: Vec<Complex<f32>>,
        bias: SurfaceBatch,
    ) -> Result<Self, EstimateError> {
        let expected = batch * channels * n * n;
        if filters.len() != expected {
            return Err(EstimateError::ShapeMismatch {
                context: "FilterBank::new: filter buffer length",
                expected,
                actual: filters.len(),
            });
        }
        if bias.batch != batch {
            return Err(EstimateError::ShapeMismatch {
                context: "FilterBank::new: bias batch size",
                expected: batch,
                actual: bias.batch,
            });
        }
        if bias.n != n {
            return Err(EstimateError::ShapeMismatch {
                context: "FilterBank::new: bias grid size",
                expected: n,
                actual: bias.n,
            });
        }
        Ok(Self {
            batch,
            channels,
            n,
            filters,
            bias,
        })
    }

    #[inline]
    pub fn batch(&self) -> usize {
        self.batch
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn bias(&self) -> &SurfaceBatch {
        &self.bias
    }

    #[inline]
    fn plane(&self, b: usize, c: usize) -> &[Complex<f32>] {
        let len = self.n * self.n;
        let start = (b * self.channels + c) * len;
        &self.filters[start..start + len]
    }
}

/// Scores a feature batch against the filter bank.
///
/// Fails with `ShapeMismatch` unless batch size, grid size and channel count
/// all agree. Batch elements are scored in parallel.
pub fn eval_features(
    features: &FeatureBatch,
    bank: &FilterBank,
) -> Result<SurfaceBatch, EstimateError> {
    if features.batch != bank.batch() {
        return Err(EstimateError::ShapeMismatch {
            context: "eval_features: batch size",
            expected: bank.batch(),
            actual: features.batch,
        });
    }
    if features.n != bank.size() {
        return Err(EstimateError::ShapeMismatch {
            context: "eval_features: grid size",
            expected: bank.size(),
            actual: features.n,
        });
    }
    if features.channels != bank.channels() {
        return Err(EstimateError::ShapeMismatch {
            context: "eval_features: channel count",
            expected: bank.channels(),
            actual: features.channels,
        });
    }

    let n = features.n;
    let plan = Fft2::new(n);
    let slices: Vec<Vec<f32>> = (0..features.batch)
        .into_par_iter()
        .map(|b| {
            let mut acc = vec![Complex::new(0.0f32, 0.0); n * n];
            for c in 0..features.channels {
                let mut plane = r2c(features.plane(b, c));
                plan.forward(&mut plane);
                for (a, (x, f)) in acc.iter_mut().zip(plane.iter().zip(bank.plane(b, c))) {
                    *a += x * f;
                }
            }
            plan.inverse(&mut acc);
            acc.iter()
                .zip(bank.bias().slice(b))
                .map(|(z, &bias)| z.re + bias)
                .collect()
        })
        .collect();

    let mut out = SurfaceBatch::new(features.batch, n);
    for (b, slice) in slices.into_iter().enumerate() {
        out.slice_mut(b).copy_from_slice(&slice);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn feature_batch(n: usize, values: &[f32]) -> FeatureBatch {
        let surface = SurfaceBatch::from_vec(1, n, values.to_vec()).expect("square input");
        FeatureBatch::from_channels(&[surface]).expect("one channel")
    }

    #[test]
    fn identity_filter_reproduces_the_feature() {
        // an all-ones spectrum is the FFT of a delta kernel, i.e. identity
        let n = 4;
        let values: Vec<f32> = (0..n * n).map(|i| (i as f32) * 0.01).collect();
        let features = feature_batch(n, &values);

        let filters = vec![Complex::new(1.0f32, 0.0); n * n];
        let mut bias = SurfaceBatch::new(1, n);
        bias.slice_mut(0)[5] = 0.5;
        let bank = FilterBank::new(1, 1, n, filters, bias).expect("shapes agree");

        let scores = eval_features(&features, &bank).expect("matching shapes");
        for (i, (&got, &want)) in scores.slice(0).iter().zip(&values).enumerate() {
            let want = if i == 5 { want + 0.5 } else { want };
            assert!(approx_eq(got, want), "index {i}: {got} vs {want}");
        }
    }

    #[test]
    fn channels_sum_into_one_surface() {
        let n = 4;
        let a = SurfaceBatch::from_vec(1, n, vec![0.25; n * n]).expect("square");
        let b = SurfaceBatch::from_vec(1, n, vec![0.75; n * n]).expect("square");
        let features = FeatureBatch::from_channels(&[a, b]).expect("two channels");

        let filters = vec![Complex::new(1.0f32, 0.0); 2 * n * n];
        let bank =
            FilterBank::new(1, 2, n, filters, SurfaceBatch::new(1, n)).expect("shapes agree");

        let scores = eval_features(&features, &bank).expect("matching shapes");
        for &v in scores.slice(0) {
            assert!(approx_eq(v, 1.0), "{v}");
        }
    }

    #[test]
    fn shape_mismatches_fail_fast() {
        let n = 4;
        let features = feature_batch(n, &vec![0.0; n * n]);
        let bank = FilterBank::new(1, 2, n, vec![Complex::new(0.0, 0.0); 2 * n * n],
            SurfaceBatch::new(1, n))
        .expect("shapes agree");
        let err = eval_features(&features, &bank).unwrap_err();
        assert!(matches!(err, EstimateError::ShapeMismatch { .. }));

        let err = FilterBank::new(1, 1, n, vec![Complex::new(0.0, 0.0); 3], SurfaceBatch::new(1, n))
            .unwrap_err();
        assert!(matches!(err, EstimateError::ShapeMismatch { .. }));
    }
}
