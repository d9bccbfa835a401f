//! Non-uniform 1D splatting for auxiliary scalar features.
//!
//! A scalar is distributed over its two nearest bins of an irregular 1D grid
//! by linear interpolation. Unlike the 2D chroma grid this axis is linear:
//! values outside the bin range clamp to the endpoints instead of wrapping.
use crate::error::EstimateError;
use crate::EPS;

/// Splat each value onto a strictly increasing bin vector.
///
/// Returns one dense weight row of length `bins.len()` per input value, with
/// at most two nonzero entries. The weights sum to 1 and reconstruct the
/// clamped value under linear interpolation against the bin centers.
///
/// Fails with `InvalidInput` when `bins` is empty or not strictly increasing.
pub fn splat_non_uniform(values: &[f32], bins: &[f32]) -> Result<Vec<Vec<f32>>, EstimateError> {
    if bins.is_empty() {
        return Err(EstimateError::InvalidInput {
            context: "splat_non_uniform: empty bin vector",
        });
    }
    if bins.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(EstimateError::InvalidInput {
            context: "splat_non_uniform: bins must be strictly increasing",
        });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(EstimateError::InvalidInput {
            context: "splat_non_uniform: non-finite value",
        });
    }

    let lo_val = bins[0];
    let hi_val = bins[bins.len() - 1];
    let rows = values
        .iter()
        .map(|&value| {
            let x = value.clamp(lo_val, hi_val);
            let nearest = nearest_bin(bins, x);
            // pair the nearest bin with its neighbor on the side of x
            let (lo, hi) = if x >= bins[nearest] {
                (nearest, (nearest + 1).min(bins.len() - 1))
            } else {
                (nearest - 1, nearest)
            };

            let span = (bins[hi] - bins[lo]).max(EPS);
            let w_hi = (x - bins[lo]) / span;
            let mut row = vec![0.0f32; bins.len()];
            row[lo] += 1.0 - w_hi;
            row[hi] += w_hi;
            row
        })
        .collect();
    Ok(rows)
}

/// Index of the bin closest to `x`, ties resolved to the lower index.
fn nearest_bin(bins: &[f32], x: f32) -> usize {
    let mut best = 0usize;
    let mut best_dist = f32::INFINITY;
    for (i, &b) in bins.iter().enumerate() {
        let dist = (b - x).abs();
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn halfway_between_uneven_bins() {
        let rows = splat_non_uniform(&[0.75], &[0.0, 0.5, 1.0]).expect("valid bins");
        assert_eq!(rows.len(), 1);
        assert!(approx_eq(rows[0][0], 0.0));
        assert!(approx_eq(rows[0][1], 0.5));
        assert!(approx_eq(rows[0][2], 0.5));
    }

    #[test]
    fn weights_reconstruct_the_value() {
        let bins = [-2.0f32, -0.5, 0.1, 3.0];
        for &x in &[-1.7, -0.5, 0.0, 0.09, 2.2] {
            let rows = splat_non_uniform(&[x], &bins).expect("valid bins");
            let total: f32 = rows[0].iter().sum();
            let recon: f32 = rows[0].iter().zip(&bins).map(|(w, b)| w * b).sum();
            assert!(approx_eq(total, 1.0), "weights for {x} sum to {total}");
            assert!(approx_eq(recon, x), "reconstructed {recon} from {x}");
            assert!(rows[0].iter().filter(|&&w| w != 0.0).count() <= 2);
        }
    }

    #[test]
    fn out_of_range_values_clamp_to_the_endpoints() {
        let bins = [0.0f32, 0.5, 1.0];
        let rows = splat_non_uniform(&[-3.0, 7.0], &bins).expect("valid bins");
        assert!(approx_eq(rows[0][0], 1.0));
        assert!(approx_eq(rows[1][2], 1.0));
    }

    #[test]
    fn rejects_unsorted_bins() {
        let err = splat_non_uniform(&[0.5], &[0.0, 1.0, 1.0]).unwrap_err();
        assert!(matches!(err, EstimateError::InvalidInput { .. }));
        let err = splat_non_uniform(&[0.5], &[]).unwrap_err();
        assert!(matches!(err, EstimateError::InvalidInput { .. }));
    }

    #[test]
    fn single_bin_takes_all_the_weight() {
        let rows = splat_non_uniform(&[0.3], &[1.5]).expect("valid bins");
        assert!(approx_eq(rows[0][0], 1.0));
    }
}
