//! Softmax normalization of score surfaces into probability mass functions.
use crate::tensor::SurfaceBatch;
use crate::EPS;

/// Numerically stable softmax over each flattened score surface.
///
/// The per-slice maximum is subtracted before exponentiation, so arbitrarily
/// large scores normalize without overflow. Every output slice is
/// non-negative and sums to 1 up to floating-point rounding.
pub fn softmax2(scores: &SurfaceBatch) -> SurfaceBatch {
    let mut out = scores.clone();
    for b in 0..out.batch {
        let slice = out.slice_mut(b);
        let max = slice.iter().fold(f32::NEG_INFINITY, |m, &v| m.max(v));
        let mut total = 0.0f32;
        for v in slice.iter_mut() {
            *v = (*v - max).exp();
            total += *v;
        }
        let total = total.max(EPS);
        for v in slice.iter_mut() {
            *v /= total;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn output_sums_to_one() {
        let scores = SurfaceBatch::from_vec(2, 2, vec![0.0, 1.0, 2.0, 3.0, -5.0, 0.0, 5.0, 10.0])
            .expect("square input");
        let pmf = softmax2(&scores);
        for b in 0..2 {
            let total: f32 = pmf.slice(b).iter().sum();
            assert!(approx_eq(total, 1.0), "batch {b}: {total}");
            assert!(pmf.slice(b).iter().all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn large_magnitudes_do_not_overflow() {
        // naive exp(1000) overflows f32; max subtraction keeps this finite
        let scores =
            SurfaceBatch::from_vec(1, 2, vec![1000.0, 999.0, 998.0, 0.0]).expect("square input");
        let pmf = softmax2(&scores);
        assert!(pmf.data.iter().all(|v| v.is_finite()));
        let total: f32 = pmf.slice(0).iter().sum();
        assert!(approx_eq(total, 1.0));
        assert!(pmf.at(0, 0, 0) > pmf.at(0, 0, 1));
    }

    #[test]
    fn uniform_scores_yield_a_uniform_pmf() {
        let scores = SurfaceBatch::from_vec(1, 4, vec![3.25; 16]).expect("square input");
        let pmf = softmax2(&scores);
        for &v in pmf.slice(0) {
            assert!(approx_eq(v, 1.0 / 16.0));
        }
    }
}
