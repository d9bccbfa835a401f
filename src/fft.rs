//! Planned 2D complex FFTs over square grids.
//!
//! rustfft supplies 1D transforms; the 2D transform is a row pass, a
//! transpose, a second row pass, and a transpose back, so the forward and
//! inverse directions traverse the axes in the same order. rustfft leaves
//! the inverse unscaled, so `inverse` normalizes by `1/(n·n)` to make
//! forward → inverse the identity.
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Forward and inverse transform plans for one grid size.
pub struct Fft2 {
    n: usize,
    fwd: Arc<dyn Fft<f32>>,
    inv: Arc<dyn Fft<f32>>,
}

impl Fft2 {
    pub fn new(n: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            n,
            fwd: planner.plan_fft_forward(n),
            inv: planner.plan_fft_inverse(n),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    /// In-place 2D forward transform of a row-major `n·n` plane.
    pub fn forward(&self, plane: &mut [Complex<f32>]) {
        self.pass(plane, true);
    }

    /// In-place 2D inverse transform, normalized by `1/(n·n)`.
    pub fn inverse(&self, plane: &mut [Complex<f32>]) {
        self.pass(plane, false);
        let scale = 1.0 / (self.n * self.n) as f32;
        for value in plane.iter_mut() {
            *value *= scale;
        }
    }

    fn pass(&self, plane: &mut [Complex<f32>], forward: bool) {
        debug_assert_eq!(plane.len(), self.n * self.n);
        let fft = if forward { &self.fwd } else { &self.inv };
        for row in plane.chunks_exact_mut(self.n) {
            fft.process(row);
        }
        transpose(plane, self.n);
        for row in plane.chunks_exact_mut(self.n) {
            fft.process(row);
        }
        transpose(plane, self.n);
    }
}

fn transpose(plane: &mut [Complex<f32>], n: usize) {
    for i in 0..n {
        for j in (i + 1)..n {
            plane.swap(i * n + j, j * n + i);
        }
    }
}

/// Real plane → complex plane with zero imaginary parts.
pub fn r2c(plane: &[f32]) -> Vec<Complex<f32>> {
    plane.iter().map(|&x| Complex::new(x, 0.0)).collect()
}

/// Real parts of a complex plane.
pub fn c2r(plane: &[Complex<f32>]) -> Vec<f32> {
    plane.iter().map(|z| z.re).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn delta_transforms_to_a_flat_spectrum() {
        let n = 4;
        let plan = Fft2::new(n);
        let mut plane = vec![Complex::new(0.0f32, 0.0); n * n];
        plane[0] = Complex::new(1.0, 0.0);
        plan.forward(&mut plane);
        for z in &plane {
            assert!(approx_eq(z.re, 1.0) && approx_eq(z.im, 0.0), "{z:?}");
        }
    }

    #[test]
    fn forward_inverse_round_trips() {
        let n = 8;
        let plan = Fft2::new(n);
        let original: Vec<f32> = (0..n * n).map(|i| ((i * 7 + 3) % 11) as f32 * 0.1).collect();
        let mut plane = r2c(&original);
        plan.forward(&mut plane);
        plan.inverse(&mut plane);
        for (z, &x) in plane.iter().zip(&original) {
            assert!(approx_eq(z.re, x), "{} vs {}", z.re, x);
            assert!(approx_eq(z.im, 0.0));
        }
    }

    #[test]
    fn frequency_product_is_circular_convolution() {
        // convolving with a one-pixel shift kernel rotates the plane with
        // wrap-around, which is exactly the circular boundary the scorer needs
        let n = 4;
        let plan = Fft2::new(n);
        let signal: Vec<f32> = (0..n * n).map(|i| i as f32).collect();
        let mut kernel = vec![0.0f32; n * n];
        kernel[1] = 1.0; // shift by one column

        let mut sig_fft = r2c(&signal);
        let mut ker_fft = r2c(&kernel);
        plan.forward(&mut sig_fft);
        plan.forward(&mut ker_fft);
        for (s, k) in sig_fft.iter_mut().zip(&ker_fft) {
            *s *= k;
        }
        plan.inverse(&mut sig_fft);

        let shifted = c2r(&sig_fft);
        for row in 0..n {
            for col in 0..n {
                let src = row * n + (col + n - 1) % n;
                assert!(
                    approx_eq(shifted[row * n + col], signal[src]),
                    "row {row} col {col}"
                );
            }
        }
    }
}
