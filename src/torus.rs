//! Circular statistics on the toroidal histogram grid.
//!
//! Means are circular means (atan2 of expected sine/cosine of the bin
//! angles), deviations are signed wrapped distances. Euclidean formulas are
//! a correctness bug here: a PMF split across the wrap boundary must average
//! to the boundary, not to the middle of the grid.
use crate::error::EstimateError;
use crate::tensor::SurfaceBatch;
use nalgebra::{Matrix2, Vector2};
use serde::Serialize;
use std::f32::consts::TAU;

/// Tolerance on each PMF slice's total mass.
const MASS_TOL: f32 = 1e-4;

/// First and second circular moments of one PMF slice, in index space.
///
/// `mu` is (u, v); `sigma` is `[[var_u, cov], [cov, var_v]]`. `sigma` is
/// symmetric by construction; the moment estimator does not enforce positive
/// semi-definiteness, so near-degenerate slices can violate it numerically.
#[derive(Clone, Debug, Serialize)]
pub struct TorusMoments {
    pub mu: Vector2<f32>,
    pub sigma: Matrix2<f32>,
}

/// Signed shortest-path distance from `x` to `center` on a ring of size `n`.
#[inline]
pub fn wrapped_delta(x: f32, center: f32, n: f32) -> f32 {
    (x - center + 0.5 * n).rem_euclid(n) - 0.5 * n
}

/// Fits a wrapped bivariate distribution to every slice of a PMF batch.
///
/// Fails with `InvariantViolation` when a slice's mass deviates from 1 by
/// more than `1e-4`; this is a precondition check on the caller, not a
/// recoverable state.
pub fn fit_bivariate(pmf: &SurfaceBatch) -> Result<Vec<TorusMoments>, EstimateError> {
    let n = pmf.n;
    let angle_step = TAU / n as f32;
    let mut out = Vec::with_capacity(pmf.batch);

    for b in 0..pmf.batch {
        let slice = pmf.slice(b);
        let mass: f32 = slice.iter().sum();
        if (mass - 1.0).abs() > MASS_TOL {
            return Err(EstimateError::InvariantViolation {
                context: "fit_bivariate: PMF slice mass",
                value: mass,
            });
        }

        // marginals: rows hold v, columns hold u
        let mut marg_u = vec![0.0f32; n];
        let mut marg_v = vec![0.0f32; n];
        for (row, weights) in slice.chunks_exact(n).enumerate() {
            for (col, &p) in weights.iter().enumerate() {
                marg_v[row] += p;
                marg_u[col] += p;
            }
        }

        let mu_u = circular_mean(&marg_u, angle_step);
        let mu_v = circular_mean(&marg_v, angle_step);

        let delta_u: Vec<f32> = (0..n)
            .map(|k| wrapped_delta(k as f32, mu_u, n as f32))
            .collect();
        let delta_v: Vec<f32> = (0..n)
            .map(|k| wrapped_delta(k as f32, mu_v, n as f32))
            .collect();

        let mean_du = weighted_sum(&marg_u, &delta_u, |d| d);
        let mean_dv = weighted_sum(&marg_v, &delta_v, |d| d);
        let var_u = weighted_sum(&marg_u, &delta_u, |d| d * d) - mean_du * mean_du;
        let var_v = weighted_sum(&marg_v, &delta_v, |d| d * d) - mean_dv * mean_dv;

        // joint second moment via the full slice
        let mut e_uv = 0.0f32;
        for (row, weights) in slice.chunks_exact(n).enumerate() {
            let dv = delta_v[row];
            for (col, &p) in weights.iter().enumerate() {
                e_uv += p * dv * delta_u[col];
            }
        }
        let cov = e_uv - mean_du * mean_dv;

        out.push(TorusMoments {
            mu: Vector2::new(mu_u, mu_v),
            sigma: Matrix2::new(var_u, cov, cov, var_v),
        });
    }
    Ok(out)
}

/// Circular mean of a 1D marginal, in index units within [0, n).
fn circular_mean(marginal: &[f32], angle_step: f32) -> f32 {
    let mut expected_cos = 0.0f32;
    let mut expected_sin = 0.0f32;
    for (k, &w) in marginal.iter().enumerate() {
        let angle = k as f32 * angle_step;
        expected_cos += w * angle.cos();
        expected_sin += w * angle.sin();
    }
    expected_sin.atan2(expected_cos).rem_euclid(TAU) / angle_step
}

fn weighted_sum(weights: &[f32], deltas: &[f32], f: impl Fn(f32) -> f32) -> f32 {
    weights
        .iter()
        .zip(deltas)
        .map(|(&w, &d)| w * f(d))
        .sum()
}
