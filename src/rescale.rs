//! Affine mapping between histogram-index space and physical UV units.
use crate::error::EstimateError;
use nalgebra::{Matrix2, Vector2};

/// Rescales fit results from index space to physical log-UV units.
///
/// `mu = mu_idx * step_size + offset`; `sigma = sigma_idx * step_size²`
/// (variance scales with the square of a linear unit change, and needs no
/// offset correction). Fails with `ShapeMismatch` when the two batches
/// disagree in length.
pub fn idx_to_uv(
    mu_idx: &[Vector2<f32>],
    sigma_idx: &[Matrix2<f32>],
    step_size: f32,
    offset: f32,
) -> Result<(Vec<Vector2<f32>>, Vec<Matrix2<f32>>), EstimateError> {
    if mu_idx.len() != sigma_idx.len() {
        return Err(EstimateError::ShapeMismatch {
            context: "idx_to_uv: mu/sigma batch size",
            expected: mu_idx.len(),
            actual: sigma_idx.len(),
        });
    }
    let mu = mu_idx
        .iter()
        .map(|m| m.scale(step_size).add_scalar(offset))
        .collect();
    let sigma = sigma_idx
        .iter()
        .map(|s| s.scale(step_size * step_size))
        .collect();
    Ok((mu, sigma))
}
