//! RGB ⇄ log-chrominance (UV) conversion and white-balance application.
//!
//! The UV representation is brightness-invariant: `u = log(g/r)`,
//! `v = log(g/b)`. A white point is a single UV pair; applying its gains
//! `(e^u, 1, e^v)` to an image neutralizes the estimated illuminant.
use crate::error::EstimateError;
use crate::tensor::RgbBatch;
use crate::EPS;

/// Converts RGB triples to log-UV coordinates.
///
/// Fails with `InvalidInput` if any channel is negative. Channels are floored
/// at `EPS` before the logarithm so black pixels map to a finite coordinate.
pub fn rgb_to_uv(rgb: &[[f32; 3]]) -> Result<Vec<[f32; 2]>, EstimateError> {
    if rgb.iter().any(|px| px.iter().any(|&c| c < 0.0)) {
        return Err(EstimateError::InvalidInput {
            context: "rgb_to_uv: negative channel value",
        });
    }
    Ok(rgb.iter().map(|&px| pixel_uv(px)).collect())
}

/// Log-UV of a single pixel. Assumes non-negative channels.
#[inline]
pub(crate) fn pixel_uv(rgb: [f32; 3]) -> [f32; 2] {
    let log_r = rgb[0].max(EPS).ln();
    let log_g = rgb[1].max(EPS).ln();
    let log_b = rgb[2].max(EPS).ln();
    [log_g - log_r, log_g - log_b]
}

/// Maps a UV white point back to a unit-norm RGB triple with `g = 1`
/// before normalization.
pub fn uv_to_rgb(uv: [f32; 2]) -> [f32; 3] {
    let r = (-uv[0]).exp();
    let b = (-uv[1]).exp();
    let norm = (r * r + 1.0 + b * b).sqrt();
    [r / norm, 1.0 / norm, b / norm]
}

/// Applies per-element white-balance gains `(e^u, 1, e^v)` to an image batch,
/// broadcast over height and width.
pub fn apply_wb(rgb: &RgbBatch, uv: &[[f32; 2]]) -> Result<RgbBatch, EstimateError> {
    if uv.len() != rgb.batch {
        return Err(EstimateError::ShapeMismatch {
            context: "apply_wb: white point count",
            expected: rgb.batch,
            actual: uv.len(),
        });
    }
    let mut out = rgb.clone();
    for (b, &[u, v]) in uv.iter().enumerate() {
        let gain_r = u.exp();
        let gain_b = v.exp();
        for px in out.element_mut(b).chunks_exact_mut(3) {
            px[0] *= gain_r;
            px[2] *= gain_b;
        }
    }
    Ok(out)
}
