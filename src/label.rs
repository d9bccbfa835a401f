//! Bilinear toroidal splatting of ground-truth UV labels into target PMFs.
//!
//! The supervision-side inverse of the moment fit: a UV coordinate becomes a
//! PMF with its mass bilinearly spread over the four surrounding toroidal
//! bins, so a centroid of the result recovers the coordinate.
use crate::tensor::SurfaceBatch;
use crate::EPS;
use log::warn;

/// Splat each (u, v) label onto an `n × n` toroidal grid.
///
/// Labels are clamped into `[offset, offset + (n-1) * step_size]`; a clamp
/// that changes a value emits a warning and execution continues, since an
/// out-of-range label is a legitimate edge case rather than a caller bug.
/// Each output slice carries unit mass by construction of the bilinear
/// weights.
pub fn uv_to_pmf(uv: &[[f32; 2]], step_size: f32, offset: f32, n: usize) -> SurfaceBatch {
    let step = step_size.max(EPS);
    let uv_max = offset + (n as f32 - 1.0) * step;
    let mut out = SurfaceBatch::new(uv.len(), n);

    for (b, &[u, v]) in uv.iter().enumerate() {
        let cu = u.clamp(offset, uv_max);
        let cv = v.clamp(offset, uv_max);
        if cu != u || cv != v {
            warn!(
                "uv_to_pmf: label ({u:.4}, {v:.4}) outside [{offset:.4}, {uv_max:.4}], clipping"
            );
        }

        let fu = (cu - offset) / step;
        let fv = (cv - offset) / step;
        let lo_u = fu.floor();
        let lo_v = fv.floor();
        let w_u = fu - lo_u;
        let w_v = fv - lo_v;

        // floor+1 wraps; the wrapped neighbor only ever receives zero weight
        // when the label sits exactly on the last bin
        let iu0 = lo_u as usize;
        let iv0 = lo_v as usize;
        let iu1 = (iu0 + 1) % n;
        let iv1 = (iv0 + 1) % n;

        let slice = out.slice_mut(b);
        slice[iv0 * n + iu0] += (1.0 - w_v) * (1.0 - w_u);
        slice[iv0 * n + iu1] += (1.0 - w_v) * w_u;
        slice[iv1 * n + iu0] += w_v * (1.0 - w_u);
        slice[iv1 * n + iu1] += w_v * w_u;
    }
    out
}
