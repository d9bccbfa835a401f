//! Toroidal log-chroma histograms and feature assembly.
//!
//! Each batch element's valid pixels (all channels above `EPS`) are mapped to
//! their nearest toroidal bin and accumulated into an `[nbins, nbins]` grid
//! (rows index v, columns index u), then normalized by the valid-pixel count.
use crate::colorspace::pixel_uv;
use crate::config::BinGrid;
use crate::edges::local_absolute_deviation;
use crate::error::EstimateError;
use crate::tensor::{FeatureBatch, RgbBatch, SurfaceBatch};
use crate::EPS;
use log::warn;
use rayon::prelude::*;

/// Builds one normalized chroma histogram per batch element.
///
/// Fails with `InvalidInput` on negative channel values. An element with no
/// valid pixels yields an all-zero slice (the count normalization falls back
/// to `EPS`) and emits a warning rather than failing the batch.
pub fn chroma_histogram(rgb: &RgbBatch, grid: &BinGrid) -> Result<SurfaceBatch, EstimateError> {
    if rgb.data.iter().any(|&c| c < 0.0) {
        return Err(EstimateError::InvalidInput {
            context: "chroma_histogram: negative channel value",
        });
    }

    let slices: Vec<Vec<f32>> = (0..rgb.batch)
        .into_par_iter()
        .map(|b| histogram_slice(rgb, b, grid))
        .collect();

    let mut out = SurfaceBatch::new(rgb.batch, grid.nbins);
    for (b, slice) in slices.into_iter().enumerate() {
        out.slice_mut(b).copy_from_slice(&slice);
    }
    Ok(out)
}

/// Raw-image and edge-image chroma histograms stacked as a two-channel
/// feature tensor, ready for filter-bank scoring.
pub fn featurize(rgb: &RgbBatch, grid: &BinGrid) -> Result<FeatureBatch, EstimateError> {
    let raw = chroma_histogram(rgb, grid)?;
    let edge = chroma_histogram(&local_absolute_deviation(rgb), grid)?;
    FeatureBatch::from_channels(&[raw, edge])
}

fn histogram_slice(rgb: &RgbBatch, b: usize, grid: &BinGrid) -> Vec<f32> {
    let n = grid.nbins;
    let mut hist = vec![0.0f32; n * n];
    let mut valid = 0usize;

    for px in rgb.element(b).chunks_exact(3) {
        if px[0] <= EPS || px[1] <= EPS || px[2] <= EPS {
            continue;
        }
        if !(px[0].is_finite() && px[1].is_finite() && px[2].is_finite()) {
            continue;
        }
        let [u, v] = pixel_uv([px[0], px[1], px[2]]);
        let iu = toroidal_bin(u, grid);
        let iv = toroidal_bin(v, grid);
        hist[iv * n + iu] += 1.0;
        valid += 1;
    }

    if valid == 0 {
        warn!("chroma_histogram: batch element {b} has no valid pixels, histogram is empty");
    }
    let total = (valid as f32).max(EPS);
    for w in &mut hist {
        *w /= total;
    }
    hist
}

/// Nearest toroidal bin index for one log-chroma coordinate.
#[inline]
fn toroidal_bin(value: f32, grid: &BinGrid) -> usize {
    let n = grid.nbins as f32;
    ((value - grid.first_bin) / grid.bin_size.max(EPS))
        .round()
        .rem_euclid(n) as usize
}
