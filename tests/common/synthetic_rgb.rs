use illuminant_estimator::tensor::{RgbBatch, SurfaceBatch};
use illuminant_estimator::FilterBank;
use rustfft::num_complex::Complex;

/// Fills a batch with one constant color per element.
pub fn constant_color_batch(colors: &[[f32; 3]], h: usize, w: usize) -> RgbBatch {
    assert!(h > 0 && w > 0, "image dimensions must be positive");
    let mut rgb = RgbBatch::new(colors.len(), h, w);
    for (b, color) in colors.iter().enumerate() {
        for y in 0..h {
            for x in 0..w {
                rgb.set_pixel(b, y, x, *color);
            }
        }
    }
    rgb
}

/// Two-channel filter bank whose raw-histogram channel is a scaled identity
/// (a flat spectrum is the FFT of a delta kernel) and whose edge channel is
/// zero, with zero bias.
pub fn identity_bank(batch: usize, n: usize, gain: f32) -> FilterBank {
    let channels = 2;
    let mut filters = vec![Complex::new(0.0f32, 0.0); batch * channels * n * n];
    for b in 0..batch {
        let start = b * channels * n * n;
        for z in filters[start..start + n * n].iter_mut() {
            *z = Complex::new(gain, 0.0);
        }
    }
    let bias = SurfaceBatch::new(batch, n);
    FilterBank::new(batch, channels, n, filters, bias).expect("consistent shapes")
}
