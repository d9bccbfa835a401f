use illuminant_estimator::tensor::{RgbBatch, SurfaceBatch};
use illuminant_estimator::{BinGrid, FilterBank, IlluminantEstimator};
use rustfft::num_complex::Complex;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    // Demo stub: a warm-tinted synthetic frame scored through an identity
    // filter bank (a flat spectrum is the FFT of a delta kernel).
    let grid = BinGrid::default();
    let n = grid.nbins;
    let (batch, h, w) = (1usize, 240usize, 320usize);

    let mut rgb = RgbBatch::new(batch, h, w);
    for px in rgb.data.chunks_exact_mut(3) {
        px.copy_from_slice(&[0.62, 0.5, 0.33]);
    }

    let channels = 2;
    let mut filters = vec![Complex::new(0.0f32, 0.0); batch * channels * n * n];
    for z in filters.iter_mut().take(n * n) {
        *z = Complex::new(50.0, 0.0); // raw-histogram channel only
    }
    let bias = SurfaceBatch::new(batch, n);
    let bank =
        FilterBank::new(batch, channels, n, filters, bias).map_err(|e| e.to_string())?;

    let estimator = IlluminantEstimator::new(grid, bank).map_err(|e| e.to_string())?;
    let report = estimator.estimate(&rgb).map_err(|e| e.to_string())?;

    let est = &report.estimates[0];
    println!(
        "mu=({:.4}, {:.4}) var=({:.5}, {:.5}) latency_ms={:.3}",
        est.mu[0],
        est.mu[1],
        est.sigma[(0, 0)],
        est.sigma[(1, 1)],
        report.latency_ms
    );
    Ok(())
}
