//! I/O helpers for RGB batches and JSON reports.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into a one-element `RgbBatch`
//!   with channels scaled to [0, 1].
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::RgbBatch;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk as a batch of one, channels in [0, 1].
pub fn load_rgb_image(path: &Path) -> Result<RgbBatch, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let w = img.width() as usize;
    let h = img.height() as usize;
    let mut batch = RgbBatch::new(1, h, w);
    for (x, y, px) in img.enumerate_pixels() {
        batch.set_pixel(
            0,
            y as usize,
            x as usize,
            [
                px[0] as f32 / 255.0,
                px[1] as f32 / 255.0,
                px[2] as f32 / 255.0,
            ],
        );
    }
    Ok(batch)
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}
