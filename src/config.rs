//! Chroma-histogram grid configuration.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Toroidal chroma-histogram grid: the center of bin 0, the uniform bin
/// pitch, and the bin count per axis.
///
/// The physical log-UV value at index `i` is `first_bin + i * bin_size`;
/// both axes wrap, so index `nbins - 1` neighbors index 0.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BinGrid {
    pub first_bin: f32,
    pub bin_size: f32,
    pub nbins: usize,
}

impl Default for BinGrid {
    fn default() -> Self {
        Self {
            first_bin: -1.0,
            bin_size: 1.0 / 32.0,
            nbins: 64,
        }
    }
}

impl BinGrid {
    #[inline]
    /// Physical UV value at the center of bin `i`.
    pub fn value_at(&self, i: usize) -> f32 {
        self.first_bin + i as f32 * self.bin_size
    }

    #[inline]
    /// Largest representable UV value, at the center of the last bin.
    pub fn last_value(&self) -> f32 {
        self.value_at(self.nbins.saturating_sub(1))
    }
}

/// Loads a `BinGrid` from a JSON file.
pub fn load_config(path: &Path) -> Result<BinGrid, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
