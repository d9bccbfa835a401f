//! Owned RGB image batch in row-major, channel-interleaved layout.
//!
//! Logical shape is `[batch, height, width, 3]` with channel order (R, G, B).
//! Storage is a single contiguous `Vec<f32>`; each batch element occupies
//! `height * width * 3` consecutive values.
use crate::error::EstimateError;

#[derive(Clone, Debug)]
pub struct RgbBatch {
    /// Number of batch elements
    pub batch: usize,
    /// Image height in pixels
    pub h: usize,
    /// Image width in pixels
    pub w: usize,
    /// Backing storage, `batch * h * w * 3` values
    pub data: Vec<f32>,
}

impl RgbBatch {
    /// Construct a zero-initialized batch of size `batch × h × w`.
    pub fn new(batch: usize, h: usize, w: usize) -> Self {
        Self {
            batch,
            h,
            w,
            data: vec![0.0; batch * h * w * 3],
        }
    }

    /// Wrap an existing buffer; its length must match the dimensions.
    pub fn from_vec(
        batch: usize,
        h: usize,
        w: usize,
        data: Vec<f32>,
    ) -> Result<Self, EstimateError> {
        let expected = batch * h * w * 3;
        if data.len() != expected {
            return Err(EstimateError::ShapeMismatch {
                context: "RgbBatch::from_vec: buffer length",
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { batch, h, w, data })
    }

    #[inline]
    /// Convert (b, y, x) to the linear index of the pixel's R value.
    pub fn idx(&self, b: usize, y: usize, x: usize) -> usize {
        ((b * self.h + y) * self.w + x) * 3
    }

    #[inline]
    /// Get the RGB triple at (b, y, x).
    pub fn pixel(&self, b: usize, y: usize, x: usize) -> [f32; 3] {
        let i = self.idx(b, y, x);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    /// Set the RGB triple at (b, y, x).
    pub fn set_pixel(&mut self, b: usize, y: usize, x: usize, rgb: [f32; 3]) {
        let i = self.idx(b, y, x);
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    #[inline]
    /// Interleaved pixel data of one batch element, `h * w * 3` values.
    pub fn element(&self, b: usize) -> &[f32] {
        let len = self.h * self.w * 3;
        &self.data[b * len..(b + 1) * len]
    }

    #[inline]
    /// Mutable pixel data of one batch element.
    pub fn element_mut(&mut self, b: usize) -> &mut [f32] {
        let len = self.h * self.w * 3;
        &mut self.data[b * len..(b + 1) * len]
    }
}
