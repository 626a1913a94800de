//! Fundus image normalization: everything between uploaded bytes and the
//! tensor the classifier was calibrated against. Illumination varies widely
//! between fundus cameras, so the lightness channel gets local contrast
//! enhancement before the resize.

mod clahe;
mod color;

use crate::error::Error;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use ndarray::{Array4, ArrayView4};
use tracing::debug;

/// Classifier input edge, pixels.
pub const TARGET_SIZE: u32 = 224;
/// CLAHE clip limit used for illumination correction.
const CLIP_LIMIT: f32 = 2.0;
/// CLAHE tile grid.
const TILE_GRID: (usize, usize) = (8, 8);

/// Fixed-shape classifier input: (1, height, width, 3), floats in [0, 1].
/// The leading dimension is a single-image batch.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTensor(Array4<f32>);

impl NormalizedTensor {
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    pub fn view(&self) -> ArrayView4<'_, f32> {
        self.0.view()
    }

    pub fn into_inner(self) -> Array4<f32> {
        self.0
    }
}

/// Deterministic normalizer: same image and same parameters produce an
/// identical tensor.
#[derive(Debug, Clone)]
pub struct Normalizer {
    target: (u32, u32),
    clip_limit: f32,
    tile_grid: (usize, usize),
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer {
            target: (TARGET_SIZE, TARGET_SIZE),
            clip_limit: CLIP_LIMIT,
            tile_grid: TILE_GRID,
        }
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and normalize uploaded image bytes.
    pub fn normalize_bytes(&self, bytes: &[u8]) -> Result<NormalizedTensor, Error> {
        let img = image::load_from_memory(bytes).map_err(|e| Error::InvalidImage(e.to_string()))?;
        self.normalize(&img)
    }

    /// Normalize an already-decoded image of any color mode.
    ///
    /// Resampling policy is fixed to bilinear; the deployed classifiers were
    /// calibrated against it and it must not change independently.
    pub fn normalize(&self, img: &DynamicImage) -> Result<NormalizedTensor, Error> {
        // Any input mode is forced to 3-channel color first.
        let rgb = img.to_rgb8();
        let (w, h) = rgb.dimensions();
        if w == 0 || h == 0 {
            return Err(Error::InvalidImage("image has zero width or height".into()));
        }
        debug!(width = w, height = h, "decoded fundus image");

        let enhanced = self.enhance(&rgb);
        let resized = imageops::resize(&enhanced, self.target.0, self.target.1, FilterType::Triangle);

        let (tw, th) = (self.target.0 as usize, self.target.1 as usize);
        let mut tensor = Array4::<f32>::zeros((1, th, tw, 3));
        for (x, y, px) in resized.enumerate_pixels() {
            for c in 0..3 {
                tensor[[0, y as usize, x as usize, c]] = px.0[c] as f32 / 255.0;
            }
        }
        Ok(NormalizedTensor(tensor))
    }

    /// CLAHE on the lightness channel only: flattens uneven fundus lighting
    /// without shifting color balance.
    fn enhance(&self, rgb: &RgbImage) -> RgbImage {
        let (w, h) = rgb.dimensions();
        let (w_us, h_us) = (w as usize, h as usize);

        let mut l = Vec::with_capacity(w_us * h_us);
        let mut a = Vec::with_capacity(w_us * h_us);
        let mut b = Vec::with_capacity(w_us * h_us);
        for px in rgb.pixels() {
            let lab = color::rgb_to_lab(px.0);
            l.push(lab[0]);
            a.push(lab[1]);
            b.push(lab[2]);
        }

        let l = clahe::equalize(&l, w_us, h_us, self.clip_limit, self.tile_grid);

        let mut out = RgbImage::new(w, h);
        for (i, px) in out.pixels_mut().enumerate() {
            px.0 = color::lab_to_rgb([l[i], a[i], b[i]]);
        }
        out
    }
}
