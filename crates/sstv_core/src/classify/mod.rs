//! Static/content classification of decoded SSTV images.
//!
//! An image is scored by the variance of its Laplacian: real pictures have
//! many sharp intensity transitions, while a no-signal decode is a flat or
//! uniformly noisy field. Anything that fails to decode is treated as
//! static.

mod laplacian;

pub use laplacian::{laplacian, laplacian_variance, variance};

use std::path::Path;

use image::{DynamicImage, GrayImage, ImageReader, Luma};
use tracing::{debug, warn};

use crate::models::Classification;

/// Laplacian variance at or below which an image counts as static.
pub const DEFAULT_THRESHOLD: f64 = 20000.0;

/// Sharpness score of an image file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageScore {
    /// Variance of the Laplacian of the grayscale image.
    Variance(f64),
    /// The file could not be decoded as an image.
    Undecodable,
}

impl ImageScore {
    /// Numeric variance, if the image decoded.
    pub fn variance(&self) -> Option<f64> {
        match self {
            ImageScore::Variance(v) => Some(*v),
            ImageScore::Undecodable => None,
        }
    }
}

impl std::fmt::Display for ImageScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageScore::Variance(v) => write!(f, "{:.2}", v),
            ImageScore::Undecodable => write!(f, "undecodable"),
        }
    }
}

/// Score the image at `path`.
///
/// The format is guessed from the file content, not its extension.
pub fn score_image(path: &Path) -> ImageScore {
    match load_image(path) {
        Ok(img) => score_decoded(&img),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Error loading image");
            ImageScore::Undecodable
        }
    }
}

/// Score an already decoded image.
pub fn score_decoded(img: &DynamicImage) -> ImageScore {
    let gray = to_gray(img);
    let score = laplacian_variance(&gray);
    debug!(variance = score, "Variance of Laplacian");
    ImageScore::Variance(score)
}

/// Map a score to a verdict.
///
/// The threshold is inclusive on the static side. `Undecodable` is always
/// static, whatever the threshold.
pub fn classify(score: ImageScore, threshold: f64) -> Classification {
    match score {
        ImageScore::Variance(v) if v > threshold => Classification::Content,
        // NaN lands here too
        _ => Classification::Static,
    }
}

/// Score and classify a file in one step.
pub fn classify_file(path: &Path, threshold: f64) -> (ImageScore, Classification) {
    let score = score_image(path);
    (score, classify(score, threshold))
}

/// Grayscale conversion with BT.601 weights (0.299, 0.587, 0.114).
///
/// Single-channel images pass through unchanged. Alpha is ignored.
pub fn to_gray(img: &DynamicImage) -> GrayImage {
    match img {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_) => img.to_luma8(),
        _ => {
            let rgb = img.to_rgb8();
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                Luma([bt601_luma(r, g, b)])
            })
        }
    }
}

/// Fixed-point BT.601 luma, 14 fractional bits, rounded to nearest.
fn bt601_luma(r: u8, g: u8, b: u8) -> u8 {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    let y = (r as u32 * R + g as u32 * G + b as u32 * B + (1 << 13)) >> 14;
    y.min(255) as u8
}

fn load_image(path: &Path) -> Result<DynamicImage, image::ImageError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    reader.decode()
}
