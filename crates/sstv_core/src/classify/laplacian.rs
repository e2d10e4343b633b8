//! Discrete Laplacian and its variance over a grayscale image.
//!
//! Kernel (4-neighbour, aperture 1):
//!
//! ```text
//!  0  1  0
//!  1 -4  1
//!  0  1  0
//! ```
//!
//! Borders use reflect-101 (`gfedcb|abcdefgh|gfedcba`), so a flat image
//! has a Laplacian of exactly zero everywhere. Values are computed in `f64`
//! without saturation.

use image::GrayImage;

/// Laplacian response for every pixel, row-major.
pub fn laplacian(gray: &GrayImage) -> Vec<f64> {
    let (width, height) = gray.dimensions();
    let (w, h) = (width as i64, height as i64);
    let raw = gray.as_raw();

    let at = |x: i64, y: i64| -> f64 {
        let xi = reflect101(x, w);
        let yi = reflect101(y, h);
        raw[(yi * w + xi) as usize] as f64
    };

    let mut out = Vec::with_capacity(raw.len());
    for y in 0..h {
        for x in 0..w {
            let center = at(x, y);
            let value = at(x - 1, y) + at(x + 1, y) + at(x, y - 1) + at(x, y + 1) - 4.0 * center;
            out.push(value);
        }
    }
    out
}

/// Population variance; zero for an empty slice.
pub fn variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64
}

/// Variance of the Laplacian: high for sharp edges, low for flat fields.
pub fn laplacian_variance(gray: &GrayImage) -> f64 {
    variance(&laplacian(gray))
}

/// Reflect an out-of-range index back into `0..n`, excluding the edge pixel.
///
/// Only handles offsets of one pixel past either edge, which is all a
/// 3x3 kernel needs.
fn reflect101(i: i64, n: i64) -> i64 {
    if n == 1 {
        0
    } else if i < 0 {
        -i
    } else if i >= n {
        2 * n - 2 - i
    } else {
        i
    }
}
