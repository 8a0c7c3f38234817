use crate::error::OcrError;
use image::{GrayImage, Luma};

/// Foreground (ink) and background values of the binarized image
pub const INK: u8 = 255;
pub const BACKGROUND: u8 = 0;

/// Apply inverted adaptive Gaussian thresholding
///
/// A pixel becomes background when it is brighter than its Gaussian-weighted
/// local mean minus `c`, and ink otherwise. Works on unevenly lit paper
/// where a single global threshold would swallow faint strokes.
pub fn apply(image: &GrayImage, block_size: u32, c: i16) -> Result<GrayImage, OcrError> {
    if block_size < 3 || block_size % 2 == 0 {
        return Err(OcrError::ProcessingError(format!(
            "Adaptive threshold block size must be odd and at least 3, got {}",
            block_size
        )));
    }

    let kernel = gaussian_kernel(block_size);
    let mean = local_mean(image, &kernel);

    Ok(GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y).0[0] as i16;
        let local = mean.get_pixel(x, y).0[0] as i16;
        if pixel - local > -c {
            Luma([BACKGROUND])
        } else {
            Luma([INK])
        }
    }))
}

/// Normalized 1D Gaussian kernel of the given size
///
/// sigma = 0.3 * ((size - 1) * 0.5 - 1) + 0.8, so size 11 gives sigma 2.0
fn gaussian_kernel(size: u32) -> Vec<f32> {
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let center = (size / 2) as f32;
    let weights: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}

/// Separable Gaussian blur with replicated borders, rounded to 8 bits
///
/// Both passes accumulate in f32 and only the final mean is rounded. This is
/// not bit-exact with a fixed-point 8-bit blur: a pixel sitting exactly at
/// `mean - c` may land on the other side of the threshold.
fn local_mean(img: &GrayImage, kernel: &[f32]) -> GrayImage {
    let (width, height) = img.dimensions();
    let radius = (kernel.len() / 2) as i64;
    let clamp = |v: i64, max: u32| v.clamp(0, max as i64 - 1) as u32;

    let mut horizontal = vec![0.0f32; width as usize * height as usize];
    for y in 0..height {
        for x in 0..width {
            let sum: f32 = kernel
                .iter()
                .enumerate()
                .map(|(k, w)| {
                    let sx = clamp(x as i64 + k as i64 - radius, width);
                    w * img.get_pixel(sx, y).0[0] as f32
                })
                .sum();
            horizontal[(y * width + x) as usize] = sum;
        }
    }

    GrayImage::from_fn(width, height, |x, y| {
        let sum: f32 = kernel
            .iter()
            .enumerate()
            .map(|(k, w)| {
                let sy = clamp(y as i64 + k as i64 - radius, height);
                w * horizontal[(sy * width + x) as usize]
            })
            .sum();
        Luma([sum.round().clamp(0.0, 255.0) as u8])
    })
}
