use image::{GrayImage, Luma, RgbImage};

/// Fixed-point BT.601 luma weights (scaled by 2^14)
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;

/// Convert an RGB image to a single luma channel
/// Y = 0.299 R + 0.587 G + 0.114 B, rounded to nearest
pub fn apply(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let luma = (r as u32 * R_WEIGHT + g as u32 * G_WEIGHT + b as u32 * B_WEIGHT
            + (1 << (SHIFT - 1)))
            >> SHIFT;
        Luma([luma as u8])
    })
}
