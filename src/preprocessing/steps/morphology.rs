use crate::error::OcrError;
use image::{GrayImage, Luma};
use imageproc::morphology::{grayscale_dilate, grayscale_open, Mask};

/// Morphological opening (erosion then dilation) with a rectangular element
/// Removes specks smaller than the element while keeping stroke shape
pub fn open(image: &GrayImage, kernel: (u8, u8)) -> Result<GrayImage, OcrError> {
    let mask = rect_mask(kernel)?;
    Ok(grayscale_open(image, &mask))
}

/// Dilate with a rectangular element to thicken and reconnect strokes
pub fn dilate(image: &GrayImage, kernel: (u8, u8), iterations: u32) -> Result<GrayImage, OcrError> {
    let mask = rect_mask(kernel)?;
    let mut result = image.clone();
    for _ in 0..iterations {
        result = grayscale_dilate(&result, &mask);
    }
    Ok(result)
}

/// All-ones rectangle anchored at (width / 2, height / 2)
fn rect_mask((width, height): (u8, u8)) -> Result<Mask, OcrError> {
    if width == 0 || height == 0 {
        return Err(OcrError::ProcessingError(format!(
            "Structuring element must be non-empty, got {}x{}",
            width, height
        )));
    }
    let element = GrayImage::from_pixel(width as u32, height as u32, Luma([255u8]));
    Ok(Mask::from_image(&element, width / 2, height / 2))
}
