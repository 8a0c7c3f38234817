use crate::error::OcrError;
use image::{DynamicImage, ImageDecoder, ImageReader, RgbImage};
use std::path::Path;

/// Fail early with `FileNotFound` unless `path` is an existing regular file
pub fn ensure_exists(path: &Path) -> Result<(), OcrError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(OcrError::FileNotFound(path.to_path_buf()))
    }
}

/// Read and decode an image file into an 8-bit RGB matrix, upright
/// according to its EXIF orientation
pub fn load(path: &Path) -> Result<RgbImage, OcrError> {
    let decode_err =
        |e: image::ImageError| OcrError::DecodeError(format!("{}: {}", path.display(), e));

    let mut decoder = ImageReader::open(path)
        .map_err(|e| OcrError::DecodeError(format!("Failed to read {}: {}", path.display(), e)))?
        .with_guessed_format()
        .map_err(|e| OcrError::DecodeError(format!("Failed to read {}: {}", path.display(), e)))?
        .into_decoder()
        .map_err(decode_err)?;
    let orientation = decoder.orientation().map_err(decode_err)?;
    let mut img = DynamicImage::from_decoder(decoder).map_err(decode_err)?;
    img.apply_orientation(orientation);

    let rgb_img = img.into_rgb8();
    let (width, height) = rgb_img.dimensions();
    if width == 0 || height == 0 {
        return Err(OcrError::DecodeError(format!(
            "{}: image is empty ({}x{})",
            path.display(),
            width,
            height
        )));
    }

    tracing::debug!("Loaded {} ({}x{})", path.display(), width, height);
    Ok(rgb_img)
}
