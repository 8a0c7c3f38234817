use crate::config::RecognizerConfig;
use crate::error::OcrError;
use image::GrayImage;

/// Trait that all OCR engines must implement
pub trait OcrEngine {
    /// Returns the engine identifier (e.g., "tesseract")
    fn name(&self) -> &'static str;

    /// Recognize the text in a binary image.
    ///
    /// The result may be empty and may contain recognition noise; engine
    /// failures surface as `OcrError::ProcessingError`.
    fn recognize(&self, image: &GrayImage, config: &RecognizerConfig) -> Result<String, OcrError>;
}
