//! OCR engine implementations
//!
//! Engines are conditionally compiled based on feature flags.

#[cfg(feature = "engine-tesseract")]
pub mod tesseract;

use crate::config::Config;
use crate::engine::OcrEngine;
use crate::error::OcrError;

/// Create the compiled-in OCR engine
#[cfg(feature = "engine-tesseract")]
pub fn create_engine(config: &Config) -> Result<Box<dyn OcrEngine>, OcrError> {
    tracing::info!("Initializing tesseract engine...");
    let engine = tesseract::TesseractEngine::new(config)?;
    tracing::debug!("Using OCR engine: {}", engine.name());
    Ok(Box::new(engine))
}

#[cfg(not(feature = "engine-tesseract"))]
pub fn create_engine(_config: &Config) -> Result<Box<dyn OcrEngine>, OcrError> {
    Err(OcrError::InitializationError(
        "No OCR engines available. Build with --features engine-tesseract".to_string(),
    ))
}
