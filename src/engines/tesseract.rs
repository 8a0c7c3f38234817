//! Tesseract engine implementation
//!
//! Uses tesseract-static crate for static linking (no system dependencies).
//! Downloads tessdata (training data) automatically on first use unless a
//! tessdata directory is configured.

use crate::config::{Config, RecognizerConfig};
use crate::engine::OcrEngine;
use crate::error::OcrError;
use image::{DynamicImage, GrayImage};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tesseract_static::tesseract::{OcrEngineMode, Tesseract};

/// Tesseract OCR Engine
pub struct TesseractEngine {
    /// Path to tessdata directory
    tessdata_path: String,
}

impl TesseractEngine {
    /// Create a Tesseract engine with trained data for the configured language
    pub fn new(config: &Config) -> Result<Self, OcrError> {
        let tessdata_path = match &config.tessdata_path {
            Some(path) => path.clone(),
            None => ensure_tessdata_available(&config.recognizer)?,
        };

        // Validate that tessdata is accessible by doing a test initialization
        let test_tess = new_tesseract(&tessdata_path, &config.recognizer).map_err(|e| {
            OcrError::InitializationError(format!("Failed to initialize Tesseract: {}", e))
        })?;
        drop(test_tess);

        tracing::info!(
            "Tesseract engine initialized (tessdata: {}, language: {})",
            tessdata_path,
            config.recognizer.language
        );

        Ok(Self { tessdata_path })
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&self, image: &GrayImage, config: &RecognizerConfig) -> Result<String, OcrError> {
        let (width, height) = image.dimensions();

        // BMP is always supported by leptonica
        let rgb_img = DynamicImage::ImageLuma8(image.clone()).into_rgb8();
        let mut bmp_data = Vec::new();
        rgb_img
            .write_to(&mut std::io::Cursor::new(&mut bmp_data), image::ImageFormat::Bmp)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to convert to BMP: {}", e)))?;

        tracing::debug!(
            "Recognizing {}x{} image ({} bytes) with {}",
            width,
            height,
            bmp_data.len(),
            config
        );

        let tess = new_tesseract(&self.tessdata_path, config)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to create Tesseract: {}", e)))?;

        let tess = tess
            .set_variable("tessedit_pageseg_mode", &config.page_seg_mode.to_string())
            .map_err(|e| {
                OcrError::ProcessingError(format!(
                    "Failed to set page segmentation mode {}: {}",
                    config.page_seg_mode, e
                ))
            })?;

        let tess = tess.set_image_from_mem(&bmp_data).map_err(|e| {
            OcrError::ProcessingError(format!(
                "Failed to set image ({}x{}, {} bytes): {}",
                width,
                height,
                bmp_data.len(),
                e
            ))
        })?;

        let mut tess = tess
            .recognize()
            .map_err(|e| OcrError::ProcessingError(format!("Failed to recognize text: {}", e)))?;

        let text = tess
            .get_text()
            .map_err(|e| OcrError::ProcessingError(format!("Failed to get text: {}", e)))?;

        tracing::info!(
            "Recognized {} chars, mean confidence {}",
            text.trim().len(),
            tess.mean_text_conf()
        );

        Ok(text.trim().to_string())
    }
}

fn new_tesseract(tessdata_path: &str, config: &RecognizerConfig) -> Result<Tesseract, String> {
    let oem = engine_mode(config.engine_mode)?;
    Tesseract::new_with_oem(Some(tessdata_path), Some(config.language.as_str()), oem)
        .map_err(|e| e.to_string())
}

fn engine_mode(mode: u8) -> Result<OcrEngineMode, String> {
    match mode {
        0 => Ok(OcrEngineMode::TesseractOnly),
        1 => Ok(OcrEngineMode::LstmOnly),
        2 => Ok(OcrEngineMode::TesseractLstmCombined),
        3 => Ok(OcrEngineMode::Default),
        other => Err(format!("unsupported engine mode {}", other)),
    }
}

// ============================================================================
// Tessdata download helpers
// ============================================================================

/// Ensure tessdata for every configured language is available, downloading if needed
fn ensure_tessdata_available(config: &RecognizerConfig) -> Result<String, OcrError> {
    let cache_dir = tessdata_cache_dir();

    std::fs::create_dir_all(&cache_dir).map_err(|e| {
        OcrError::InitializationError(format!("Failed to create tessdata directory: {}", e))
    })?;

    for language in config.languages() {
        let traineddata_path = cache_dir.join(format!("{}.traineddata", language));

        if traineddata_path.exists() {
            tracing::debug!("Using cached tessdata {:?}", traineddata_path);
            continue;
        }

        tracing::info!(
            "Downloading tessdata for '{}' (this may take a moment)...",
            language
        );
        download_file(&tessdata_url(language), &traineddata_path)?;
        tracing::info!("Downloaded tessdata to {:?}", traineddata_path);
    }

    // Tesseract expects the directory, not the file
    cache_dir
        .to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| OcrError::InitializationError("Invalid tessdata path".to_string()))
}

fn tessdata_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("handwriting-ocr")
        .join("tessdata")
}

/// Get tessdata download URL for a language
fn tessdata_url(language: &str) -> String {
    // tessdata_fast: smaller, LSTM-only models
    format!(
        "https://github.com/tesseract-ocr/tessdata_fast/raw/main/{}.traineddata",
        language
    )
}

/// Download a file from URL to path using ureq
fn download_file(url: &str, path: &Path) -> Result<(), OcrError> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| OcrError::InitializationError(format!("Failed to download tessdata: {}", e)))?;

    let buffer = response.into_body().read_to_vec().map_err(|e| {
        OcrError::InitializationError(format!("Failed to read tessdata response: {}", e))
    })?;

    // Only complete downloads appear under the .traineddata name
    let partial_path = path.with_extension("traineddata.part");
    let mut file = File::create(&partial_path).map_err(|e| {
        OcrError::InitializationError(format!("Failed to create tessdata file: {}", e))
    })?;

    file.write_all(&buffer).map_err(|e| {
        OcrError::InitializationError(format!("Failed to write tessdata file: {}", e))
    })?;

    std::fs::rename(&partial_path, path).map_err(|e| {
        OcrError::InitializationError(format!("Failed to move tessdata file into place: {}", e))
    })?;

    Ok(())
}
