use crate::config::PreprocessingConfig;
use crate::error::OcrError;
use image::{GrayImage, RgbImage};
use std::time::Instant;

use super::steps;

/// Timing information for a single preprocessing step
#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: &'static str,
    pub time_ms: u64,
}

/// Result of preprocessing including timing stats
#[derive(Debug, Clone)]
pub struct PreprocessingResult {
    /// Binary image: ink 255, background 0
    pub image: GrayImage,
    /// Total preprocessing time in milliseconds
    pub total_time_ms: u64,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

/// Fixed handwriting preprocessing chain:
/// grayscale, adaptive threshold, opening, dilation
pub struct Pipeline {
    config: PreprocessingConfig,
}

impl Pipeline {
    pub fn new(config: PreprocessingConfig) -> Self {
        Self { config }
    }

    /// Run every step in order; each step keeps the input's width and height
    pub fn process(&self, image: &RgbImage) -> Result<PreprocessingResult, OcrError> {
        let start = Instant::now();
        let mut steps_timing = Vec::new();
        let dimensions = image.dimensions();
        let config = &self.config;

        let step_start = Instant::now();
        let mut img = steps::grayscale::apply(image);
        record("grayscale", step_start, &mut steps_timing);

        img = run_step("threshold", img, dimensions, &mut steps_timing, |img| {
            steps::threshold::apply(&img, config.block_size, config.c)
        })?;

        img = run_step("opening", img, dimensions, &mut steps_timing, |img| {
            steps::morphology::open(&img, config.open_kernel)
        })?;

        img = run_step("dilation", img, dimensions, &mut steps_timing, |img| {
            steps::morphology::dilate(&img, config.dilate_kernel, config.dilate_iterations)
        })?;

        Ok(PreprocessingResult {
            image: img,
            total_time_ms: start.elapsed().as_millis() as u64,
            steps: steps_timing,
        })
    }
}

fn run_step<F>(
    name: &'static str,
    img: GrayImage,
    dimensions: (u32, u32),
    timings: &mut Vec<StepTiming>,
    step_fn: F,
) -> Result<GrayImage, OcrError>
where
    F: FnOnce(GrayImage) -> Result<GrayImage, OcrError>,
{
    let step_start = Instant::now();
    let result = step_fn(img)?;
    if result.dimensions() != dimensions {
        return Err(OcrError::ProcessingError(format!(
            "Step '{}' changed image size from {:?} to {:?}",
            name,
            dimensions,
            result.dimensions()
        )));
    }
    record(name, step_start, timings);
    Ok(result)
}

fn record(name: &'static str, step_start: Instant, timings: &mut Vec<StepTiming>) {
    timings.push(StepTiming {
        name,
        time_ms: step_start.elapsed().as_millis() as u64,
    });
}
