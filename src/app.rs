use crate::config::Config;
use crate::engine::OcrEngine;
use crate::error::OcrError;
use crate::loader;
use crate::preprocessing::Pipeline;
use crate::report;
use std::io::Write;
use std::time::Instant;

/// Run the whole pipeline for one image and return the recognized text.
///
/// The existence check happens before anything else; the engine is only
/// initialized once the image has been loaded and preprocessed.
pub fn run<F, W>(config: &Config, init_engine: F, out: &mut W) -> Result<String, OcrError>
where
    F: FnOnce(&Config) -> Result<Box<dyn OcrEngine>, OcrError>,
    W: Write,
{
    let start = Instant::now();
    loader::ensure_exists(&config.image_path)?;

    writeln!(out, "Processing image: {}", config.image_path.display())?;

    let image = loader::load(&config.image_path)?;
    let preprocessed = Pipeline::new(config.preprocessing.clone()).process(&image)?;
    for step in &preprocessed.steps {
        tracing::debug!("Step {} took {}ms", step.name, step.time_ms);
    }

    let engine = init_engine(config)?;
    let text = engine.recognize(&preprocessed.image, &config.recognizer)?;

    report::print_text(out, &text)?;

    if let Some(output_path) = &config.output_path {
        report::save_text(output_path, &text)?;
        writeln!(out, "Text saved to: {}", output_path.display())?;
    }

    tracing::info!(
        "OCR completed in {}ms (preprocessing {}ms, engine {}), text length: {}",
        start.elapsed().as_millis(),
        preprocessed.total_time_ms,
        engine.name(),
        text.len()
    );

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PreprocessingConfig, RecognizerConfig};
    use image::{GrayImage, Rgb, RgbImage};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    /// What the mock engine saw on each call
    #[derive(Default)]
    struct Calls {
        images: Vec<GrayImage>,
        configs: Vec<RecognizerConfig>,
    }

    struct MockEngine {
        reply: Result<String, String>,
        calls: Rc<RefCell<Calls>>,
    }

    impl OcrEngine for MockEngine {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn recognize(
            &self,
            image: &GrayImage,
            config: &RecognizerConfig,
        ) -> Result<String, OcrError> {
            let mut calls = self.calls.borrow_mut();
            calls.images.push(image.clone());
            calls.configs.push(config.clone());
            self.reply.clone().map_err(OcrError::ProcessingError)
        }
    }

    fn mock(
        reply: Result<&str, &str>,
    ) -> (
        impl FnOnce(&Config) -> Result<Box<dyn OcrEngine>, OcrError>,
        Rc<RefCell<Calls>>,
    ) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let engine = MockEngine {
            reply: reply.map(str::to_string).map_err(str::to_string),
            calls: Rc::clone(&calls),
        };
        let init = move |_: &Config| Ok::<_, OcrError>(Box::new(engine) as Box<dyn OcrEngine>);
        (init, calls)
    }

    fn config_for(image_path: PathBuf, output_path: Option<PathBuf>) -> Config {
        Config {
            image_path,
            output_path,
            tessdata_path: None,
            recognizer: RecognizerConfig::default(),
            preprocessing: PreprocessingConfig::default(),
        }
    }

    fn write_page(dir: &Path, width: u32, height: u32) -> PathBuf {
        let path = dir.join("page.png");
        RgbImage::from_fn(width, height, |x, y| {
            if (5..15).contains(&y) && x % 7 < 3 {
                Rgb([20, 20, 60])
            } else {
                Rgb([235, 230, 220])
            }
        })
        .save(&path)
        .unwrap();
        path
    }

    #[test]
    fn test_missing_file_never_reaches_engine() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path().join("missing.png"), None);
        let (init, calls) = mock(Ok("unused"));
        let mut out = Vec::new();

        let err = run(&config, init, &mut out).unwrap_err();

        assert!(matches!(err, OcrError::FileNotFound(_)));
        assert!(calls.borrow().images.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_file_never_initializes_engine() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path().join("missing.png"), None);
        let mut initialized = false;

        let result = run(
            &config,
            |_| {
                initialized = true;
                Err(OcrError::InitializationError("unreachable".to_string()))
            },
            &mut Vec::new(),
        );

        assert!(matches!(result, Err(OcrError::FileNotFound(_))));
        assert!(!initialized);
    }

    #[test]
    fn test_engine_receives_binary_image_and_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(write_page(dir.path(), 40, 20), None);
        config.recognizer.page_seg_mode = 7;
        let (init, calls) = mock(Ok("hello"));

        run(&config, init, &mut Vec::new()).unwrap();

        let calls = calls.borrow();
        assert_eq!(calls.images.len(), 1);
        assert_eq!(calls.images[0].dimensions(), (40, 20));
        assert!(calls.images[0].pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        assert_eq!(calls.configs[0].page_seg_mode, 7);
        assert_eq!(calls.configs[0].language, "eng");
    }

    #[test]
    fn test_output_file_matches_printed_text() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("text.txt");
        let config = config_for(write_page(dir.path(), 40, 20), Some(output.clone()));
        let (init, _) = mock(Ok("Meet at noon\nby the old oak"));
        let mut out = Vec::new();

        let text = run(&config, init, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        let delimiter = "-".repeat(50);
        let between: Vec<&str> = printed.split(&delimiter).collect();
        assert_eq!(between.len(), 3);
        assert_eq!(between[1].trim_matches('\n'), text);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), text);
        assert!(printed.starts_with("Processing image: "));
        assert!(printed.contains(&format!("Text saved to: {}", output.display())));
    }

    #[test]
    fn test_no_output_path_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(write_page(dir.path(), 40, 20), None);
        let (init, _) = mock(Ok("text"));

        run(&config, init, &mut Vec::new()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_engine_failure_propagates_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("text.txt");
        let config = config_for(write_page(dir.path(), 40, 20), Some(output.clone()));
        let (init, _) = mock(Err("engine state unreadable"));
        let mut out = Vec::new();

        let err = run(&config, init, &mut out).unwrap_err();

        assert!(matches!(err, OcrError::ProcessingError(_)));
        assert!(!output.exists());
        assert!(!String::from_utf8(out).unwrap().contains("Extracted Text:"));
    }

    #[test]
    fn test_undecodable_image_fails_before_engine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"\x89PNG but truncated").unwrap();
        let config = config_for(path, None);
        let (init, calls) = mock(Ok("unused"));

        let err = run(&config, init, &mut Vec::new()).unwrap_err();

        assert!(matches!(err, OcrError::DecodeError(_)));
        assert!(calls.borrow().images.is_empty());
    }

    #[test]
    fn test_single_pixel_image_completes() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(write_page(dir.path(), 1, 1), None);
        let (init, calls) = mock(Ok(""));

        let text = run(&config, init, &mut Vec::new()).unwrap();

        assert!(text.is_empty());
        assert_eq!(calls.borrow().images[0].dimensions(), (1, 1));
    }
}
