use crate::Args;
use std::fmt;
use std::path::PathBuf;

/// Run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub image_path: PathBuf,
    pub output_path: Option<PathBuf>,
    #[cfg_attr(not(feature = "engine-tesseract"), allow(dead_code))]
    pub tessdata_path: Option<String>,
    pub recognizer: RecognizerConfig,
    pub preprocessing: PreprocessingConfig,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            image_path: args.image_path,
            output_path: args.output,
            tessdata_path: args.tessdata_path,
            recognizer: RecognizerConfig {
                language: args.language,
                engine_mode: args.oem,
                page_seg_mode: args.psm,
            },
            preprocessing: PreprocessingConfig::default(),
        }
    }
}

/// Settings handed to the OCR engine on every recognize call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizerConfig {
    /// Tesseract language code(s), `+`-joined (e.g. "eng", "eng+fra")
    pub language: String,
    /// Tesseract OCR engine mode (0-3)
    pub engine_mode: u8,
    /// Tesseract page segmentation mode (0-13)
    pub page_seg_mode: u8,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        // Combined legacy + LSTM, one uniform block of text
        Self {
            language: "eng".to_string(),
            engine_mode: 3,
            page_seg_mode: 6,
        }
    }
}

impl RecognizerConfig {
    /// Individual language codes making up `language`
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.language.split('+').filter(|lang| !lang.is_empty())
    }
}

impl fmt::Display for RecognizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "--oem {} --psm {} -l {}",
            self.engine_mode, self.page_seg_mode, self.language
        )
    }
}

/// Parameters of the fixed preprocessing chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessingConfig {
    /// Side of the Gaussian neighbourhood used by adaptive thresholding (odd)
    pub block_size: u32,
    /// Subtracted from the local mean before comparison
    pub c: i16,
    /// Structuring element used for the opening
    pub open_kernel: (u8, u8),
    /// Structuring element used for the final dilation
    pub dilate_kernel: (u8, u8),
    pub dilate_iterations: u32,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            block_size: 11,
            c: 2,
            open_kernel: (1, 1),
            dilate_kernel: (2, 2),
            dilate_iterations: 1,
        }
    }
}
