use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Image file '{}' not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to process image: {0}")]
    ProcessingError(String),

    #[error("Failed to initialize OCR engine: {0}")]
    InitializationError(String),

    #[error("Failed to write text to '{}': {source}", path.display())]
    OutputError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OcrError {
    /// Message shown to the user at the top-level error boundary
    pub fn user_message(&self) -> String {
        match self {
            OcrError::FileNotFound(_) => format!("Error: {}", self),
            _ => format!("Error processing image: {}", self),
        }
    }
}
