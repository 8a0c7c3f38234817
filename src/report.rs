use crate::error::OcrError;
use std::io::Write;
use std::path::Path;

const DELIMITER_WIDTH: usize = 50;

/// Print the extracted text between delimiter lines
pub fn print_text<W: Write>(out: &mut W, text: &str) -> Result<(), OcrError> {
    let delimiter = "-".repeat(DELIMITER_WIDTH);
    writeln!(out, "\nExtracted Text:")?;
    writeln!(out, "{}", delimiter)?;
    writeln!(out, "{}", text)?;
    writeln!(out, "{}", delimiter)?;
    Ok(())
}

/// Write the text as UTF-8, replacing any existing file
pub fn save_text(path: &Path, text: &str) -> Result<(), OcrError> {
    std::fs::write(path, text.as_bytes()).map_err(|source| OcrError::OutputError {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}
