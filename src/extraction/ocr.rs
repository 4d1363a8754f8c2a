//! OCR collaborator seam

use std::path::Path;
use std::process::Command;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Failed to launch OCR engine: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("OCR failed on {0}")]
    Failed(String),

    #[error("OCR output is not valid UTF-8")]
    Encoding,
}

/// Image-to-text collaborator. The pipeline treats recognition as a black
/// box; implementations may shell out or link an engine directly.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &Path) -> Result<String, OcrError>;
}

/// Tesseract CLI backend: `tesseract <image> stdout -l <lang>`.
pub struct TesseractOcr {
    language: String,
}

impl TesseractOcr {
    pub fn new() -> Self {
        Self {
            language: "eng".to_string(),
        }
    }

    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &Path) -> Result<String, OcrError> {
        let output = Command::new("tesseract")
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::warn!(
                "tesseract failed on {}: {}",
                image.display(),
                stderr.trim()
            );
            return Err(OcrError::Failed(image.display().to_string()));
        }

        String::from_utf8(output.stdout).map_err(|_| OcrError::Encoding)
    }
}
