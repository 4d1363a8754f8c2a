//! Image → OCR → language-model extraction pipeline
//!
//! This module provides:
//! - The OCR and chat-model collaborator seams with production backends
//! - API key storage (file-based with keyring mirror)
//! - The fail-fast pipeline turning an image into normalized cards

pub mod credentials;
pub mod llm;
pub mod ocr;
pub mod pipeline;

pub use credentials::{ApiKeyStore, CredentialError};
pub use llm::{ChatModel, LlmError, OpenAiChat};
pub use ocr::{OcrEngine, OcrError, TesseractOcr};
pub use pipeline::{ExtractionError, ExtractionPipeline};
