//! Image → cards orchestration
//!
//! Strict fail-fast sequence: missing image, OCR, missing credential,
//! model call, JSON decode, normalization. The pipeline never touches the
//! collection; the calling command appends the returned cards, so any
//! failure here leaves persisted state untouched. No step retries.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::cards::{Card, QaPair};

use super::llm::{ChatModel, LlmError};
use super::ocr::{OcrEngine, OcrError};

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Please upload an image")]
    MissingImage,

    #[error("Please enter your OpenAI API key")]
    MissingCredential,

    #[error("Text recognition failed: {0}")]
    Ocr(#[from] OcrError),

    #[error("LLM request failed: {0}")]
    Http(reqwest::Error),

    #[error("LLM request failed with status {status}")]
    RemoteStatus { status: u16 },

    #[error("LLM response is not a JSON array of question/answer objects")]
    MalformedResponse,
}

impl From<LlmError> for ExtractionError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http(e) => Self::Http(e),
            LlmError::Status { status } => Self::RemoteStatus { status },
            LlmError::Decode => Self::MalformedResponse,
        }
    }
}

pub struct ExtractionPipeline {
    ocr: Arc<dyn OcrEngine>,
    model: Arc<dyn ChatModel>,
}

impl ExtractionPipeline {
    pub fn new(ocr: Arc<dyn OcrEngine>, model: Arc<dyn ChatModel>) -> Self {
        Self { ocr, model }
    }

    /// Run the whole image → cards sequence. The first failing step
    /// returns; nothing downstream runs.
    pub async fn extract(
        &self,
        image: Option<&Path>,
        api_key: Option<&str>,
    ) -> Result<Vec<Card>, ExtractionError> {
        let image = image.ok_or(ExtractionError::MissingImage)?.to_path_buf();

        // The CLI engine blocks, so it runs off the async runtime
        let ocr = Arc::clone(&self.ocr);
        let text = tauri::async_runtime::spawn_blocking(move || ocr.recognize(&image))
            .await
            .map_err(|e| OcrError::Spawn(std::io::Error::other(e)))??;

        let api_key = match api_key.map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => return Err(ExtractionError::MissingCredential),
        };

        let prompt = format!(
            "Convert this text into JSON array of objects with 'question' and 'answer' properties: {text}"
        );
        let content = self.model.complete(api_key, &prompt).await?;

        let pairs: Vec<QaPair> = serde_json::from_str(&content).map_err(|e| {
            log::warn!("LLM returned unparsable card JSON: {}", e);
            ExtractionError::MalformedResponse
        })?;

        Ok(normalize(pairs))
    }
}

/// Trim both sides, drop pairs left empty on either side, and mint cards
/// with fresh ids and default metadata.
fn normalize(pairs: Vec<QaPair>) -> Vec<Card> {
    pairs
        .iter()
        .filter(|pair| !pair.question.trim().is_empty() && !pair.answer.trim().is_empty())
        .map(|pair| Card::new(&pair.question, &pair.answer))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    struct StubOcr {
        text: String,
        calls: AtomicUsize,
    }

    impl StubOcr {
        fn new(text: &str) -> Arc<Self> {
            Arc::new(Self {
                text: text.to_string(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl OcrEngine for StubOcr {
        fn recognize(&self, _image: &Path) -> Result<String, OcrError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.clone())
        }
    }

    struct StubModel {
        reply: Result<String, u16>,
        calls: AtomicUsize,
        last_prompt: Mutex<String>,
    }

    impl StubModel {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(String::new()),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(status),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(String::new()),
            })
        }
    }

    #[async_trait]
    impl ChatModel for StubModel {
        async fn complete(&self, _api_key: &str, prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = prompt.to_string();
            match &self.reply {
                Ok(content) => Ok(content.clone()),
                Err(status) => Err(LlmError::Status { status: *status }),
            }
        }
    }

    fn pipeline(ocr: Arc<StubOcr>, model: Arc<StubModel>) -> ExtractionPipeline {
        ExtractionPipeline::new(ocr, model)
    }

    #[tokio::test]
    async fn test_missing_image_fails_before_ocr() {
        let ocr = StubOcr::new("text");
        let model = StubModel::replying("[]");
        let err = pipeline(Arc::clone(&ocr), Arc::clone(&model))
            .extract(None, Some("key"))
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractionError::MissingImage));
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 0);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_checked_after_ocr_before_model() {
        let ocr = StubOcr::new("text");
        let model = StubModel::replying("[]");
        let err = pipeline(Arc::clone(&ocr), Arc::clone(&model))
            .extract(Some(Path::new("page.png")), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractionError::MissingCredential));
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 1);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_credential_is_missing() {
        let ocr = StubOcr::new("text");
        let model = StubModel::replying("[]");
        let err = pipeline(ocr, model)
            .extract(Some(Path::new("page.png")), Some("   "))
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractionError::MissingCredential));
    }

    #[tokio::test]
    async fn test_prompt_carries_recognized_text() {
        let ocr = StubOcr::new("recognized page text");
        let model = StubModel::replying("[]");
        pipeline(ocr, Arc::clone(&model))
            .extract(Some(Path::new("page.png")), Some("key"))
            .await
            .unwrap();

        let prompt = model.last_prompt.lock().unwrap().clone();
        assert!(prompt.starts_with("Convert this text into JSON array"));
        assert!(prompt.ends_with("recognized page text"));
    }

    #[tokio::test]
    async fn test_remote_failure_carries_status() {
        let ocr = StubOcr::new("text");
        let model = StubModel::failing(429);
        let err = pipeline(ocr, model)
            .extract(Some(Path::new("page.png")), Some("key"))
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractionError::RemoteStatus { status: 429 }));
    }

    #[tokio::test]
    async fn test_malformed_content_is_rejected() {
        let ocr = StubOcr::new("text");
        let model = StubModel::replying("Here are your cards: [not json]");
        let err = pipeline(ocr, model)
            .extract(Some(Path::new("page.png")), Some("key"))
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractionError::MalformedResponse));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_rejected() {
        let ocr = StubOcr::new("text");
        let model = StubModel::replying(r#"{ "question": "q", "answer": "a" }"#);
        let err = pipeline(ocr, model)
            .extract(Some(Path::new("page.png")), Some("key"))
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractionError::MalformedResponse));
    }

    #[tokio::test]
    async fn test_normalization_trims_and_drops_empty_pairs() {
        let ocr = StubOcr::new("text");
        let model = StubModel::replying(
            r#"[
                { "question": "  What is 2+2?  ", "answer": " 4 " },
                { "question": "   ", "answer": "orphan" },
                { "question": "orphan", "answer": "" }
            ]"#,
        );
        let cards = pipeline(ocr, model)
            .extract(Some(Path::new("page.png")), Some("key"))
            .await
            .unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "What is 2+2?");
        assert_eq!(cards[0].answer, "4");
        assert!(!cards[0].starred);
        assert!(cards[0].tags.is_empty());
    }

    #[tokio::test]
    async fn test_extra_response_fields_are_ignored() {
        let ocr = StubOcr::new("text");
        let model = StubModel::replying(
            r#"[{ "question": "q", "answer": "a", "difficulty": "easy" }]"#,
        );
        let cards = pipeline(ocr, model)
            .extract(Some(Path::new("page.png")), Some("key"))
            .await
            .unwrap();

        assert_eq!(cards.len(), 1);
    }
}
