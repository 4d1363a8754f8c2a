//! Data models for the card collection

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One flashcard: a question/answer pair with star and tag metadata.
///
/// `question` and `answer` are non-empty after trimming; every construction
/// path (parser, extraction normalization, edits) enforces that before a
/// card reaches the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Card {
    pub fn new(question: &str, answer: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            question: question.trim().to_string(),
            answer: answer.trim().to_string(),
            starred: false,
            tags: Vec::new(),
        }
    }
}

/// The whole collection: folder name → ordered card sequence.
///
/// Folder names are case-sensitive user strings. The map keeps insertion
/// order so folders render in the order they were created, matching the
/// persisted JSON object.
pub type Collection = IndexMap<String, Vec<Card>>;

/// Folder used when the caller leaves the folder name blank.
pub const DEFAULT_FOLDER: &str = "General";

/// Resolve a caller-supplied folder name, falling back to the default.
pub fn folder_or_default(folder: Option<&str>) -> String {
    match folder.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_FOLDER.to_string(),
    }
}

/// One element of the language-model response: a bare question/answer pair
/// before normalization. Extra fields in the response are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}
