//! Persistence and mutation for the card collection
//!
//! The whole collection lives in one `cards.json` file under the data
//! directory. Every mutating operation writes the file before returning, so
//! the persisted state never lags a logical mutation.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use super::models::{folder_or_default, Card, Collection};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Card not found: {0}")]
    CardNotFound(Uuid),

    #[error("{0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage manager for the folder → cards collection
pub struct CardStore {
    /// Path to cards.json
    path: PathBuf,
    collection: Collection,
}

impl CardStore {
    /// Open the store rooted at a data directory. Missing or unparsable
    /// data yields an empty collection, never an error; a corrupt file is
    /// left on disk until the next save overwrites it.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join("cards.json");
        let collection = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(collection) => collection,
                Err(e) => {
                    log::warn!("Ignoring unparsable {}: {}", path.display(), e);
                    Collection::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Collection::new(),
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                Collection::new()
            }
        };
        Self { path, collection }
    }

    /// Default data directory (e.g., ~/.local/share/cardbox)
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|dir| dir.join("cardbox"))
            .ok_or_else(|| StoreError::Io(std::io::Error::other("no local data directory")))
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Write the whole collection: temp file in the same directory, then
    /// rename over the old file.
    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&self.collection)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Append cards to a folder, creating the folder if absent. Existing
    /// cards keep their positions; new cards follow in input order. A blank
    /// folder name falls back to the default folder.
    pub fn add_cards(&mut self, folder: &str, cards: Vec<Card>) -> Result<()> {
        if cards.is_empty() {
            return Ok(());
        }
        let folder = folder_or_default(Some(folder));
        self.collection.entry(folder).or_default().extend(cards);
        self.save()
    }

    /// Replace a card's question and answer in place. Order, id, starred and
    /// tags are untouched. Empty fields after trimming are rejected.
    pub fn update_card(
        &mut self,
        folder: &str,
        id: Uuid,
        question: &str,
        answer: &str,
    ) -> Result<Card> {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() || answer.is_empty() {
            return Err(StoreError::Validation(
                "Both question and answer are required".to_string(),
            ));
        }

        let card = self.card_mut(folder, id)?;
        card.question = question.to_string();
        card.answer = answer.to_string();
        let card = card.clone();
        self.save()?;
        Ok(card)
    }

    /// Flip a card's star. An unknown folder or id is an error rather than a
    /// silent no-op, so state-corruption bugs surface.
    pub fn toggle_star(&mut self, folder: &str, id: Uuid) -> Result<Card> {
        let card = self.card_mut(folder, id)?;
        card.starred = !card.starred;
        let card = card.clone();
        self.save()?;
        Ok(card)
    }

    /// Remove the matching card. Idempotent: an absent folder or id is a
    /// successful no-op and nothing is written.
    pub fn delete_card(&mut self, folder: &str, id: Uuid) -> Result<()> {
        let Some(cards) = self.collection.get_mut(folder) else {
            return Ok(());
        };
        let before = cards.len();
        cards.retain(|c| c.id != id);
        if cards.len() == before {
            return Ok(());
        }
        self.save()
    }

    /// Remove a folder and all its cards. Idempotent when absent.
    pub fn delete_folder(&mut self, folder: &str) -> Result<()> {
        if self.collection.shift_remove(folder).is_none() {
            return Ok(());
        }
        self.save()
    }

    /// Rename a folder. When the new name already exists the two card
    /// sequences are merged, destination's cards first; the destination is
    /// never overwritten.
    pub fn rename_folder(&mut self, old: &str, new: &str) -> Result<()> {
        let new = new.trim();
        if new.is_empty() {
            return Err(StoreError::Validation(
                "Folder name cannot be empty".to_string(),
            ));
        }
        if new == old {
            return Err(StoreError::Validation(
                "New folder name must differ from the current one".to_string(),
            ));
        }
        let cards = self
            .collection
            .shift_remove(old)
            .ok_or_else(|| StoreError::FolderNotFound(old.to_string()))?;
        self.collection.entry(new.to_string()).or_default().extend(cards);
        self.save()
    }

    fn card_mut(&mut self, folder: &str, id: Uuid) -> Result<&mut Card> {
        let cards = self
            .collection
            .get_mut(folder)
            .ok_or_else(|| StoreError::FolderNotFound(folder.to_string()))?;
        cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::CardNotFound(id))
    }
}
