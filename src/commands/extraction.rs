//! Tauri commands for image extraction and credential management

use std::path::Path;

use tauri::State;

use crate::cards::{folder_or_default, Card};
use crate::extraction::{CredentialError, ExtractionError};
use crate::AppState;

use super::cards::CommandError;

impl From<ExtractionError> for CommandError {
    fn from(err: ExtractionError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl From<CredentialError> for CommandError {
    fn from(err: CredentialError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

type CommandResult<T> = Result<T, CommandError>;

/// Run the extraction pipeline on an image and append the resulting cards
/// to a folder. An explicit API key wins over the stored one. The store is
/// only touched after the pipeline succeeds, so a failed run leaves the
/// collection unchanged.
#[tauri::command]
pub async fn extract_cards_from_image(
    state: State<'_, AppState>,
    folder: Option<String>,
    image_path: String,
    api_key: Option<String>,
) -> CommandResult<Vec<Card>> {
    let key = api_key
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .or_else(|| state.api_keys.get());

    let cards = state
        .pipeline
        .extract(Some(Path::new(&image_path)), key.as_deref())
        .await?;

    let folder = folder_or_default(folder.as_deref());
    let mut store = state.store.lock().unwrap();
    store.add_cards(&folder, cards.clone())?;
    Ok(cards)
}

/// Store the OpenAI API key
#[tauri::command]
pub fn set_api_key(state: State<AppState>, key: String) -> CommandResult<()> {
    state.api_keys.set(&key).map_err(Into::into)
}

/// Whether a usable API key is stored
#[tauri::command]
pub fn has_api_key(state: State<AppState>) -> bool {
    state.api_keys.get().is_some()
}

/// Remove the stored API key
#[tauri::command]
pub fn clear_api_key(state: State<AppState>) -> CommandResult<()> {
    state.api_keys.clear().map_err(Into::into)
}
