//! Tauri commands for the card collection

use tauri::State;
use uuid::Uuid;

use crate::cards::{folder_or_default, parse_qa, Card, Collection, StoreError};
use crate::AppState;

#[derive(Debug, serde::Serialize)]
pub struct CommandError {
    pub message: String,
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

type CommandResult<T> = Result<T, CommandError>;

fn parse_card_id(card_id: &str) -> Result<Uuid, CommandError> {
    Uuid::parse_str(card_id).map_err(|e| CommandError {
        message: format!("Invalid card ID: {}", e),
    })
}

/// Full folder → cards mapping. The frontend rebuilds its whole view from
/// this after every mutation.
#[tauri::command]
pub fn get_collection(state: State<AppState>) -> CommandResult<Collection> {
    let store = state.store.lock().unwrap();
    Ok(store.collection().clone())
}

/// Parse `Q:`/`A:` bulk text and append the resulting cards to a folder
#[tauri::command]
pub fn add_cards_from_text(
    state: State<AppState>,
    folder: Option<String>,
    text: String,
) -> CommandResult<Vec<Card>> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CommandError {
            message: "Please enter some Q:/A: pairs".to_string(),
        });
    }

    let cards = parse_qa(text);
    if cards.is_empty() {
        return Err(CommandError {
            message: "No valid Q:/A: pairs found. Use format: Q: question A: answer".to_string(),
        });
    }

    let folder = folder_or_default(folder.as_deref());
    let mut store = state.store.lock().unwrap();
    store.add_cards(&folder, cards.clone())?;
    Ok(cards)
}

/// Edit a card's question and answer
#[tauri::command]
pub fn update_card(
    state: State<AppState>,
    folder: String,
    card_id: String,
    question: String,
    answer: String,
) -> CommandResult<Card> {
    let id = parse_card_id(&card_id)?;
    let mut store = state.store.lock().unwrap();
    store
        .update_card(&folder, id, &question, &answer)
        .map_err(Into::into)
}

/// Flip a card's star
#[tauri::command]
pub fn toggle_star(
    state: State<AppState>,
    folder: String,
    card_id: String,
) -> CommandResult<Card> {
    let id = parse_card_id(&card_id)?;
    let mut store = state.store.lock().unwrap();
    store.toggle_star(&folder, id).map_err(Into::into)
}

/// Delete a card. The frontend confirms first; a declined confirm never
/// reaches this command.
#[tauri::command]
pub fn delete_card(
    state: State<AppState>,
    folder: String,
    card_id: String,
) -> CommandResult<()> {
    let id = parse_card_id(&card_id)?;
    let mut store = state.store.lock().unwrap();
    store.delete_card(&folder, id).map_err(Into::into)
}

/// Delete a folder with all its cards, and drop its view state
#[tauri::command]
pub fn delete_folder(state: State<AppState>, folder: String) -> CommandResult<()> {
    {
        let mut store = state.store.lock().unwrap();
        store.delete_folder(&folder)?;
    }
    let mut view_state = state.view_state.lock().unwrap();
    view_state.remove_folder(&folder);
    Ok(())
}

/// Rename a folder, moving its view state with it
#[tauri::command]
pub fn rename_folder(
    state: State<AppState>,
    old_name: String,
    new_name: String,
) -> CommandResult<()> {
    {
        let mut store = state.store.lock().unwrap();
        store.rename_folder(&old_name, &new_name)?;
    }
    let mut view_state = state.view_state.lock().unwrap();
    view_state.rename_folder(&old_name, new_name.trim());
    Ok(())
}
