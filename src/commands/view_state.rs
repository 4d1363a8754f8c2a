//! Tauri commands for per-folder view state

use std::collections::HashMap;

use tauri::State;

use crate::view_state::FolderView;
use crate::AppState;

use super::cards::CommandError;

type CommandResult<T> = Result<T, CommandError>;

/// Record the expanded/collapsed flags the frontend scraped immediately
/// before tearing the folder list down
#[tauri::command]
pub fn record_expanded_folders(state: State<AppState>, expanded: HashMap<String, bool>) {
    let mut view_state = state.view_state.lock().unwrap();
    view_state.record_expanded(expanded);
}

/// Per-folder view flags, consulted while the folder list is rebuilt
#[tauri::command]
pub fn folder_view_states(state: State<AppState>) -> CommandResult<HashMap<String, FolderView>> {
    let store = state.store.lock().unwrap();
    let view_state = state.view_state.lock().unwrap();
    Ok(store
        .collection()
        .keys()
        .map(|folder| (folder.clone(), view_state.folder_view(folder)))
        .collect())
}

/// Flip a folder's starred-only filter; returns the new value
#[tauri::command]
pub fn toggle_star_filter(state: State<AppState>, folder: String) -> bool {
    let mut view_state = state.view_state.lock().unwrap();
    view_state.toggle_star_filter(&folder)
}
