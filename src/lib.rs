use std::sync::{Arc, Mutex};

mod cards;
mod commands;
mod extraction;
mod view_state;

use cards::CardStore;
use extraction::{ApiKeyStore, ExtractionPipeline, OpenAiChat, TesseractOcr};
use view_state::ViewStateTracker;

pub struct AppState {
    pub store: Mutex<CardStore>,
    pub view_state: Mutex<ViewStateTracker>,
    pub api_keys: ApiKeyStore,
    pub pipeline: ExtractionPipeline,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize the card store
    let data_dir = CardStore::default_data_dir().expect("Failed to get data directory");
    let store = CardStore::open(&data_dir);

    // Initialize the extraction pipeline
    let model = OpenAiChat::new().expect("Failed to build HTTP client");
    let pipeline = ExtractionPipeline::new(Arc::new(TesseractOcr::new()), Arc::new(model));

    let state = AppState {
        store: Mutex::new(store),
        view_state: Mutex::new(ViewStateTracker::default()),
        api_keys: ApiKeyStore::new(data_dir),
        pipeline,
    };

    tauri::Builder::default()
        .manage(state)
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Collection commands
            commands::get_collection,
            commands::add_cards_from_text,
            commands::update_card,
            commands::toggle_star,
            commands::delete_card,
            commands::delete_folder,
            commands::rename_folder,
            // Extraction commands
            commands::extract_cards_from_image,
            commands::set_api_key,
            commands::has_api_key,
            commands::clear_api_key,
            // View state commands
            commands::record_expanded_folders,
            commands::folder_view_states,
            commands::toggle_star_filter,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
