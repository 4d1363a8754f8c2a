//! Folder-organized flashcard collection
//!
//! This module provides:
//! - Card and Collection models (the persisted shape)
//! - The JSON-file-backed card store with save-after-mutate semantics
//! - The `Q:`/`A:` bulk-text parser

pub mod models;
pub mod parser;
pub mod store;

pub use models::*;
pub use parser::parse_qa;
pub use store::{CardStore, StoreError};
