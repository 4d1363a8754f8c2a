//! Session-only per-folder view state
//!
//! The frontend tears the folder list down and rebuilds it from the
//! collection on every mutation, so any transient display state has to be
//! captured before teardown and reapplied after. Two flags are tracked per
//! folder: expanded/collapsed (derived by the frontend and handed back in)
//! and the starred-only filter (owned here). Neither survives a restart.

use std::collections::HashMap;

use serde::Serialize;

/// View flags for one folder, as consumed by the frontend during a rebuild.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderView {
    pub expanded: bool,
    pub starred_only: bool,
}

#[derive(Debug, Default)]
pub struct ViewStateTracker {
    expanded: HashMap<String, bool>,
    star_filters: HashMap<String, bool>,
}

impl ViewStateTracker {
    /// Replace the expanded map with the snapshot the frontend scraped
    /// immediately before teardown. Folders absent from the snapshot are
    /// collapsed.
    pub fn record_expanded(&mut self, snapshot: HashMap<String, bool>) {
        self.expanded = snapshot;
    }

    pub fn set_expanded(&mut self, folder: &str, expanded: bool) {
        self.expanded.insert(folder.to_string(), expanded);
    }

    /// Unknown folders start collapsed.
    pub fn is_expanded(&self, folder: &str) -> bool {
        self.expanded.get(folder).copied().unwrap_or(false)
    }

    pub fn snapshot(&self) -> HashMap<String, bool> {
        self.expanded.clone()
    }

    /// Flip a folder's starred-only filter and return the new value.
    /// Unknown folders start from off.
    pub fn toggle_star_filter(&mut self, folder: &str) -> bool {
        let flag = self.star_filters.entry(folder.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn star_filter(&self, folder: &str) -> bool {
        self.star_filters.get(folder).copied().unwrap_or(false)
    }

    pub fn folder_view(&self, folder: &str) -> FolderView {
        FolderView {
            expanded: self.is_expanded(folder),
            starred_only: self.star_filter(folder),
        }
    }

    /// Move both flags to the new key. When the destination already has an
    /// entry (a merge rename) the destination's flags win and the source
    /// entries are dropped.
    pub fn rename_folder(&mut self, old: &str, new: &str) {
        if let Some(flag) = self.expanded.remove(old) {
            self.expanded.entry(new.to_string()).or_insert(flag);
        }
        if let Some(flag) = self.star_filters.remove(old) {
            self.star_filters.entry(new.to_string()).or_insert(flag);
        }
    }

    /// Drop both flags, so a folder later re-created under the same name
    /// starts collapsed with the filter off.
    pub fn remove_folder(&mut self, folder: &str) {
        self.expanded.remove(folder);
        self.star_filters.remove(folder);
    }
}
