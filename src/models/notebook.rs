// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Notebook state management.
//!
//! [`NotesManager`] owns the notes, the categories they are filed under and
//! the set of categories currently visible in the notes list. It keeps the
//! three mutually consistent and writes each one through the injected
//! [`Storage`] whenever it changes.
//!
//! Invalid requests are never errors: every operation reports an
//! [`Outcome`] saying whether it was applied, had nothing to do, or was
//! rejected (and why).

use super::history::History;
use super::note::{Note, GENERAL};
use crate::io::storage::{Storage, StorageKey};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Why a requested change was not applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("note text is empty")]
    EmptyText,

    #[error("no paused playback time to attach the note to")]
    MissingTimestamp,

    #[error("category name is empty")]
    EmptyName,

    #[error("category {0:?} already exists")]
    DuplicateCategory(String),

    #[error("category {0:?} does not exist")]
    UnknownCategory(String),

    #[error("category {0:?} cannot be deleted")]
    ProtectedCategory(String),

    #[error("note not found")]
    NoteNotFound,
}

/// Result of a notebook operation.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed.
    Applied,
    /// Request was valid but there was nothing to change.
    Unchanged,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }
}

fn reject(reason: Rejection) -> Outcome {
    log::debug!("Rejected: {}", reason);
    Outcome::Rejected(reason)
}

/// Notebook contents as exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotebookData {
    pub notes: Vec<Note>,
    pub categories: Vec<String>,
    pub filters: Vec<String>,
}

impl Default for NotebookData {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            categories: vec![GENERAL.to_string()],
            filters: vec![GENERAL.to_string()],
        }
    }
}

impl NotebookData {
    /// Restore the notebook invariants in place.
    ///
    /// Duplicate categories are dropped, categories referenced by notes are
    /// appended, and filters naming unknown categories are dropped. An empty
    /// category list gets `General` back. Returns `true` if anything had to
    /// change.
    pub fn normalize(&mut self) -> bool {
        let before = self.clone();

        let mut seen = HashSet::new();
        self.categories.retain(|c| seen.insert(c.clone()));
        if self.categories.is_empty() {
            self.categories.push(GENERAL.to_string());
        }
        for note in &self.notes {
            if !self.categories.contains(&note.category) {
                self.categories.push(note.category.clone());
            }
        }

        let categories = &self.categories;
        let mut seen = HashSet::new();
        self.filters
            .retain(|f| categories.contains(f) && seen.insert(f.clone()));

        *self != before
    }
}

/// Full notebook state, including the input selection, kept for undo/redo.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub notes: Vec<Note>,
    pub categories: Vec<String>,
    pub filters: Vec<String>,
    pub selected_category: String,
}

/// Owns categories, notes and filters and persists them.
pub struct NotesManager {
    notes: Vec<Note>,
    categories: Vec<String>,
    filters: Vec<String>,
    /// Category new notes are filed under
    selected_category: String,
    storage: Box<dyn Storage>,
    history: History,
}

impl NotesManager {
    /// Rehydrate a notebook from storage, falling back to defaults for
    /// anything missing or unreadable.
    pub fn load(storage: Box<dyn Storage>, history_limit: usize) -> Self {
        let defaults = NotebookData::default();
        let mut data = NotebookData {
            notes: read_entry(storage.as_ref(), StorageKey::Notes).unwrap_or(defaults.notes),
            categories: read_entry(storage.as_ref(), StorageKey::Categories)
                .unwrap_or(defaults.categories),
            filters: read_entry(storage.as_ref(), StorageKey::Filters).unwrap_or(defaults.filters),
        };
        if data.normalize() {
            log::warn!("Stored notebook state was inconsistent and has been repaired");
        }

        log::info!(
            "Loaded {} notes in {} categories",
            data.notes.len(),
            data.categories.len()
        );

        let selected_category = fallback_selection(&data.categories);
        Self {
            notes: data.notes,
            categories: data.categories,
            filters: data.filters,
            selected_category,
            storage,
            history: History::new(history_limit),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    pub fn is_filter_selected(&self, category: &str) -> bool {
        self.filters.iter().any(|c| c == category)
    }

    pub fn all_filters_selected(&self) -> bool {
        self.categories.iter().all(|c| self.is_filter_selected(c))
    }

    /// Short label for the filter menu: `All`, or the number of visible categories.
    pub fn filter_label(&self) -> String {
        if self.all_filters_selected() {
            "All".to_string()
        } else {
            format!("({})", self.filters.len())
        }
    }

    /// Notes in visible categories, in the order they were added.
    pub fn filtered_notes(&self) -> impl Iterator<Item = &Note> + '_ {
        self.notes
            .iter()
            .filter(move |note| self.is_filter_selected(&note.category))
    }

    /// Current contents for export.
    pub fn data(&self) -> NotebookData {
        NotebookData {
            notes: self.notes.clone(),
            categories: self.categories.clone(),
            filters: self.filters.clone(),
        }
    }

    /// Add a note at the paused playback position.
    pub fn add_note(&mut self, text: &str, category: &str, time_in_seconds: Option<f64>) -> Outcome {
        let text = text.trim();
        if text.is_empty() {
            return reject(Rejection::EmptyText);
        }
        let Some(time) = time_in_seconds.filter(|t| t.is_finite() && *t >= 0.0) else {
            return reject(Rejection::MissingTimestamp);
        };
        if !self.has_category(category) {
            return reject(Rejection::UnknownCategory(category.to_string()));
        }

        let before = self.snapshot();
        let note = Note::new(text.to_string(), category.to_string(), time);
        log::info!("Added note at {} in {}: {}", note.timestamp, note.category, note.text);
        self.notes.push(note);
        self.commit(before, &[StorageKey::Notes])
    }

    /// Add a category, make it visible and select it for new notes.
    pub fn add_category(&mut self, name: &str) -> Outcome {
        let name = name.trim();
        if name.is_empty() {
            return reject(Rejection::EmptyName);
        }
        if self.has_category(name) {
            return reject(Rejection::DuplicateCategory(name.to_string()));
        }

        let before = self.snapshot();
        self.categories.push(name.to_string());
        self.filters.push(name.to_string());
        self.selected_category = name.to_string();
        log::info!("Added category: {}", name);
        self.commit(before, &[StorageKey::Categories, StorageKey::Filters])
    }

    /// Rename a category and relabel its notes.
    pub fn rename_category(&mut self, old_name: &str, new_name: &str) -> Outcome {
        let new_name = new_name.trim();
        if !self.has_category(old_name) {
            return reject(Rejection::UnknownCategory(old_name.to_string()));
        }
        if new_name.is_empty() {
            return reject(Rejection::EmptyName);
        }
        if new_name == old_name {
            return Outcome::Unchanged;
        }
        if self.has_category(new_name) {
            return reject(Rejection::DuplicateCategory(new_name.to_string()));
        }

        let before = self.snapshot();
        let mut changed = vec![StorageKey::Categories];

        for category in self.categories.iter_mut().filter(|c| c.as_str() == old_name) {
            *category = new_name.to_string();
        }
        if let Some(filter) = self.filters.iter_mut().find(|c| c.as_str() == old_name) {
            *filter = new_name.to_string();
            changed.push(StorageKey::Filters);
        }
        let mut relabeled = 0;
        for note in self.notes.iter_mut().filter(|n| n.category == old_name) {
            note.category = new_name.to_string();
            relabeled += 1;
        }
        if relabeled > 0 {
            changed.push(StorageKey::Notes);
        }
        if self.selected_category == old_name {
            self.selected_category = new_name.to_string();
        }

        log::info!(
            "Changed category name from {} to {} ({} notes relabeled)",
            old_name,
            new_name,
            relabeled
        );
        self.commit(before, &changed)
    }

    /// Delete a category together with all of its notes.
    ///
    /// `General` is protected, and so is the last remaining category (which
    /// can only happen after `General` was renamed).
    pub fn delete_category(&mut self, name: &str) -> Outcome {
        if name == GENERAL {
            return reject(Rejection::ProtectedCategory(name.to_string()));
        }
        if !self.has_category(name) {
            return reject(Rejection::UnknownCategory(name.to_string()));
        }
        if self.categories.len() == 1 {
            return reject(Rejection::ProtectedCategory(name.to_string()));
        }

        let before = self.snapshot();
        let mut changed = vec![StorageKey::Categories];

        self.categories.retain(|c| c != name);

        let filter_count = self.filters.len();
        self.filters.retain(|c| c != name);
        if self.filters.len() != filter_count {
            changed.push(StorageKey::Filters);
        }

        let note_count = self.notes.len();
        self.notes.retain(|n| n.category != name);
        let removed = note_count - self.notes.len();
        if removed > 0 {
            changed.push(StorageKey::Notes);
        }

        if self.selected_category == name {
            self.selected_category = fallback_selection(&self.categories);
        }

        log::info!("Deleted category {} and {} notes", name, removed);
        self.commit(before, &changed)
    }

    /// Delete the first note equal to `note`.
    pub fn delete_note(&mut self, note: &Note) -> Outcome {
        let Some(index) = self.notes.iter().position(|n| n == note) else {
            return reject(Rejection::NoteNotFound);
        };

        let before = self.snapshot();
        let removed = self.notes.remove(index);
        log::info!("Deleted note: {}", removed.text);
        self.commit(before, &[StorageKey::Notes])
    }

    /// Show a hidden category, or hide a visible one.
    pub fn toggle_filter(&mut self, category: &str) -> Outcome {
        if !self.has_category(category) {
            return reject(Rejection::UnknownCategory(category.to_string()));
        }

        let before = self.snapshot();
        if let Some(index) = self.filters.iter().position(|c| c == category) {
            self.filters.remove(index);
            log::info!("Deselected category: {}", category);
        } else {
            self.filters.push(category.to_string());
            log::info!("Selected category: {}", category);
        }
        self.commit(before, &[StorageKey::Filters])
    }

    /// Make every category visible.
    pub fn select_all_filters(&mut self) -> Outcome {
        if self.all_filters_selected() {
            return Outcome::Unchanged;
        }

        let before = self.snapshot();
        self.filters = self.categories.clone();
        log::info!("Selected all categories");
        self.commit(before, &[StorageKey::Filters])
    }

    /// Choose the category new notes are filed under.
    pub fn select_category(&mut self, name: &str) -> Outcome {
        if !self.has_category(name) {
            return reject(Rejection::UnknownCategory(name.to_string()));
        }
        if self.selected_category == name {
            return Outcome::Unchanged;
        }
        self.selected_category = name.to_string();
        Outcome::Applied
    }

    /// Replace the whole notebook, e.g. with imported data.
    pub fn replace(&mut self, mut data: NotebookData) -> Outcome {
        if data.normalize() {
            log::warn!("Imported notebook was inconsistent and has been repaired");
        }

        let before = self.snapshot();
        if !data.categories.contains(&self.selected_category) {
            self.selected_category = fallback_selection(&data.categories);
        }
        log::info!(
            "Replaced notebook with {} notes in {} categories",
            data.notes.len(),
            data.categories.len()
        );
        self.notes = data.notes;
        self.categories = data.categories;
        self.filters = data.filters;
        self.commit(before, &StorageKey::ALL)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restore the state from before the last applied change.
    pub fn undo(&mut self) -> Outcome {
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(previous) => {
                self.restore(previous);
                log::info!("Undo");
                Outcome::Applied
            }
            None => Outcome::Unchanged,
        }
    }

    /// Re-apply the last undone change.
    pub fn redo(&mut self) -> Outcome {
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                log::info!("Redo");
                Outcome::Applied
            }
            None => Outcome::Unchanged,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            notes: self.notes.clone(),
            categories: self.categories.clone(),
            filters: self.filters.clone(),
            selected_category: self.selected_category.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.notes = snapshot.notes;
        self.categories = snapshot.categories;
        self.filters = snapshot.filters;
        self.selected_category = snapshot.selected_category;
        for key in StorageKey::ALL {
            self.persist(key);
        }
    }

    fn commit(&mut self, before: Snapshot, changed: &[StorageKey]) -> Outcome {
        self.history.push(before);
        for key in changed {
            self.persist(*key);
        }
        Outcome::Applied
    }

    /// Write one collection. Failures are logged and the in-memory state kept.
    fn persist(&mut self, key: StorageKey) {
        let encoded = match key {
            StorageKey::Notes => serde_json::to_string(&self.notes),
            StorageKey::Categories => serde_json::to_string(&self.categories),
            StorageKey::Filters => serde_json::to_string(&self.filters),
        };

        match encoded {
            Ok(json) => {
                if let Err(e) = self.storage.write(key, &json) {
                    log::error!("Failed to persist {}: {}", key.as_str(), e);
                }
            }
            Err(e) => log::error!("Failed to encode {}: {}", key.as_str(), e),
        }
    }
}

/// `General` when it exists, otherwise the first category.
fn fallback_selection(categories: &[String]) -> String {
    if categories.iter().any(|c| c == GENERAL) {
        GENERAL.to_string()
    } else {
        categories.first().cloned().unwrap_or_else(|| GENERAL.to_string())
    }
}

fn read_entry<T: DeserializeOwned>(storage: &dyn Storage, key: StorageKey) -> Option<T> {
    match storage.read(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring unreadable {}: {}", key.as_str(), e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            log::warn!("Failed to load {}: {}", key.as_str(), e);
            None
        }
    }
}
