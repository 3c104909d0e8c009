// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the notebook and the playback clock, draws
//! the panels, and applies the actions they report.

use crate::config::AppConfig;
use crate::models::note::GENERAL;
use crate::models::notebook::{NotesManager, Outcome};
use crate::models::playback::PlaybackClock;
use crate::ui::dialogs::{self, DialogResult, PendingDelete};
use crate::ui::notes_panel::{self, NotesAction, NotesPanelState};
use crate::ui::timeline::{self, TimelineAction};
use crate::util::time::format_timestamp;
use std::path::PathBuf;

/// Main application state.
pub struct NotesApp {
    /// Notes, categories and filters
    notebook: NotesManager,

    /// Playhead of the loaded media
    clock: PlaybackClock,

    /// File name of the loaded media, for display
    media_name: Option<String>,

    /// Notes panel text fields and edit modes
    panel: NotesPanelState,

    /// Deletion awaiting confirmation
    pending_delete: Option<PendingDelete>,

    /// Why the last request was ignored, shown in the status bar
    status: Option<String>,

    config: AppConfig,
}

impl NotesApp {
    /// Create a new application instance around a loaded notebook.
    pub fn new(notebook: NotesManager, config: AppConfig) -> Self {
        Self {
            notebook,
            clock: PlaybackClock::new(),
            media_name: None,
            panel: NotesPanelState::default(),
            pending_delete: None,
            status: None,
            config,
        }
    }

    /// Record the outcome of a notebook operation. Returns `true` if it was accepted.
    fn settle(&mut self, outcome: Outcome) -> bool {
        self.status = match &outcome {
            Outcome::Rejected(reason) => Some(reason.to_string()),
            Outcome::Applied | Outcome::Unchanged => None,
        };
        !outcome.is_rejected()
    }

    /// Apply an interaction reported by the notes panel.
    fn apply_notes_action(&mut self, action: NotesAction) {
        match action {
            NotesAction::None => {}
            NotesAction::AddNote(text) => {
                let category = self.notebook.selected_category().to_string();
                let outcome = self.notebook.add_note(&text, &category, self.clock.paused_at());
                if self.settle(outcome) {
                    self.panel.note_text.clear();
                    let _ = self.notebook.select_category(GENERAL);
                }
            }
            NotesAction::SelectCategory(name) => {
                let outcome = self.notebook.select_category(&name);
                self.settle(outcome);
            }
            NotesAction::AddCategory(name) => {
                let outcome = self.notebook.add_category(&name);
                if self.settle(outcome) {
                    self.panel.finish_add_category();
                }
            }
            NotesAction::RenameCategory { from, to } => {
                let outcome = self.notebook.rename_category(&from, &to);
                if self.settle(outcome) {
                    self.panel.finish_rename();
                }
            }
            NotesAction::RequestDeleteCategory(name) => {
                self.pending_delete = Some(PendingDelete::Category(name));
            }
            NotesAction::RequestDeleteNote(note) => {
                self.pending_delete = Some(PendingDelete::Note(note));
            }
            NotesAction::ToggleFilter(category) => {
                let outcome = self.notebook.toggle_filter(&category);
                self.settle(outcome);
            }
            NotesAction::SelectAllFilters => {
                let outcome = self.notebook.select_all_filters();
                self.settle(outcome);
            }
            NotesAction::Seek(seconds) => {
                log::info!("Seeked to timestamp: {}", format_timestamp(seconds));
                self.clock.seek_to(seconds);
            }
            NotesAction::ExportText => self.export_text(),
        }
    }

    fn apply_timeline_action(&mut self, action: TimelineAction) {
        match action {
            TimelineAction::None => {}
            TimelineAction::TogglePlay => self.clock.toggle(),
            TimelineAction::Seek(seconds) => self.clock.seek_to(seconds),
            TimelineAction::SetDuration(seconds) => self.clock.set_duration(seconds),
        }
    }

    fn confirm_delete(&mut self, pending: PendingDelete) {
        let outcome = match pending {
            PendingDelete::Category(name) => self.notebook.delete_category(&name),
            PendingDelete::Note(note) => self.notebook.delete_note(&note),
        };
        self.settle(outcome);
    }

    fn undo(&mut self) {
        let outcome = self.notebook.undo();
        self.settle(outcome);
    }

    fn redo(&mut self) {
        let outcome = self.notebook.redo();
        self.settle(outcome);
    }

    /// Open a media file and reset the playhead.
    fn open_media(&mut self, path: PathBuf) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        // Keep the previous length, or assume the configured one, until the user adjusts it
        let duration = self.clock.duration().unwrap_or(self.config.media_length);
        self.clock.load(duration);
        log::info!("Opened media: {}", path.display());
        self.media_name = Some(name);
    }

    /// Download all notes as plain text.
    fn export_text(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Text", &["txt"])
            .set_file_name(self.config.export_file_name.as_str())
            .save_file()
        else {
            return;
        };

        match crate::io::serialization::export_text(self.notebook.notes(), &path) {
            Ok(()) => log::info!("Downloaded notes file to {}", path.display()),
            Err(e) => {
                log::error!("Failed to export notes: {:#}", e);
                self.status = Some(format!("Export failed: {}", e));
            }
        }
    }

    /// Export the whole notebook to YAML or JSON.
    fn export_notebook(&mut self, path: PathBuf) {
        match crate::io::serialization::export_notebook(&self.notebook.data(), &path) {
            Ok(()) => log::info!("Exported notebook to {}", path.display()),
            Err(e) => {
                log::error!("Failed to export notebook: {:#}", e);
                self.status = Some(format!("Export failed: {}", e));
            }
        }
    }

    /// Replace the notebook with the contents of a YAML or JSON file.
    fn import_notebook(&mut self, path: PathBuf) {
        match crate::io::serialization::import_notebook(&path) {
            Ok(data) => {
                log::info!("Imported {} notes from {}", data.notes.len(), path.display());
                let outcome = self.notebook.replace(data);
                self.settle(outcome);
            }
            Err(e) => {
                log::error!("Failed to import notebook: {:#}", e);
                self.status = Some(format!("Import failed: {}", e));
            }
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Media...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Video", &["mp4", "webm", "mkv", "mov", "avi"])
                        .pick_file()
                    {
                        self.open_media(path);
                    }
                    ui.close_menu();
                }
                ui.separator();
                let has_notes = !self.notebook.notes().is_empty();
                if ui.add_enabled(has_notes, egui::Button::new("Download Notes...")).clicked() {
                    self.export_text();
                    ui.close_menu();
                }
                ui.menu_button("Export Notebook", |ui| {
                    if ui.button("Export as YAML...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("YAML", &["yaml", "yml"])
                            .set_file_name("notebook.yaml")
                            .save_file()
                        {
                            self.export_notebook(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Export as JSON...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("JSON", &["json"])
                            .set_file_name("notebook.json")
                            .save_file()
                        {
                            self.export_notebook(path);
                        }
                        ui.close_menu();
                    }
                });
                if ui.button("Import Notebook...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Notebook", &["yaml", "yml", "json"])
                        .pick_file()
                    {
                        self.import_notebook(path);
                    }
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                let can_undo = self.notebook.can_undo();
                if ui.add_enabled(can_undo, egui::Button::new("Undo (Ctrl+Z)")).clicked() {
                    self.undo();
                    ui.close_menu();
                }
                let can_redo = self.notebook.can_redo();
                if ui.add_enabled(can_redo, egui::Button::new("Redo (Ctrl+Shift+Z)")).clicked() {
                    self.redo();
                    ui.close_menu();
                }
            });
        });
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Leave keys alone while a text field is being edited
        if ctx.wants_keyboard_input() || self.pending_delete.is_some() {
            return;
        }

        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift) {
            self.undo();
        }

        if ctx.input(|i| {
            (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        }) {
            self.redo();
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.clock.toggle();
        }
    }
}

impl eframe::App for NotesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.clock.tick(ctx.input(|i| i.stable_dt) as f64);
        if self.clock.is_playing() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.menu_bar(ctx, ui);
        });

        let timeline_action = egui::TopBottomPanel::top("timeline")
            .show(ctx, |ui| timeline::show(ui, &self.clock, self.media_name.as_deref()))
            .inner;
        self.apply_timeline_action(timeline_action);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "{} notes, {} of {} categories shown",
                    self.notebook.notes().len(),
                    self.notebook.filters().len(),
                    self.notebook.categories().len()
                ));
                if let Some(ref status) = self.status {
                    ui.separator();
                    ui.label(egui::RichText::new(status).color(egui::Color32::from_rgb(220, 160, 60)));
                }
            });
        });

        let paused_at = self.clock.paused_at();
        let notes_action = egui::CentralPanel::default()
            .show(ctx, |ui| notes_panel::show(ui, &self.notebook, &mut self.panel, paused_at))
            .inner;
        self.apply_notes_action(notes_action);

        if let Some(pending) = self.pending_delete.take() {
            match dialogs::confirm_delete(ctx, &pending) {
                DialogResult::Open => self.pending_delete = Some(pending),
                DialogResult::Confirmed => self.confirm_delete(pending),
                DialogResult::Cancelled => {}
            }
        }

        self.handle_shortcuts(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStorage;

    fn app() -> NotesApp {
        let notebook = NotesManager::load(Box::new(MemoryStorage::new()), 50);
        let mut app = NotesApp::new(notebook, AppConfig::default());
        app.clock.load(600.0);
        app
    }

    #[test]
    fn test_add_note_resets_selection_and_clears_text() {
        let mut app = app();
        app.apply_notes_action(NotesAction::AddCategory("Work".to_string()));
        assert_eq!(app.notebook.selected_category(), "Work");

        app.clock.seek_to(125.0);
        app.panel.note_text = "buy milk".to_string();
        app.apply_notes_action(NotesAction::AddNote("buy milk".to_string()));

        let note = &app.notebook.notes()[0];
        assert_eq!(note.category, "Work");
        assert_eq!(note.timestamp, "2:05");
        assert_eq!(app.notebook.selected_category(), GENERAL);
        assert!(app.panel.note_text.is_empty());
        assert!(app.status.is_none());
    }

    #[test]
    fn test_rejected_note_keeps_text() {
        let mut app = app();
        app.apply_notes_action(NotesAction::AddCategory("Work".to_string()));

        app.clock.play();
        app.panel.note_text = "while playing".to_string();
        app.apply_notes_action(NotesAction::AddNote("while playing".to_string()));

        assert!(app.notebook.notes().is_empty());
        assert_eq!(app.panel.note_text, "while playing");
        assert_eq!(app.notebook.selected_category(), "Work");
        assert!(app.status.is_some());
    }

    #[test]
    fn test_open_media_then_seek_past_default_length() {
        let notebook = NotesManager::load(Box::new(MemoryStorage::new()), 50);
        let config = AppConfig {
            media_length: 100.0,
            ..AppConfig::default()
        };
        let mut app = NotesApp::new(notebook, config);

        app.open_media(PathBuf::from("/videos/lecture.mp4"));
        assert_eq!(app.media_name.as_deref(), Some("lecture.mp4"));
        assert_eq!(app.clock.duration(), Some(100.0));

        app.apply_notes_action(NotesAction::Seek(125.0));
        assert_eq!(app.clock.position(), 125.0);
        assert_eq!(app.clock.paused_at(), Some(125.0));
    }

    #[test]
    fn test_confirmed_delete_and_undo() {
        let mut app = app();
        app.apply_notes_action(NotesAction::AddNote("first".to_string()));
        let note = app.notebook.notes()[0].clone();

        app.apply_notes_action(NotesAction::RequestDeleteNote(note.clone()));
        assert_eq!(app.pending_delete, Some(PendingDelete::Note(note)));

        if let Some(pending) = app.pending_delete.take() {
            app.confirm_delete(pending);
        }
        assert!(app.notebook.notes().is_empty());

        app.undo();
        assert_eq!(app.notebook.notes().len(), 1);
    }

    #[test]
    fn test_deleting_general_reports_reason() {
        let mut app = app();
        app.confirm_delete(PendingDelete::Category(GENERAL.to_string()));
        assert!(app.status.is_some());
        assert!(app.notebook.has_category(GENERAL));
    }
}
