// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Notes panel.
//!
//! This module draws the note input, the category and filter controls, and
//! the list of visible notes. It never mutates the notebook itself; every
//! interaction is reported back as a [`NotesAction`] for the app to apply.

use crate::models::note::{Note, GENERAL};
use crate::models::notebook::NotesManager;

/// Result of notes panel interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum NotesAction {
    None,
    AddNote(String),
    SelectCategory(String),
    AddCategory(String),
    RenameCategory { from: String, to: String },
    RequestDeleteCategory(String),
    RequestDeleteNote(Note),
    ToggleFilter(String),
    SelectAllFilters,
    Seek(f64),
    ExportText,
}

/// Text fields and edit modes owned by the panel rather than the notebook.
#[derive(Debug, Default)]
pub struct NotesPanelState {
    pub note_text: String,
    pub adding_category: bool,
    pub new_category: String,
    /// Category being renamed, with the name typed so far
    pub editing_category: Option<(String, String)>,
}

impl NotesPanelState {
    pub fn finish_add_category(&mut self) {
        self.adding_category = false;
        self.new_category.clear();
    }

    pub fn finish_rename(&mut self) {
        self.editing_category = None;
    }
}

/// Word finished by an edit: the text grew by a space typed right after a word.
pub fn completed_word(before: &str, after: &str) -> Option<String> {
    if after.len() <= before.len() {
        return None;
    }
    let typed = after.strip_suffix(' ')?;
    if typed.ends_with(char::is_whitespace) {
        return None;
    }
    typed.split_whitespace().last().map(str::to_string)
}

fn enter_pressed(ui: &egui::Ui, response: &egui::Response) -> bool {
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

/// Display the notes panel.
pub fn show(
    ui: &mut egui::Ui,
    notebook: &NotesManager,
    state: &mut NotesPanelState,
    paused_at: Option<f64>,
) -> NotesAction {
    let mut action = NotesAction::None;

    // Header: title, download, filter menu
    ui.horizontal(|ui| {
        ui.heading("Notes");

        let has_notes = !notebook.notes().is_empty();
        if ui
            .add_enabled(has_notes, egui::Button::new("⬇"))
            .on_hover_text("Download notes")
            .clicked()
        {
            action = NotesAction::ExportText;
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.menu_button(format!("Filter {} ⏷", notebook.filter_label()), |ui| {
                let mut all = notebook.all_filters_selected();
                if ui.checkbox(&mut all, "Show All").clicked() && !notebook.all_filters_selected() {
                    action = NotesAction::SelectAllFilters;
                }
                ui.separator();
                for category in notebook.categories() {
                    let mut visible = notebook.is_filter_selected(category);
                    if ui.checkbox(&mut visible, category.as_str()).clicked() {
                        action = NotesAction::ToggleFilter(category.clone());
                    }
                }
            });
        });
    });

    ui.separator();

    // Input row: category, text, add
    ui.horizontal(|ui| {
        egui::ComboBox::from_id_source("note_category")
            .selected_text(notebook.selected_category())
            .show_ui(ui, |ui| {
                for category in notebook.categories() {
                    let selected = category == notebook.selected_category();
                    if ui.selectable_label(selected, category.as_str()).clicked() {
                        action = NotesAction::SelectCategory(category.clone());
                    }
                }
            });

        let can_add = paused_at.is_some();
        let before = state.note_text.clone();
        let add_clicked = ui
            .with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let clicked = ui.add_enabled(can_add, egui::Button::new("Add")).clicked();
                let input = ui.add_enabled(
                    can_add,
                    egui::TextEdit::singleline(&mut state.note_text)
                        .hint_text("Write your note here...")
                        .desired_width(f32::INFINITY),
                );
                if input.changed() {
                    if let Some(word) = completed_word(&before, &state.note_text) {
                        log::info!("Completed word: {}", word);
                    }
                }
                clicked || enter_pressed(ui, &input)
            })
            .inner;

        if add_clicked {
            action = NotesAction::AddNote(state.note_text.clone());
        }
    });

    if paused_at.is_none() {
        ui.label(egui::RichText::new("Pause playback to add a note.").small().weak());
    }

    // Category management
    egui::CollapsingHeader::new("Categories")
        .default_open(false)
        .show(ui, |ui| {
            for category in notebook.categories() {
                ui.horizontal(|ui| {
                    let editing = matches!(&state.editing_category, Some((name, _)) if name == category);
                    if editing {
                        if let Some((_, text)) = state.editing_category.as_mut() {
                            let response = ui.text_edit_singleline(text);
                            let save = ui.small_button("✓").on_hover_text("Save").clicked();
                            if save || enter_pressed(ui, &response) {
                                action = NotesAction::RenameCategory {
                                    from: category.clone(),
                                    to: text.clone(),
                                };
                            }
                        }
                        if ui.small_button("✕").on_hover_text("Cancel").clicked() {
                            state.finish_rename();
                        }
                    } else {
                        ui.label(category.as_str());
                        if category != GENERAL {
                            if ui.small_button("✎").on_hover_text("Edit category").clicked() {
                                state.editing_category = Some((category.clone(), category.clone()));
                            }
                            if ui.small_button("🗑").on_hover_text("Delete category").clicked() {
                                action = NotesAction::RequestDeleteCategory(category.clone());
                            }
                        }
                    }
                });
            }

            if state.adding_category {
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut state.new_category).hint_text("New category"),
                    );
                    let add = ui.small_button("✓").on_hover_text("Add category").clicked();
                    if add || enter_pressed(ui, &response) {
                        action = NotesAction::AddCategory(state.new_category.clone());
                    }
                    if ui.small_button("✕").on_hover_text("Cancel").clicked() {
                        state.finish_add_category();
                    }
                });
            } else if ui.link("+ Add Category").clicked() {
                state.adding_category = true;
            }
        });

    ui.separator();
    ui.label(egui::RichText::new("Your Notes:").strong());

    let badge_color = ui.visuals().faint_bg_color;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if notebook.filtered_notes().next().is_none() {
                ui.label(egui::RichText::new("No notes to show.").italics().weak());
            }

            for note in notebook.filtered_notes() {
                ui.horizontal(|ui| {
                    ui.label("•");
                    ui.label(note.text.as_str());
                    if ui
                        .link(format!("[{}]", note.timestamp))
                        .on_hover_text("Jump to this moment")
                        .clicked()
                    {
                        action = NotesAction::Seek(note.time_in_seconds);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("🗑").on_hover_text("Delete note").clicked() {
                            action = NotesAction::RequestDeleteNote(note.clone());
                        }
                        ui.label(
                            egui::RichText::new(note.category.as_str())
                                .small()
                                .background_color(badge_color),
                        );
                    });
                });
            }
        });

    action
}
