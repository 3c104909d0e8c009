// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Confirmation dialogs for destructive actions.

use crate::models::note::Note;

/// A deletion waiting for the user to confirm it.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingDelete {
    Category(String),
    Note(Note),
}

/// State of a confirmation dialog after this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    Open,
    Confirmed,
    Cancelled,
}

/// Title and message shown for a pending deletion.
pub fn dialog_text(pending: &PendingDelete) -> (&'static str, String) {
    match pending {
        PendingDelete::Category(name) => (
            "Delete Category",
            format!(
                "Are you sure you want to delete {} and all its associated notes?",
                name
            ),
        ),
        PendingDelete::Note(_) => (
            "Delete Note",
            "Are you sure you want to delete this note?".to_string(),
        ),
    }
}

/// Show the confirmation window for `pending`.
pub fn confirm_delete(ctx: &egui::Context, pending: &PendingDelete) -> DialogResult {
    let (title, message) = dialog_text(pending);
    let mut result = DialogResult::Open;

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_max_width(320.0);
            ui.label(message);
            ui.add_space(12.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let delete = egui::RichText::new("Delete").color(egui::Color32::from_rgb(220, 70, 70));
                if ui.button(delete).clicked() {
                    result = DialogResult::Confirmed;
                }
                if ui.button("Cancel").clicked() {
                    result = DialogResult::Cancelled;
                }
            });
        });

    // Escape dismisses the dialog
    if result == DialogResult::Open && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        result = DialogResult::Cancelled;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_dialog_mentions_cascade() {
        let (title, message) = dialog_text(&PendingDelete::Category("Work".to_string()));
        assert_eq!(title, "Delete Category");
        assert!(message.contains("delete Work and all its associated notes"));
        assert!(!message.contains("cannot be undone"));
    }

    #[test]
    fn test_note_dialog() {
        let note = Note::new("x".to_string(), "General".to_string(), 1.0);
        let (title, message) = dialog_text(&PendingDelete::Note(note));
        assert_eq!(title, "Delete Note");
        // Deletions can be undone from the Edit menu
        assert!(!message.contains("cannot be undone"));
    }
}
