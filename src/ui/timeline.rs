// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback timeline scrubber.
//!
//! This module provides the play/pause control and scrubber used to pick
//! the moment a note is attached to.

use crate::models::playback::PlaybackClock;
use crate::util::time::format_timestamp;

/// Result of timeline interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineAction {
    None,
    TogglePlay,
    Seek(f64),
    SetDuration(f64),
}

/// Display the timeline for the loaded media.
pub fn show(ui: &mut egui::Ui, clock: &PlaybackClock, media_name: Option<&str>) -> TimelineAction {
    let mut action = TimelineAction::None;

    let Some(duration) = clock.duration() else {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("No media loaded. Use File > Open Media... to start.").italics().weak());
        });
        return action;
    };

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let label = if clock.is_playing() { "⏸ Pause" } else { "▶ Play" };
        if ui.button(label).clicked() {
            action = TimelineAction::TogglePlay;
        }

        ui.label(format!(
            "{} / {}",
            format_timestamp(clock.position()),
            format_timestamp(duration)
        ));

        // Leave room for the length field on the right
        let mut position = clock.position();
        ui.spacing_mut().slider_width = (ui.available_width() - 220.0).max(80.0);
        let slider = ui.add(egui::Slider::new(&mut position, 0.0..=duration).show_value(false));
        if slider.changed() {
            action = TimelineAction::Seek(position);
        }

        ui.separator();

        ui.label("Length");
        let mut length = duration;
        if ui
            .add(egui::DragValue::new(&mut length).speed(1.0).suffix(" s"))
            .changed()
        {
            action = TimelineAction::SetDuration(length.max(0.0));
        }

        if let Some(name) = media_name {
            ui.label(egui::RichText::new(name).weak());
        }
    });

    action
}
