// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Note data structures.
//!
//! A note is a short piece of text pinned to a playback position and filed
//! under a category.

use crate::util::time::format_timestamp;
use serde::{Deserialize, Serialize};

/// Category that always exists and cannot be deleted.
pub const GENERAL: &str = "General";

/// A timestamped note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub text: String,
    /// Display label for `time_in_seconds`, e.g. `2:05`.
    pub timestamp: String,
    pub time_in_seconds: f64,
    pub category: String,
}

impl Note {
    /// Create a note at the given playback position.
    pub fn new(text: String, category: String, time_in_seconds: f64) -> Self {
        Self {
            text,
            timestamp: format_timestamp(time_in_seconds),
            time_in_seconds,
            category,
        }
    }

    /// Render the note as a plain-text export line.
    pub fn export_line(&self) -> String {
        format!("[{}] {} ({})", self.category, self.text, self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_formats_timestamp() {
        let note = Note::new("buy milk".to_string(), "Work".to_string(), 125.0);
        assert_eq!(note.timestamp, "2:05");
        assert_eq!(note.time_in_seconds, 125.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let note = Note::new("intro".to_string(), GENERAL.to_string(), 3.5);
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["text"], "intro");
        assert_eq!(json["timestamp"], "0:03");
        assert_eq!(json["timeInSeconds"], 3.5);
        assert_eq!(json["category"], "General");
    }

    #[test]
    fn test_export_line() {
        let note = Note::new("cut here".to_string(), "Edit".to_string(), 61.0);
        assert_eq!(note.export_line(), "[Edit] cut here (1:01)");
    }
}
