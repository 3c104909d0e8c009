// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Notebook export and import.
//!
//! Notes can be downloaded as a plain-text list, and the whole notebook
//! (notes, categories and filters) can be exported to and imported from
//! YAML or JSON.

use crate::models::note::Note;
use crate::models::notebook::NotebookData;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Render notes as text, one `[category] text (timestamp)` line each.
pub fn notes_to_text(notes: &[Note]) -> String {
    notes
        .iter()
        .map(Note::export_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Export notes as a plain-text list.
pub fn export_text(notes: &[Note], path: &Path) -> Result<()> {
    std::fs::write(path, notes_to_text(notes))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Export notebook data to YAML format.
pub fn export_yaml(data: &NotebookData, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    std::fs::write(path, yaml).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Export notebook data to JSON format.
pub fn export_json(data: &NotebookData, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Import notebook data from YAML format.
pub fn import_yaml(path: &Path) -> Result<NotebookData> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let data = serde_yaml::from_str(&yaml).context("Invalid notebook YAML")?;
    Ok(data)
}

/// Import notebook data from JSON format.
pub fn import_json(path: &Path) -> Result<NotebookData> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let data = serde_json::from_str(&json).context("Invalid notebook JSON")?;
    Ok(data)
}

/// Export to YAML or JSON depending on the file extension.
pub fn export_notebook(data: &NotebookData, path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => export_yaml(data, path),
        Some("json") => export_json(data, path),
        other => bail!("Unsupported file extension: {:?}", other),
    }
}

/// Import from YAML or JSON depending on the file extension.
pub fn import_notebook(path: &Path) -> Result<NotebookData> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        other => bail!("Unsupported file extension: {:?}", other),
    }
}
