// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! vidnotes - timestamped notes for video review
//!
//! A desktop application for taking categorized notes pinned to moments in
//! a video, filtering them by category, and exporting them.

mod app;
mod config;
mod io;
mod models;
mod ui;
mod util;

use anyhow::{Context, Result};
use app::NotesApp;
use config::AppConfig;
use io::storage::FileStorage;
use models::notebook::NotesManager;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Open the interaction log for appending, creating it and its directory.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Initialize logging into the interaction log, `info` unless RUST_LOG says otherwise.
fn init_logging(config: &AppConfig) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match open_log_file(&config.log_file()) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder.init();
        }
        Err(e) => {
            // Still log to stderr rather than not at all
            builder.init();
            log::warn!("{:#}", e);
        }
    }
}

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(&config);
    log::info!("Storing notes in {}", config.data_dir.display());

    let storage = FileStorage::new(&config.data_dir);
    let notebook = NotesManager::load(Box::new(storage), config.history_limit);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("vidnotes - Video Notes"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "vidnotes",
        options,
        Box::new(move |_cc| Ok(Box::new(NotesApp::new(notebook, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_log_file_is_created_and_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("vidnotes.log");

        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "first session").unwrap();
        drop(file);

        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "Completed word: hello").unwrap();
        drop(file);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first session\nCompleted word: hello\n");
    }
}
